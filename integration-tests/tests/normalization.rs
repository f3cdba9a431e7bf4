use bytes::Bytes;
use http::HeaderValue;
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use integration_tests::harness::{multipart_body, spool_upload, write_config};
use pretty_assertions::assert_eq;
use xsbridge_core::config::BridgeConfig;
use xsbridge_core::ctx::{FormData, HostRequest, LegacyMethod, RequestAssembler};

#[test]
fn raw_body_is_byte_identical() {
    // Arrange
    let payload: Vec<u8> = (0u8..=255).collect();
    let req = HostRequest::new("PUT", "/app/blob.xsjs")
        .header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        )
        .body(payload.clone());

    // Act
    let request = RequestAssembler::default().assemble(req).unwrap();

    // Assert
    assert_eq!(request.body(), Some(&Bytes::from(payload)));
    assert!(request.entities().is_empty());
}

#[test]
fn secrets_never_survive_assembly() {
    // Arrange
    let req = HostRequest::new("GET", "/app/service.xsjs")
        .header(COOKIE, HeaderValue::from_static("sid=1"))
        .header(COOKIE, HeaderValue::from_static("theme=dark"))
        .header(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

    // Act
    let request = RequestAssembler::default().assemble(req).unwrap();

    // Assert
    let cookie: Vec<_> = request.headers().get_all(COOKIE).iter().collect();
    assert_eq!(cookie, vec![&HeaderValue::from_static("")]);
    assert_eq!(request.header("authorization"), Some(""));
}

#[test]
fn form_uploads_are_consumed_and_removed() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let a = spool_upload(dir.path(), "a", "a.txt", b"alpha");
    let b = spool_upload(dir.path(), "b", "b.txt", b"beta");
    let paths = [a.path.clone(), b.path.clone()];
    let form = FormData::new()
        .field("tag", ["x", "y"])
        .field("title", ["t"])
        .files("docs", vec![a, b]);
    let expected = form.value_count() + form.file_count();
    let req = HostRequest::new("POST", "/app/upload.xsjs")
        .header(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=zz"),
        )
        .form_data(form);

    // Act
    let request = RequestAssembler::default().assemble(req).unwrap();

    // Assert
    assert_eq!(request.entities().len(), expected);
    assert!(request.body().is_none());
    assert!(paths.iter().all(|p| !p.exists()));
    let files: Vec<_> = request
        .entities()
        .iter()
        .filter(|e| e.is_file())
        .filter_map(|e| e.body_text())
        .collect();
    assert_eq!(files, vec!["alpha", "beta"]);
}

#[test]
fn batch_request_is_decomposed_recursively() {
    // Arrange
    let changeset = String::from_utf8(multipart_body(
        "cs",
        &[
            ("application/http", "PUT /Orders(1) HTTP/1.1"),
            ("application/http", "DELETE /Orders(2) HTTP/1.1"),
        ],
    ))
    .unwrap();
    let batch = multipart_body(
        "batch",
        &[
            ("application/http", "GET /Orders HTTP/1.1"),
            ("multipart/mixed; boundary=cs", changeset.as_str()),
        ],
    );
    let req = HostRequest::new("POST", "/svc/main.xsjs/$batch")
        .header(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/mixed; boundary=batch"),
        )
        .body(batch);

    // Act
    let request = RequestAssembler::default().assemble(req).unwrap();

    // Assert
    assert_eq!(request.query_path(), "$batch");
    assert_eq!(request.entities().len(), 2);
    assert_eq!(request.entities()[1].entities().len(), 2);
}

#[test]
fn missing_boundary_is_a_client_error() {
    // Arrange
    let req = HostRequest::new("POST", "/app/upload.xsjs")
        .header(CONTENT_TYPE, HeaderValue::from_static("multipart/mixed"))
        .body("--x\r\n\r\n--x--");

    // Act
    let err = RequestAssembler::default().assemble(req).unwrap_err();

    // Assert
    assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
    assert_eq!(
        err.to_string(),
        "Multipart request error. No boundary parameter found on header Content-Type (\"multipart/mixed\")"
    );
}

#[test]
fn query_path_is_always_a_suffix_of_the_stripped_path() {
    let assembler = RequestAssembler::default();

    for raw in [
        "/app/service.xsjs",
        "/app/service.xsjs?x=1",
        "/app/service.xsjs/orders",
        "/app/service.xsjs/orders/1?expand=all",
        "/a.xsjs/b.xsjs/c",
        "/static/index.html",
        "/",
    ] {
        // Act
        let request = assembler.assemble(HostRequest::new("GET", raw)).unwrap();

        // Assert
        let stripped = raw.split('?').next().unwrap();
        assert!(stripped.ends_with(request.query_path()), "{raw}");
        assert!(!request.query_path().contains('?'), "{raw}");
    }
}

#[test]
fn config_file_drives_assembly() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
        [request]
        script_extension = ".xsodata"
        default_language = "de"

        [multipart]
        max_parts = 1
        "#,
    );
    let cfg = BridgeConfig::from_file(&path).unwrap();
    let assembler = RequestAssembler::from_config(&cfg);
    let two_parts = multipart_body("b", &[("text/plain", "1"), ("text/plain", "2")]);

    // Act
    let ok = assembler
        .assemble(HostRequest::new("DELETE", "/svc/main.xsodata/Orders(1)"))
        .unwrap();
    let too_many = assembler.assemble(
        HostRequest::new("POST", "/svc/main.xsodata")
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("multipart/mixed; boundary=b"),
            )
            .body(two_parts),
    );

    // Assert
    assert_eq!(ok.method(), LegacyMethod::Delete);
    assert_eq!(ok.path(), "/svc/main.xsodata");
    assert_eq!(ok.query_path(), "Orders(1)");
    assert_eq!(ok.language(), "de");
    assert!(too_many.unwrap_err().is_malformed());
}
