use http::HeaderMap;
use serde::Serialize;
use std::collections::BTreeMap;
use xsbridge_core::ctx::{Entity, NormalizedRequest};

/// JSON view of a normalized request.
#[derive(Debug, Serialize)]
pub struct RenderedRequest<'a> {
    pub request_id: String,
    pub method: &'static str,
    pub path: &'a str,
    pub query_path: &'a str,
    pub language: &'a str,
    pub cookies: Vec<(&'a str, &'a str)>,
    pub headers: Vec<(&'a str, String)>,
    pub body: Option<String>,
    pub entities: Vec<RenderedEntity<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RenderedEntity<'a> {
    pub headers: Vec<(&'a str, String)>,
    pub parameters: &'a BTreeMap<String, String>,
    pub body: String,
    pub entities: Vec<RenderedEntity<'a>>,
}

impl<'a> From<&'a NormalizedRequest> for RenderedRequest<'a> {
    fn from(req: &'a NormalizedRequest) -> Self {
        Self {
            request_id: req.request_id().to_string(),
            method: req.method().as_str(),
            path: req.path(),
            query_path: req.query_path(),
            language: req.language(),
            cookies: req.cookies().iter().collect(),
            headers: headers(req.headers()),
            body: req.body().map(|b| String::from_utf8_lossy(b).into_owned()),
            entities: req.entities().iter().map(RenderedEntity::from).collect(),
        }
    }
}

impl<'a> From<&'a Entity> for RenderedEntity<'a> {
    fn from(entity: &'a Entity) -> Self {
        Self {
            headers: headers(entity.headers()),
            parameters: entity.parameters(),
            body: String::from_utf8_lossy(entity.body()).into_owned(),
            entities: entity.entities().iter().map(RenderedEntity::from).collect(),
        }
    }
}

fn headers(map: &HeaderMap) -> Vec<(&str, String)> {
    map.iter()
        .map(|(k, v)| (k.as_str(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::RenderedRequest;
    use http::HeaderValue;
    use http::header::{CONTENT_TYPE, COOKIE};
    use pretty_assertions::assert_eq;
    use xsbridge_core::ctx::{HostRequest, RequestAssembler};

    #[test]
    fn renders_normalized_fields() {
        // Arrange
        let req = HostRequest::new("GET", "/app/service.xsjs/orders?id=1")
            .header(COOKIE, HeaderValue::from_static("sid=secret"))
            .cookie("sid", "secret");
        let normalized = RequestAssembler::default().assemble(req).unwrap();

        // Act
        let json = serde_json::to_value(RenderedRequest::from(&normalized)).unwrap();

        // Assert
        assert_eq!(json["method"], "GET");
        assert_eq!(json["path"], "/app/service.xsjs");
        assert_eq!(json["query_path"], "orders");
        assert_eq!(json["headers"][0], serde_json::json!(["cookie", ""]));
        assert_eq!(json["cookies"][0], serde_json::json!(["sid", "secret"]));
        assert!(json["body"].is_null());
    }

    #[test]
    fn renders_entities() {
        // Arrange
        let req = HostRequest::new("POST", "/a.xsjs")
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("multipart/mixed; boundary=b"),
            )
            .body("--b\r\n\r\nhello\r\n--b--\r\n");
        let normalized = RequestAssembler::default().assemble(req).unwrap();

        // Act
        let json = serde_json::to_value(RenderedRequest::from(&normalized)).unwrap();

        // Assert
        assert_eq!(json["entities"][0]["body"], "hello");
        assert!(json["body"].is_null());
    }
}
