use crate::ctx::request::normalization::{BodyResolution, RequestContent};
use crate::ctx::request::{
    CleanupError, Entity, FormData, RequestError, SYNTHETIC_DISPOSITION, SYNTHETIC_FILE_SIZE,
    SYNTHETIC_FILENAME, SYNTHETIC_NAME, UploadedFile,
};
use bytes::Bytes;
use http::header::CONTENT_DISPOSITION;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Converts form data the host already decomposed into entities.
///
/// Every field value becomes its own entity, in declaration order, followed
/// by one entity per uploaded file. Upload bodies are read from their
/// temporary location, which is removed right after. A failed removal does
/// not stop the conversion; it is reported in the resolution.
///
/// When an upload cannot be read the request fails, but the temporary files
/// of all uploads not yet consumed are still removed.
pub fn entities_from_form_data(form: FormData) -> Result<BodyResolution, RequestError> {
    let mut entities = Vec::with_capacity(form.value_count() + form.file_count());
    let mut cleanup_failures = Vec::new();

    for (name, values) in form.fields {
        for value in values {
            entities.push(field_entity(&name, value));
        }
    }

    let uploads: Vec<(String, UploadedFile)> = form
        .files
        .into_iter()
        .flat_map(|(name, files)| files.into_iter().map(move |f| (name.clone(), f)))
        .collect();

    let mut pending = uploads.into_iter();
    while let Some((name, upload)) = pending.next() {
        let body = match fs::read(&upload.path) {
            Ok(content) => Bytes::from(content),
            Err(source) => {
                discard_uploads(std::iter::once(upload.path.as_path()));
                discard_uploads(pending.as_slice().iter().map(|(_, f)| f.path.as_path()));
                return Err(RequestError::UploadUnreadable {
                    path: upload.path,
                    source,
                });
            }
        };

        if let Err(err) = remove_upload(&upload.path) {
            cleanup_failures.push(err);
        }

        debug!(
            field = %name,
            filename = %upload.original_filename,
            size = upload.size,
            "consumed uploaded file"
        );

        entities.push(file_entity(&name, upload, body));
    }

    Ok(BodyResolution {
        content: RequestContent::Entities(entities),
        cleanup_failures,
    })
}

fn field_entity(name: &str, value: String) -> Entity {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_DISPOSITION,
        header_value(&format!("form-data; name=\"{name}\"")),
    );

    let mut parameters = BTreeMap::new();
    parameters.insert(name.to_string(), value.clone());

    Entity::new(headers, parameters, Bytes::from(value))
}

fn file_entity(name: &str, upload: UploadedFile, body: Bytes) -> Entity {
    let mut headers = upload.headers;
    headers.insert(
        HeaderName::from_static(SYNTHETIC_DISPOSITION),
        HeaderValue::from_static("form-data"),
    );
    headers.insert(HeaderName::from_static(SYNTHETIC_NAME), header_value(name));
    headers.insert(
        HeaderName::from_static(SYNTHETIC_FILENAME),
        header_value(&upload.original_filename),
    );
    headers.insert(
        HeaderName::from_static(SYNTHETIC_FILE_SIZE),
        HeaderValue::from(upload.size),
    );

    Entity::new(headers, BTreeMap::new(), body)
}

/// Removes a consumed temporary upload.
pub(crate) fn remove_upload(path: &Path) -> Result<(), CleanupError> {
    fs::remove_file(path).map_err(|source| CleanupError {
        path: path.to_path_buf(),
        source,
    })
}

/// Best-effort removal on the failure path.
fn discard_uploads<'a>(paths: impl Iterator<Item = &'a Path>) {
    for path in paths {
        if let Err(err) = remove_upload(path) {
            warn!(error = %err, "upload cleanup failed");
        }
    }
}

/// Header value with control characters stripped.
fn header_value(raw: &str) -> HeaderValue {
    let cleaned: Vec<u8> = raw
        .bytes()
        .filter(|b| *b == b'\t' || (*b >= 0x20 && *b != 0x7f))
        .collect();

    HeaderValue::from_bytes(&cleaned).unwrap_or_else(|_| HeaderValue::from_static(""))
}
