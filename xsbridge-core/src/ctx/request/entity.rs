use bytes::Bytes;
use http::HeaderMap;
use std::collections::BTreeMap;

/// Synthetic header carrying the disposition kind of an uploaded file.
pub const SYNTHETIC_DISPOSITION: &str = "~content_disposition";
/// Synthetic header carrying the form field an upload belongs to.
pub const SYNTHETIC_NAME: &str = "~content_name";
/// Synthetic header carrying the client-side filename of an upload.
pub const SYNTHETIC_FILENAME: &str = "~content_filename";
/// Synthetic header carrying the byte size of an upload.
pub const SYNTHETIC_FILE_SIZE: &str = "~content_file_size";

/// One decomposed unit of a multipart or form request.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    headers: HeaderMap,
    parameters: BTreeMap<String, String>,
    body: Bytes,
    entities: Vec<Entity>,
}

impl Entity {
    pub fn new(headers: HeaderMap, parameters: BTreeMap<String, String>, body: Bytes) -> Self {
        Self {
            headers,
            parameters,
            body,
            entities: Vec::new(),
        }
    }

    pub(crate) fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.header(http::header::CONTENT_DISPOSITION.as_str())
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, when it is valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Nested entities of a multipart part that was itself multipart.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// True for entities built from an uploaded file.
    pub fn is_file(&self) -> bool {
        self.headers.contains_key(SYNTHETIC_FILENAME)
    }
}
