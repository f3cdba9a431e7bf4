use crate::ctx::request::normalization::{RequestContent, ScriptPath};
use crate::ctx::request::{CookieList, Entity, LegacyMethod, RequestId};
use bytes::Bytes;
use http::HeaderMap;

/// The legacy request model consumed by script execution.
///
/// Built once per inbound call, either by the
/// [`RequestAssembler`](crate::ctx::RequestAssembler) from a host request or
/// by [`NormalizedRequest::synthetic`]. Read-only afterwards.
#[derive(Debug)]
pub struct NormalizedRequest {
    request_id: RequestId,
    method: LegacyMethod,
    path: String,
    query_path: String,
    language: String,
    cookies: CookieList,
    headers: HeaderMap,
    body: Option<Bytes>,
    entities: Vec<Entity>,
}

impl NormalizedRequest {
    /// A request that did not originate from an HTTP call, e.g. a scheduled job run.
    pub fn synthetic(method: LegacyMethod, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::default(),
            method,
            path: path.into(),
            query_path: String::new(),
            language: String::new(),
            cookies: CookieList::new(),
            headers: HeaderMap::new(),
            body: None,
            entities: Vec::new(),
        }
    }

    /// Starts an assembly from already-sanitized headers and resolved content.
    pub(crate) fn from_content(
        request_id: RequestId,
        headers: HeaderMap,
        content: RequestContent,
        cookies: CookieList,
    ) -> Self {
        let (body, entities) = match content {
            RequestContent::Body(body) => (body, Vec::new()),
            RequestContent::Entities(entities) => (None, entities),
        };

        Self {
            request_id,
            method: LegacyMethod::Invalid,
            path: String::new(),
            query_path: String::new(),
            language: String::new(),
            cookies,
            headers,
            body,
            entities,
        }
    }

    pub(crate) fn set_language(&mut self, language: String) {
        self.language = language;
    }

    pub(crate) fn set_method(&mut self, method: LegacyMethod) {
        self.method = method;
    }

    pub(crate) fn set_script_path(&mut self, script_path: ScriptPath) {
        self.path = script_path.path;
        self.query_path = script_path.query_path;
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn method(&self) -> LegacyMethod {
        self.method
    }

    /// Script path, up to and including the script marker.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Virtual sub-path following the script marker.
    pub fn query_path(&self) -> &str {
        &self.query_path
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn cookies(&self) -> &CookieList {
        &self.cookies
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}
