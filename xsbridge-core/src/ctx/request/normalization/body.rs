use crate::config::{MultipartConfig, RequestConfig};
use crate::ctx::request::normalization::{
    BodyResolution, MultipartDecomposer, RequestContent, entities_from_form_data, is_form_data,
    is_multipart,
};
use crate::ctx::request::{FormData, RequestError};
use bytes::Bytes;

/// Decides how a request payload is represented: raw body or entities.
///
/// Exactly one path is taken, checked in this order:
///
/// 1. form data pre-parsed by the host is converted field by field and file by file;
/// 2. a multipart body is decomposed;
/// 3. anything else is kept verbatim as the raw body.
///
/// `multipart/form-data` normally arrives pre-parsed. When it does not, it is
/// decomposed here unless `decompose_unparsed_form_data` is off, in which case
/// it stays a raw body.
#[derive(Debug, Clone)]
pub struct BodyReconciler {
    decomposer: MultipartDecomposer,
    decompose_unparsed_form_data: bool,
}

impl Default for BodyReconciler {
    fn default() -> Self {
        Self::new(&RequestConfig::default(), &MultipartConfig::default())
    }
}

impl BodyReconciler {
    pub fn new(request: &RequestConfig, multipart: &MultipartConfig) -> Self {
        Self {
            decomposer: MultipartDecomposer::new(multipart),
            decompose_unparsed_form_data: request.decompose_unparsed_form_data,
        }
    }

    pub fn reconcile(
        &self,
        content_type: Option<&str>,
        body: Option<Bytes>,
        form_data: Option<FormData>,
    ) -> Result<BodyResolution, RequestError> {
        // Pre-parsed data wins and never pays for boundary detection.
        if let Some(form) = form_data {
            return entities_from_form_data(form);
        }

        let Some(content_type) = content_type.filter(|ct| self.should_decompose(ct)) else {
            return Ok(RequestContent::Body(body).into());
        };

        let body = body.unwrap_or_default();
        let entities = self.decomposer.decompose(content_type, &body)?;

        Ok(RequestContent::Entities(entities).into())
    }

    fn should_decompose(&self, content_type: &str) -> bool {
        is_multipart(content_type)
            && (!is_form_data(content_type) || self.decompose_unparsed_form_data)
    }
}
