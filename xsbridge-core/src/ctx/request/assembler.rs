use crate::config::BridgeConfig;
use crate::ctx::request::normalization::{BodyReconciler, normalize_script_path, sanitize_headers};
use crate::ctx::request::{
    CookieList, HostRequest, LegacyMethod, NormalizedRequest, RequestError, RequestId,
};
use crate::locale::{AcceptLanguageResolver, LocaleResolver};
use http::header::CONTENT_TYPE;
use tracing::{debug, debug_span, warn};

/// Turns host requests into legacy requests.
///
/// Steps run in a fixed order, each to completion:
///
/// 1. secret-bearing headers are blanked;
/// 2. the payload is reconciled into a raw body or entities;
/// 3. cookies are copied in arrival order;
/// 4. the language is resolved;
/// 5. method and script path are resolved.
///
/// The assembler keeps no per-request state and can be shared across threads.
pub struct RequestAssembler {
    reconciler: BodyReconciler,
    script_extension: String,
    locale: Box<dyn LocaleResolver>,
}

impl Default for RequestAssembler {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

impl RequestAssembler {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            reconciler: BodyReconciler::new(&config.request, &config.multipart),
            script_extension: config.request.script_extension.clone(),
            locale: Box::new(AcceptLanguageResolver::new(
                config.request.default_language.clone(),
            )),
        }
    }

    pub fn with_locale_resolver(mut self, resolver: impl LocaleResolver + 'static) -> Self {
        self.locale = Box::new(resolver);
        self
    }

    pub fn script_extension(&self) -> &str {
        &self.script_extension
    }

    pub fn assemble(&self, req: HostRequest) -> Result<NormalizedRequest, RequestError> {
        let request_id = RequestId::default();
        let span = debug_span!("assemble_request", request_id = %request_id);
        let _entered = span.enter();

        // Nothing below may observe the original secret values.
        let headers = sanitize_headers(&req.headers);

        // Opaque bytes must still reach multipart detection.
        let content_type = headers
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()));
        let resolution = self
            .reconciler
            .reconcile(content_type.as_deref(), req.body, req.form_data)
            .inspect_err(|err| {
                debug!(error = %err, status = err.status().as_u16(), "request rejected");
            })?;

        for failure in &resolution.cleanup_failures {
            warn!(
                path = %failure.path.display(),
                error = %failure.source,
                "upload cleanup failed"
            );
        }

        let cookies: CookieList = req.cookies.into_iter().collect();
        let mut request =
            NormalizedRequest::from_content(request_id, headers, resolution.content, cookies);

        let language = self.locale.resolve(&request);
        request.set_language(language);

        request.set_method(LegacyMethod::resolve(&req.method));
        request.set_script_path(normalize_script_path(&req.path, self.script_extension()));

        debug!(
            method = %request.method(),
            path = request.path(),
            query_path = request.query_path(),
            entities = request.entities().len(),
            "request normalized"
        );

        Ok(request)
    }
}
