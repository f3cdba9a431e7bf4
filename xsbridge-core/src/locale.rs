use crate::ctx::NormalizedRequest;
use http::header::ACCEPT_LANGUAGE;

/// Resolves the language a request is executed in.
///
/// Invoked once per assembly, after headers, body/entities and cookies are
/// in place and before the path is resolved.
pub trait LocaleResolver: Send + Sync {
    fn resolve(&self, request: &NormalizedRequest) -> String;
}

impl<F> LocaleResolver for F
where
    F: Fn(&NormalizedRequest) -> String + Send + Sync,
{
    fn resolve(&self, request: &NormalizedRequest) -> String {
        self(request)
    }
}

/// Picks the most preferred language of the `Accept-Language` header.
#[derive(Debug, Clone, Default)]
pub struct AcceptLanguageResolver {
    default_language: String,
}

impl AcceptLanguageResolver {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }
}

impl LocaleResolver for AcceptLanguageResolver {
    fn resolve(&self, request: &NormalizedRequest) -> String {
        request
            .header(ACCEPT_LANGUAGE.as_str())
            .and_then(preferred_language)
            .unwrap_or_else(|| self.default_language.clone())
    }
}

/// Highest weighted concrete tag; the first one listed wins ties.
fn preferred_language(header: &str) -> Option<String> {
    let mut best: Option<(&str, f32)> = None;

    for item in header.split(',') {
        let mut parts = item.split(';');
        let tag = parts.next().unwrap_or_default().trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }

        let weight = parts
            .filter_map(|p| p.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        // Zero means "not acceptable"; weights outside (0, 1] are ignored.
        if weight.is_nan() || weight <= 0.0 || weight > 1.0 {
            continue;
        }

        if best.is_none_or(|(_, w)| weight > w) {
            best = Some((tag, weight));
        }
    }

    best.map(|(tag, _)| tag.to_string())
}
