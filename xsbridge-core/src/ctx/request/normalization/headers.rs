use http::header::{AUTHORIZATION, COOKIE};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Headers whose values must never reach the legacy runtime.
static REDACTED_HEADERS: [HeaderName; 2] = [COOKIE, AUTHORIZATION];

/// Returns a copy of `raw` with secret-bearing header values blanked.
///
/// A present `cookie` or `authorization` header keeps its name but carries a
/// single empty value, so scripts can still tell it was sent. Repeated
/// occurrences collapse into that one empty value.
pub fn sanitize_headers(raw: &HeaderMap) -> HeaderMap {
    let mut out = raw.clone();

    for name in &REDACTED_HEADERS {
        if out.contains_key(name) {
            out.insert(name.clone(), HeaderValue::from_static(""));
        }
    }

    out
}
