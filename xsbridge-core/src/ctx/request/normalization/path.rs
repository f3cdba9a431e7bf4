use crate::ctx::request::normalization::ScriptPath;

/// Splits a raw URL path into the legacy script path and its query path.
///
/// The query string is dropped first. The script marker (e.g. `.xsjs`) is
/// searched left to right; the first occurrence that has at least one
/// character before it and ends the path or is followed by `/` wins.
///
/// - `/app/service.xsjs/orders?id=1` gives `/app/service.xsjs` and `orders`
/// - `/app/service.xsjs?id=1` gives `/app/service.xsjs` and an empty query path
/// - `/static/image.png` has no marker and is returned unchanged
pub fn normalize_script_path(raw: &str, marker: &str) -> ScriptPath {
    let without_query = match raw.find('?') {
        Some(idx) => &raw[..idx],
        None => raw,
    };

    match find_marker_end(without_query, marker) {
        Some(end) => ScriptPath {
            path: without_query[..end].to_string(),
            query_path: query_path_after(without_query, end),
        },
        None => ScriptPath {
            path: raw.to_string(),
            query_path: String::new(),
        },
    }
}

/// Byte offset just past the first qualifying marker occurrence.
fn find_marker_end(path: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }

    path.match_indices(marker).find_map(|(start, m)| {
        let end = start + m.len();
        let terminated = end == path.len() || path[end..].starts_with('/');
        (start > 0 && terminated).then_some(end)
    })
}

/// Everything after the separator that follows the marker.
fn query_path_after(path: &str, marker_end: usize) -> String {
    path[marker_end..]
        .strip_prefix('/')
        .unwrap_or_default()
        .to_string()
}
