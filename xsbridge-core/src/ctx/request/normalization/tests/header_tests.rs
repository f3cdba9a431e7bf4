use crate::ctx::request::normalization::sanitize_headers;
use crate::ctx::request::normalization::tests::test_helpers::input_to_header_map;
use pretty_assertions::assert_eq;

fn assert_sanitized(input: &[(&str, &str)], expected: &[(&str, &str)]) {
    // Arrange
    let raw = input_to_header_map(input);

    // Act
    let out = sanitize_headers(&raw);

    // Assert
    assert_eq!(out.len(), expected.len());
    for (k, v) in expected {
        assert_eq!(out.get(*k).unwrap(), v);
    }
}

//-----------------------------------------------------------------------------
// Redaction
//-----------------------------------------------------------------------------
#[test]
fn blanks_cookie_header() {
    assert_sanitized(
        &[("cookie", "session=abc123"), ("accept", "text/html")],
        &[("cookie", ""), ("accept", "text/html")],
    );
}

#[test]
fn blanks_authorization_header() {
    assert_sanitized(
        &[("authorization", "Bearer secret-token")],
        &[("authorization", "")],
    );
}

#[test]
fn collapses_repeated_cookie_headers_into_one_empty_value() {
    // Arrange
    let raw = input_to_header_map(&[("cookie", "a=1"), ("cookie", "b=2")]);

    // Act
    let out = sanitize_headers(&raw);

    // Assert
    let values: Vec<_> = out.get_all("cookie").iter().collect();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0], "");
}

#[test]
fn redaction_is_case_insensitive() {
    assert_sanitized(&[("Authorization", "Basic Zm9vOmJhcg==")], &[("authorization", "")]);
}

//-----------------------------------------------------------------------------
// Pass-through
//-----------------------------------------------------------------------------
#[test]
fn absent_secret_headers_are_not_added() {
    assert_sanitized(
        &[("content-type", "text/plain")],
        &[("content-type", "text/plain")],
    );
}

#[test]
fn source_map_is_left_untouched() {
    // Arrange
    let raw = input_to_header_map(&[("cookie", "session=abc123")]);

    // Act
    let _ = sanitize_headers(&raw);

    // Assert
    assert_eq!(raw.get("cookie").unwrap(), "session=abc123");
}
