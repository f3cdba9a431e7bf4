use crate::ctx::request::normalization::{ScriptPath, normalize_script_path};
use pretty_assertions::assert_eq;

const MARKER: &str = ".xsjs";

fn assert_script_path(raw: &str, path: &str, query_path: &str) {
    // Act
    let outcome = normalize_script_path(raw, MARKER);

    // Assert
    assert_eq!(
        outcome,
        ScriptPath {
            path: path.to_string(),
            query_path: query_path.to_string(),
        }
    );
}

fn assert_unchanged(raw: &str) {
    assert_script_path(raw, raw, "");
}

//-----------------------------------------------------------------------------
// Script marker with sub-path
//-----------------------------------------------------------------------------
#[test]
fn splits_sub_path_and_drops_query() {
    assert_script_path("/app/service.xsjs/orders?id=1", "/app/service.xsjs", "orders");
}

#[test]
fn keeps_nested_sub_path() {
    assert_script_path(
        "/app/service.xsjs/orders/42/items",
        "/app/service.xsjs",
        "orders/42/items",
    );
}

#[test]
fn query_path_never_contains_query_string() {
    assert_script_path("/a/b.xsjs/x/y?z=/w", "/a/b.xsjs", "x/y");
}

#[test]
fn trailing_separator_gives_empty_query_path() {
    assert_script_path("/app/service.xsjs/", "/app/service.xsjs", "");
}

//-----------------------------------------------------------------------------
// Script marker without sub-path
//-----------------------------------------------------------------------------
#[test]
fn bare_script_path() {
    assert_script_path("/app/service.xsjs", "/app/service.xsjs", "");
}

#[test]
fn bare_script_path_drops_query() {
    assert_script_path("/app/service.xsjs?id=1&x=2", "/app/service.xsjs", "");
}

//-----------------------------------------------------------------------------
// Marker selection
//-----------------------------------------------------------------------------
#[test]
fn first_qualifying_marker_wins() {
    assert_script_path("/a.xsjs/b.xsjs/c", "/a.xsjs", "b.xsjs/c");
}

#[test]
fn marker_must_end_a_segment() {
    assert_script_path("/a.xsjsx/b.xsjs/c", "/a.xsjsx/b.xsjs", "c");
}

#[test]
fn marker_at_start_does_not_count() {
    assert_unchanged(".xsjs/orders");
}

#[test]
fn custom_marker() {
    // Act
    let outcome = normalize_script_path("/svc/main.xsodata/$metadata", ".xsodata");

    // Assert
    assert_eq!(outcome.path, "/svc/main.xsodata");
    assert_eq!(outcome.query_path, "$metadata");
}

//-----------------------------------------------------------------------------
// No marker
//-----------------------------------------------------------------------------
#[test]
fn static_path_is_unchanged() {
    assert_unchanged("/static/image.png");
}

#[test]
fn root_is_unchanged() {
    assert_unchanged("/");
}

#[test]
fn unmatched_path_keeps_query() {
    assert_unchanged("/static/image.png?v=3");
}

#[test]
fn marker_only_in_query_does_not_count() {
    assert_unchanged("/static/index.html?next=/app/service.xsjs");
}

#[test]
fn query_path_is_suffix_of_stripped_path() {
    // Arrange
    let raw = "/app/service.xsjs/orders/7?expand=lines";

    // Act
    let outcome = normalize_script_path(raw, MARKER);

    // Assert
    assert!("/app/service.xsjs/orders/7".ends_with(&outcome.query_path));
    assert!("/app/service.xsjs/orders/7".starts_with(&outcome.path));
}
