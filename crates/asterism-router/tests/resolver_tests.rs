//! Integration tests for asterism-router.
//!
//! Covers the normalization table, idempotence, and the matching contract
//! (params, wildcard capture, normalization symmetry).

use asterism_router::{is_normalized, match_path, normalize, WILDCARD_KEY};
use rstest::rstest;

#[rstest]
#[case("", "/")]
#[case("/", "/")]
#[case("/about", "/about")]
#[case("/about/", "/about")]
#[case("/about///", "/about")]
#[case("/about.html", "/about")]
#[case("/about.HTML", "/about")]
#[case("/docs/index", "/docs")]
#[case("/docs/index.html", "/docs")]
#[case("/docs/", "/docs")]
#[case("/index", "/")]
#[case("/index.html", "/")]
#[case("/about?tab=1", "/about")]
#[case("/about#anchor", "/about")]
#[case("/about?tab=1#anchor", "/about")]
#[case("about", "/about")]
#[case("/a/b/c/", "/a/b/c")]
#[case("/a.html.html", "/a")]
#[case("/index/index", "/")]
fn normalization_table(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize(input), expected);
}

#[rstest]
#[case("")]
#[case("/")]
#[case("/about/")]
#[case("/docs/index.html")]
#[case("/users/42?ref=home")]
#[case("nested/path/")]
#[case("/index/index")]
#[case("/a.html.html")]
#[case("/docs/index/index.html")]
fn normalize_is_idempotent(#[case] input: &str) {
    let once = normalize(input).into_owned();
    let twice = normalize(&once).into_owned();
    assert_eq!(once, twice);
    assert!(is_normalized(&once));
}

#[test]
fn docs_index_variants_collapse_to_docs() {
    assert_eq!(normalize("/docs/index.html"), "/docs");
    assert_eq!(normalize("/docs/index"), "/docs");
    assert_eq!(normalize("/docs/"), "/docs");
}

#[test]
fn param_pattern_binds_segment() {
    let params = match_path("/users/:id", "/users/42").unwrap();
    assert_eq!(params.get("id"), Some(&"42".to_string()));
    assert_eq!(params.len(), 1);
}

#[test]
fn param_pattern_rejects_missing_segment() {
    assert!(match_path("/users/:id", "/users/").is_none());
}

#[test]
fn wildcard_capture_is_decoded_and_rejoined() {
    let params = match_path("/files/*", "/files/a/b%2Fc").unwrap();
    assert_eq!(params.get(WILDCARD_KEY), Some(&"a/b/c".to_string()));
}

#[test]
fn normalization_equalizes_pattern_and_url() {
    assert!(match_path("/about", "/about/index.html").is_some());
    assert!(match_path("/about", "/about/").is_some());
    assert!(match_path("/about.html", "/about").is_some());
}

#[test]
fn mixed_literal_param_wildcard_pattern() {
    let params = match_path("/api/:version/*", "/api/v2/users/7/posts").unwrap();
    assert_eq!(params.get("version"), Some(&"v2".to_string()));
    assert_eq!(params.get(WILDCARD_KEY), Some(&"users/7/posts".to_string()));
}
