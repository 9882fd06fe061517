//! Route pattern matching.
//!
//! Patterns are plain paths with two special segment forms: `:name` binds
//! the URL segment at that position, and a trailing `*` captures every
//! remaining segment. Matching is all-or-nothing; a failing segment aborts
//! with no partial parameters.

use crate::path::normalize;
use std::collections::HashMap;

/// Reserved parameter key holding the decoded remainder of the path matched
/// by a trailing `*` pattern segment, rejoined with `/`.
pub const WILDCARD_KEY: &str = "*";

/// Matches a URL against a route pattern, producing the captured parameters.
///
/// Both the pattern and the URL are normalized before segment comparison,
/// so `/about` matches `/about/index.html` and a pattern authored as
/// `/about.html` behaves identically to `/about`.
///
/// Captured parameter values (and the wildcard remainder) are
/// percent-decoded; a segment with an invalid escape sequence is kept
/// verbatim.
///
/// # Examples
///
/// ```
/// use asterism_router::{match_path, WILDCARD_KEY};
///
/// let params = match_path("/users/:id", "/users/42").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
///
/// let params = match_path("/files/*", "/files/a/b%2Fc").unwrap();
/// assert_eq!(params.get(WILDCARD_KEY), Some(&"a/b/c".to_string()));
///
/// assert!(match_path("/users/:id", "/users/").is_none());
/// ```
pub fn match_path(pattern: &str, url: &str) -> Option<HashMap<String, String>> {
    let pattern = normalize(pattern);
    let url = normalize(url);

    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let url_segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();

    let has_wildcard = pattern_segments.last() == Some(&WILDCARD_KEY);

    if has_wildcard {
        // The wildcard itself may capture zero segments.
        if url_segments.len() + 1 < pattern_segments.len() {
            return None;
        }
    } else if pattern_segments.len() != url_segments.len() {
        return None;
    }

    let paired = if has_wildcard {
        pattern_segments.len() - 1
    } else {
        pattern_segments.len()
    };

    let mut params = HashMap::new();

    for i in 0..paired {
        let pattern_seg = pattern_segments[i];
        if let Some(name) = pattern_seg.strip_prefix(':') {
            let value = decode_segment(url_segments[i]);
            if value.is_empty() {
                return None;
            }
            params.insert(name.to_string(), value);
        } else if pattern_seg != url_segments[i] {
            return None;
        }
    }

    if has_wildcard {
        let remainder: Vec<String> = url_segments[paired..]
            .iter()
            .map(|s| decode_segment(s))
            .collect();
        params.insert(WILDCARD_KEY.to_string(), remainder.join("/"));
    }

    Some(params)
}

fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}
