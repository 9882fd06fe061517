//! Fetch collaborator seam.
//!
//! The engine never talks to a transport directly; it goes through the
//! [`Fetcher`] trait so tests (and non-browser hosts) can supply their own.

use async_trait::async_trait;
use std::collections::HashMap;

/// Identification header sent with every request the engine issues.
pub const ENGINE_HEADER: &str = "x-asterism";

/// Marker header added to background prefetch requests so servers can apply
/// different caching or priority treatment.
pub const PURPOSE_HEADER: &str = "x-purpose";

/// Value of [`PURPOSE_HEADER`] on prefetch requests.
pub const PURPOSE_PREFETCH: &str = "prefetch";

/// Errors a fetch collaborator can report.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The transport failed before a response was produced.
    #[error("transport error fetching {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

/// HTTP transport collaborator.
///
/// Given a URL and request headers, returns the raw response text or fails
/// with a [`FetchError`]. Timeout behavior is entirely the implementation's;
/// the engine imposes none of its own and never cancels an in-flight fetch.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<String, FetchError>;
}

/// Base headers for a request issued by this engine.
pub(crate) fn engine_headers(prefetch: bool) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        ENGINE_HEADER.to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    if prefetch {
        headers.insert(PURPOSE_HEADER.to_string(), PURPOSE_PREFETCH.to_string());
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_headers_tag_prefetch_requests() {
        let plain = engine_headers(false);
        assert!(plain.contains_key(ENGINE_HEADER));
        assert!(!plain.contains_key(PURPOSE_HEADER));

        let prefetch = engine_headers(true);
        assert_eq!(
            prefetch.get(PURPOSE_HEADER).map(String::as_str),
            Some(PURPOSE_PREFETCH)
        );
    }
}
