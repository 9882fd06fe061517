//! Browser-facing collaborator seams.
//!
//! The engine itself never touches a document, a window, or a history
//! object. Everything it needs from a browsing context is expressed as one
//! of the narrow traits here, so the orchestrator is fully testable against
//! fakes.

use async_trait::async_trait;

/// Render target collaborator.
///
/// Implementations own the messy parts of swapping a page in place:
/// locating the container, replacing its inner markup, and re-creating any
/// `<script>` elements inside it so they execute again: external scripts
/// awaited one at a time in document order (a load failure resolves rather
/// than blocking the rest), inline scripts installed synchronously with
/// their attributes preserved.
#[async_trait]
pub trait DomGateway: Send + Sync {
    /// Sets the document title.
    fn set_title(&self, title: &str);

    /// Replaces the inner markup of the first element matching `selector`
    /// and re-runs the scripts within it. Returns `false` when no container
    /// matches; the caller treats that as a silent skip.
    async fn swap_body(&self, selector: &str, html: &str) -> bool;
}

/// History collaborator: pushes or replaces the browser history entry for
/// a finished navigation.
pub trait HistoryWriter: Send + Sync {
    fn push(&self, title: &str, url: &str);
    fn replace(&self, title: &str, url: &str);
}

/// Facts about a hovered link, as observed by the DOM-side trigger wiring.
///
/// The trigger collaborator fills this in from the anchor's attributes and
/// origin; the prefetch scheduler only applies the policy.
#[derive(Debug, Clone)]
pub struct LinkTarget {
    /// The link's href, as written (non-normalized).
    pub href: String,

    /// Whether the link points at the current origin.
    pub same_origin: bool,

    /// Whether the link carries the per-link prefetch opt-out marker.
    pub opted_out: bool,

    /// `target="_blank"` or equivalent.
    pub opens_new_tab: bool,

    /// The link carries a `download` attribute.
    pub is_download: bool,

    /// The link is rel-marked external (`rel="external"`, `noopener` on an
    /// outbound link, etc.).
    pub has_external_rel: bool,
}

impl LinkTarget {
    /// A plain same-origin link with no exclusions; tests and trigger
    /// wiring adjust fields from here.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            same_origin: true,
            opted_out: false,
            opens_new_tab: false,
            is_download: false,
            has_external_rel: false,
        }
    }

    /// Whether hover prefetch may consider this link at all.
    pub fn prefetchable(&self) -> bool {
        self.same_origin
            && !self.opted_out
            && !self.opens_new_tab
            && !self.is_download
            && !self.has_external_rel
    }
}
