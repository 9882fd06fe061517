// Asterism - client-side navigation engine
// Route matching, lookaside page cache, hover prefetch, render orchestration

pub mod cache;
pub mod config;
pub mod dom;
pub mod events;
pub mod extract;
pub mod fetch;
pub mod navigator;
pub mod prefetch;

// Re-export core types
pub use cache::{CacheInfo, PageCache, PageContent};
pub use config::{NavigatorConfig, PrefetchConfig, RoutingConfig};
pub use dom::{DomGateway, HistoryWriter, LinkTarget};
pub use events::{
    EventBus, EventPayload, EVENT_NAVIGATE, EVENT_PREFETCH_ERROR, EVENT_PREFETCH_LOADED,
    ROUTE_EVENT_PREFIX,
};
pub use extract::{FragmentExtractor, HtmlExtractor};
pub use fetch::{FetchError, Fetcher, ENGINE_HEADER, PURPOSE_HEADER, PURPOSE_PREFETCH};
pub use navigator::{
    ContentPatch, HandlerOutcome, NavigateOptions, Navigator, RouteContext, RouteHandler,
};
pub use prefetch::PrefetchScheduler;

// Re-export the path resolver
pub use asterism_router::{is_normalized, match_path, normalize, WILDCARD_KEY};
