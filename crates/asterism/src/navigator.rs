//! Navigation orchestration.
//!
//! `navigate` sequences one navigation end to end: normalize the target,
//! resolve content through the cache, run every matching route handler in
//! registration order, emit events, render (unless a lifecycle listener has
//! claimed rendering), and update history. Handlers run strictly one at a
//! time, so a later handler always observes the overlays of earlier ones.

use crate::cache::{CacheInfo, PageCache, PageContent};
use crate::config::NavigatorConfig;
use crate::dom::{DomGateway, HistoryWriter};
use crate::events::{EventBus, EventPayload, EVENT_NAVIGATE, ROUTE_EVENT_PREFIX};
use crate::extract::HtmlExtractor;
use crate::fetch::{engine_headers, Fetcher};
use crate::prefetch::PrefetchScheduler;
use anyhow::Result;
use asterism_router::match_path;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a route handler decided about the page content.
///
/// Overlays accumulate across handlers: `Body` replaces the body wholesale,
/// `Patch` shallow-merges the fields it carries, `Unchanged` leaves the
/// content as the previous handler (or the fetch) produced it.
pub enum HandlerOutcome {
    Unchanged,
    Body(String),
    Patch(ContentPatch),
}

/// Partial content overlay returned by a handler.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Context handed to a route handler: the original navigation target, the
/// content as of this point in the handler chain, and the matched params.
#[derive(Debug, Clone)]
pub struct RouteContext {
    pub url: String,
    pub content: PageContent,
    pub params: HashMap<String, String>,
}

pub type RouteHandler =
    Box<dyn Fn(RouteContext) -> BoxFuture<'static, Result<HandlerOutcome>> + Send + Sync>;

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

/// The navigation engine.
///
/// Owns the route registry, the page cache, and the event bus; everything
/// browser-shaped is injected behind the collaborator traits. Each
/// `Navigator` is an independent instance; no state is process-wide.
pub struct Navigator {
    routes: Vec<(String, RouteHandler)>,
    cache: PageCache,
    events: Arc<EventBus>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn HtmlExtractor>,
    dom: Arc<dyn DomGateway>,
    history: Arc<dyn HistoryWriter>,
    config: NavigatorConfig,
}

impl Navigator {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn HtmlExtractor>,
        dom: Arc<dyn DomGateway>,
        history: Arc<dyn HistoryWriter>,
        config: NavigatorConfig,
    ) -> Self {
        Self {
            routes: Vec::new(),
            cache: PageCache::new(),
            events: Arc::new(EventBus::new()),
            fetcher,
            extractor,
            dom,
            history,
            config,
        }
    }

    /// Registers a route handler for a pattern.
    ///
    /// Patterns are kept in registration order and every matching pattern
    /// fires on navigation. Re-registering an existing pattern replaces its
    /// handler in place, keeping the original position.
    pub fn register_route<F, Fut>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HandlerOutcome>> + Send + 'static,
    {
        let boxed: RouteHandler = Box::new(move |ctx| Box::pin(handler(ctx)));
        if let Some(slot) = self.routes.iter_mut().find(|(p, _)| p == pattern) {
            slot.1 = boxed;
        } else {
            self.routes.push((pattern.to_string(), boxed));
        }
    }

    /// Subscribes a listener to an event name. See [`crate::events`] for
    /// the event names this engine emits.
    pub fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        self.events.on(event, listener);
    }

    /// Handle to the shared page cache.
    pub fn cache(&self) -> PageCache {
        self.cache.clone()
    }

    /// Handle to the shared event bus.
    pub fn events(&self) -> Arc<EventBus> {
        Arc::clone(&self.events)
    }

    /// Builds a hover-prefetch scheduler wired to this navigator's cache,
    /// fetcher, and event bus.
    pub fn prefetcher(&self) -> PrefetchScheduler {
        PrefetchScheduler::new(
            self.cache.clone(),
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            Arc::clone(&self.events),
            &self.config.prefetch,
            self.config.routing.content_selector.clone(),
        )
    }

    /// Removes a single cached page, or empties the whole cache when no
    /// URL is given.
    pub async fn clear_cache(&self, url: Option<&str>) {
        match url {
            Some(url) => self.cache.delete(url).await,
            None => self.cache.clear().await,
        }
    }

    pub async fn cache_info(&self) -> CacheInfo {
        self.cache.info().await
    }

    /// Navigates to a URL.
    ///
    /// Always resolves to rendered content: a fetch failure degrades to a
    /// synthesized error page rather than aborting. A failing route handler,
    /// by contrast, propagates out of this call; neither the render nor the
    /// history update happens in that case.
    pub async fn navigate(&self, url: &str, options: NavigateOptions) -> Result<PageContent> {
        let target = self.match_target(url);
        let mut content = self.load_page(url).await;

        for (pattern, handler) in &self.routes {
            let Some(params) = match_path(pattern, &target) else {
                continue;
            };

            let ctx = RouteContext {
                url: url.to_string(),
                content: content.clone(),
                params: params.clone(),
            };

            match handler(ctx).await? {
                HandlerOutcome::Unchanged => {}
                HandlerOutcome::Body(body) => content.body = body,
                HandlerOutcome::Patch(patch) => {
                    if let Some(title) = patch.title {
                        content.title = title;
                    }
                    if let Some(body) = patch.body {
                        content.body = body;
                    }
                }
            }

            self.events.emit(
                &format!("{ROUTE_EVENT_PREFIX}{pattern}"),
                &EventPayload {
                    url: url.to_string(),
                    content: content.clone(),
                    params,
                },
            );
        }

        if self.events.has_listeners(EVENT_NAVIGATE) {
            // A lifecycle listener takes full responsibility for rendering.
            self.events.emit(
                EVENT_NAVIGATE,
                &EventPayload {
                    url: url.to_string(),
                    content: content.clone(),
                    params: HashMap::new(),
                },
            );
        } else {
            if !content.title.is_empty() {
                self.dom.set_title(&content.title);
            }
            let swapped = self
                .dom
                .swap_body(&self.config.routing.content_selector, &content.body)
                .await;
            if !swapped {
                tracing::debug!(
                    selector = %self.config.routing.content_selector,
                    "no content container, render skipped"
                );
            }
        }

        if options.replace {
            self.history.replace(&content.title, url);
        } else {
            self.history.push(&content.title, url);
        }

        Ok(content)
    }

    /// Normalizes a navigation target for route matching only: strips the
    /// query and fragment, then applies the append-extension policy when
    /// one is configured. Distinct from the generic path normalization the
    /// matcher itself performs on both sides.
    fn match_target(&self, url: &str) -> String {
        let path = match url.find(['?', '#']) {
            Some(i) => &url[..i],
            None => url,
        };

        if let Some(ext) = &self.config.routing.append_extension {
            if !path.is_empty() && path != "/" && !path.ends_with(ext.as_str()) {
                return format!("{path}{ext}");
            }
        }

        path.to_string()
    }

    /// Lookaside content resolution: cache hit, or fetch-extract-cache.
    ///
    /// A failed fetch synthesizes an error page and caches it under the
    /// same key, so repeat navigation to a broken URL does not re-fetch.
    async fn load_page(&self, url: &str) -> PageContent {
        if let Some(content) = self.cache.get(url).await {
            return content;
        }

        let content = match self.fetcher.fetch(url, &engine_headers(false)).await {
            Ok(raw) => self
                .extractor
                .extract(&raw, &self.config.routing.content_selector),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "navigation fetch failed, rendering error page");
                PageContent::new("Error", format!("<p>Failed to load {url}: {err}</p>"))
            }
        };

        self.cache.set(url, content.clone()).await;
        content
    }
}
