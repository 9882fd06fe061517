//! Hover-triggered prefetch scheduling.
//!
//! Per hovered link the scheduler runs a small state machine:
//! `Idle -> Scheduled -> {Fired | Cancelled}`. A hover-enter on an eligible
//! link schedules a cancellable timer (or fires immediately at zero delay);
//! hover-leave before the timer fires cancels it; disabling the scheduler
//! cancels everything pending at once.
//!
//! A fired timer detaches the actual fetch into a fresh task before
//! touching the network, so cancellation can only ever stop a timer;
//! an in-flight fetch is never aborted.

use crate::cache::{PageCache, PageContent};
use crate::config::PrefetchConfig;
use crate::dom::LinkTarget;
use crate::events::{EventBus, EventPayload, EVENT_PREFETCH_ERROR, EVENT_PREFETCH_LOADED};
use crate::extract::HtmlExtractor;
use crate::fetch::{engine_headers, Fetcher};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

struct SchedulerState {
    enabled: AtomicBool,
    pending: Mutex<HashMap<String, JoinHandle<()>>>,
}

/// Decides, per hover interaction, whether and when to warm the page cache.
///
/// Shares the cache (and event bus) with the navigator, so a prefetch that
/// completes before an explicit navigation turns that navigation into a
/// cache hit.
#[derive(Clone)]
pub struct PrefetchScheduler {
    cache: PageCache,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn HtmlExtractor>,
    events: Arc<EventBus>,
    delay: Duration,
    content_selector: String,
    state: Arc<SchedulerState>,
}

impl PrefetchScheduler {
    pub fn new(
        cache: PageCache,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn HtmlExtractor>,
        events: Arc<EventBus>,
        config: &PrefetchConfig,
        content_selector: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            extractor,
            events,
            delay: Duration::from_millis(config.delay_ms),
            content_selector: content_selector.into(),
            state: Arc::new(SchedulerState {
                enabled: AtomicBool::new(config.enabled),
                pending: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Handles a hover-enter on a link. Ineligible links and hovers while
    /// disabled are ignored.
    pub fn on_hover_enter(&self, link_id: &str, target: &LinkTarget) {
        if !self.state.enabled.load(Ordering::SeqCst) || !target.prefetchable() {
            return;
        }

        let url = target.href.clone();

        if self.delay.is_zero() {
            // Straight to Fired.
            tokio::spawn(run_prefetch(
                self.cache.clone(),
                Arc::clone(&self.fetcher),
                Arc::clone(&self.extractor),
                Arc::clone(&self.events),
                self.content_selector.clone(),
                url,
            ));
            return;
        }

        let scheduler = self.clone();
        let delay = self.delay;
        let id = link_id.to_string();
        let timer_id = id.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // Drop our own bookkeeping entry, then detach the fetch so a
            // late hover-leave can no longer reach it.
            scheduler
                .state
                .pending
                .lock()
                .expect("prefetch pending lock poisoned")
                .remove(&timer_id);

            tokio::spawn(run_prefetch(
                scheduler.cache.clone(),
                Arc::clone(&scheduler.fetcher),
                Arc::clone(&scheduler.extractor),
                Arc::clone(&scheduler.events),
                scheduler.content_selector.clone(),
                url,
            ));
        });

        // A re-enter without a leave replaces (and cancels) the old timer.
        if let Some(old) = self
            .state
            .pending
            .lock()
            .expect("prefetch pending lock poisoned")
            .insert(id, handle)
        {
            old.abort();
        }
    }

    /// Handles a hover-leave: a still-scheduled timer for this link is
    /// cancelled and no fetch occurs.
    pub fn on_hover_leave(&self, link_id: &str) {
        let handle = self
            .state
            .pending
            .lock()
            .expect("prefetch pending lock poisoned")
            .remove(link_id);
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    /// Enables or disables hover prefetch. Disabling cancels every pending
    /// timer across all links; hovers arriving while disabled are ignored.
    pub fn set_enabled(&self, enabled: bool) {
        self.state.enabled.store(enabled, Ordering::SeqCst);
        if !enabled {
            let drained: Vec<JoinHandle<()>> = {
                let mut pending = self
                    .state
                    .pending
                    .lock()
                    .expect("prefetch pending lock poisoned");
                pending.drain().map(|(_, handle)| handle).collect()
            };
            for handle in drained {
                handle.abort();
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::SeqCst)
    }

    /// Number of links with a scheduled-but-not-yet-fired timer.
    pub fn pending_count(&self) -> usize {
        self.state
            .pending
            .lock()
            .expect("prefetch pending lock poisoned")
            .len()
    }
}

/// The prefetch operation itself: best-effort cache warm-up.
///
/// A cache hit is a no-op. A failure emits [`EVENT_PREFETCH_ERROR`] and
/// writes nothing, so a broken prefetch never poisons the cache for a later
/// real navigation.
async fn run_prefetch(
    cache: PageCache,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn HtmlExtractor>,
    events: Arc<EventBus>,
    content_selector: String,
    url: String,
) {
    if cache.contains(&url).await {
        return;
    }

    match fetcher.fetch(&url, &engine_headers(true)).await {
        Ok(raw) => {
            let content = extractor.extract(&raw, &content_selector);
            cache.set(&url, content.clone()).await;
            events.emit(
                EVENT_PREFETCH_LOADED,
                &EventPayload {
                    url,
                    content,
                    params: HashMap::new(),
                },
            );
        }
        Err(err) => {
            tracing::debug!(url = %url, error = %err, "prefetch failed");
            events.emit(
                EVENT_PREFETCH_ERROR,
                &EventPayload {
                    url,
                    content: PageContent::default(),
                    params: HashMap::new(),
                },
            );
        }
    }
}
