//! String-keyed event bus.
//!
//! Listeners for a given event name fire in subscription order. The
//! navigator consults `has_listeners` for the pre-render lifecycle event to
//! decide whether to perform the default render at all, so registering a
//! listener is itself meaningful even if the listener does nothing.

use crate::cache::PageContent;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Prefix for per-pattern route-matched events; the full event name is the
/// prefix concatenated with the pattern string, e.g. `route:/users/:id`.
pub const ROUTE_EVENT_PREFIX: &str = "route:";

/// Generic pre-render lifecycle event. Any listener here takes full
/// responsibility for rendering.
pub const EVENT_NAVIGATE: &str = "navigate";

/// Emitted when a background prefetch populated the cache.
pub const EVENT_PREFETCH_LOADED: &str = "prefetch:loaded";

/// Emitted when a background prefetch failed. Nothing is cached.
pub const EVENT_PREFETCH_ERROR: &str = "prefetch:error";

/// Payload handed to every listener.
#[derive(Debug, Clone, Default)]
pub struct EventPayload {
    /// The original (non-normalized) navigation target.
    pub url: String,

    /// The page content at the time of emission.
    pub content: PageContent,

    /// Route parameters for `route:` events; empty otherwise.
    pub params: HashMap<String, String>,
}

pub type Listener = Arc<dyn Fn(&EventPayload) + Send + Sync>;

/// Instance-scoped listener registry. Each engine owns its own bus; nothing
/// here is process-wide.
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<HashMap<String, Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for an event name. Multiple listeners per name
    /// are allowed and fire in subscription order.
    pub fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .expect("event bus lock poisoned")
            .entry(event.to_string())
            .or_default()
            .push(Arc::new(listener));
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.listeners
            .lock()
            .expect("event bus lock poisoned")
            .get(event)
            .is_some_and(|l| !l.is_empty())
    }

    /// Dispatches to the listeners registered at the moment of the call.
    ///
    /// The registry lock is only held to snapshot the listener list, never
    /// while a listener runs, so a listener may freely call `on`, `emit`, or
    /// `has_listeners` on the same bus. A listener registered during dispatch
    /// fires on the next emission, not this one.
    pub fn emit(&self, event: &str, payload: &EventPayload) {
        let snapshot: Vec<Listener> = {
            let listeners = self.listeners.lock().expect("event bus lock poisoned");
            match listeners.get(event) {
                Some(registered) => registered.iter().map(Arc::clone).collect(),
                None => return,
            }
        };

        for listener in snapshot {
            listener(payload);
        }
    }
}
