//! Shared test fakes for the collaborator traits.
//!
//! The engine treats the browser as injected collaborators, so a fake per
//! trait is all the tests need: a programmable fetcher, a recording DOM,
//! and a recording history writer.

#![allow(dead_code)]

use anyhow::Result;
use asterism::{
    DomGateway, FetchError, Fetcher, FragmentExtractor, HistoryWriter, Navigator, NavigatorConfig,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Builds a full HTML document with the standard `#app` container.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{title}</title></head><body><div id=\"app\">{body}</div></body></html>"
    )
}

/// Programmable fetch collaborator: responds per URL, records every call.
#[derive(Default)]
pub struct FakeFetcher {
    responses: Mutex<HashMap<String, Result<String, String>>>,
    calls: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, html: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(html.into()));
    }

    pub fn fail(&self, url: &str, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(reason.to_string()));
    }

    pub fn calls(&self) -> Vec<(String, HashMap<String, String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .count()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<String, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone()));

        match self.responses.lock().unwrap().get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(reason)) => Err(FetchError::Transport {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Recording DOM collaborator.
pub struct RecordingDom {
    pub container_present: AtomicBool,
    titles: Mutex<Vec<String>>,
    swaps: Mutex<Vec<(String, String)>>,
}

impl Default for RecordingDom {
    fn default() -> Self {
        Self {
            container_present: AtomicBool::new(true),
            titles: Mutex::new(Vec::new()),
            swaps: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_container() -> Self {
        let dom = Self::default();
        dom.container_present.store(false, Ordering::SeqCst);
        dom
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    pub fn swaps(&self) -> Vec<(String, String)> {
        self.swaps.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomGateway for RecordingDom {
    fn set_title(&self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }

    async fn swap_body(&self, selector: &str, html: &str) -> bool {
        if !self.container_present.load(Ordering::SeqCst) {
            return false;
        }
        self.swaps
            .lock()
            .unwrap()
            .push((selector.to_string(), html.to_string()));
        true
    }
}

/// Recording history collaborator.
#[derive(Default)]
pub struct RecordingHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub replace: bool,
    pub title: String,
    pub url: String,
}

impl RecordingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl HistoryWriter for RecordingHistory {
    fn push(&self, title: &str, url: &str) {
        self.entries.lock().unwrap().push(HistoryEntry {
            replace: false,
            title: title.to_string(),
            url: url.to_string(),
        });
    }

    fn replace(&self, title: &str, url: &str) {
        self.entries.lock().unwrap().push(HistoryEntry {
            replace: true,
            title: title.to_string(),
            url: url.to_string(),
        });
    }
}

/// Everything a test needs to drive the engine against fakes.
pub struct Harness {
    pub navigator: Navigator,
    pub fetcher: Arc<FakeFetcher>,
    pub dom: Arc<RecordingDom>,
    pub history: Arc<RecordingHistory>,
}

pub fn harness() -> Harness {
    harness_with_config(NavigatorConfig::default())
}

pub fn harness_with_config(config: NavigatorConfig) -> Harness {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let fetcher = Arc::new(FakeFetcher::new());
    let dom = Arc::new(RecordingDom::new());
    let history = Arc::new(RecordingHistory::new());

    let navigator = Navigator::new(
        Arc::clone(&fetcher) as Arc<dyn Fetcher>,
        Arc::new(FragmentExtractor::new()),
        Arc::clone(&dom) as Arc<dyn DomGateway>,
        Arc::clone(&history) as Arc<dyn HistoryWriter>,
        config,
    );

    Harness {
        navigator,
        fetcher,
        dom,
        history,
    }
}
