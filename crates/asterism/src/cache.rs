//! Page cache and cached payload types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A fetched page fragment: the document title and the body markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// The page title (possibly empty).
    pub title: String,

    /// The HTML fragment for the content container.
    pub body: String,
}

impl PageContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Snapshot of the cache's size and key set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheInfo {
    pub size: usize,
    pub keys: Vec<String>,
}

/// Lookaside store mapping a navigation URL to its fetched page content.
///
/// Keys are the raw (non-normalized) URL strings used for fetching; route
/// matching uses a separately normalized form, so two spellings of the same
/// route may hold two entries. There is no eviction or expiry; entries live
/// until deleted by key or by `clear`.
///
/// Cloning is cheap and shares the underlying map; both the navigator and
/// the prefetch scheduler read and write the same store.
#[derive(Clone, Default)]
pub struct PageCache {
    entries: Arc<RwLock<HashMap<String, PageContent>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Option<PageContent> {
        self.entries.read().await.get(url).cloned()
    }

    pub async fn set(&self, url: &str, content: PageContent) {
        self.entries.write().await.insert(url.to_string(), content);
    }

    /// Removes a single entry. No-op when the key is absent.
    pub async fn delete(&self, url: &str) {
        self.entries.write().await.remove(url);
    }

    /// Empties the cache. No-op when already empty.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.entries.read().await.contains_key(url)
    }

    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    pub async fn info(&self) -> CacheInfo {
        let entries = self.entries.read().await;
        CacheInfo {
            size: entries.len(),
            keys: entries.keys().cloned().collect(),
        }
    }
}
