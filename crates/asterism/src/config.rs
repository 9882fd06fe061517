// File: src/config.rs
// Purpose: Engine configuration, loadable from asterism.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NavigatorConfig {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub prefetch: PrefetchConfig,
}

/// Routing and rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Selector for the content container the default render swaps
    /// (default: "#app").
    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    /// When set, a non-root navigation target lacking this extension has it
    /// appended before route matching (e.g. ".html"). `None` disables the
    /// policy.
    #[serde(default)]
    pub append_extension: Option<String>,
}

/// Hover-prefetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefetchConfig {
    /// Whether hover prefetch starts enabled (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Hover dwell time before a prefetch fires, in milliseconds
    /// (default: 65). Zero fires immediately on hover-enter.
    #[serde(default = "default_prefetch_delay_ms")]
    pub delay_ms: u64,
}

impl NavigatorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            content_selector: default_content_selector(),
            append_extension: None,
        }
    }
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            delay_ms: default_prefetch_delay_ms(),
        }
    }
}

fn default_content_selector() -> String {
    "#app".to_string()
}

fn default_true() -> bool {
    true
}

fn default_prefetch_delay_ms() -> u64 {
    65
}
