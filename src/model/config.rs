use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base URL used when config.toml does not set one
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Configuration from config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout. Absent = wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: default_api_url(),
            request_timeout_secs: None,
            ui: UiConfig::default(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Quiet period after the last search keystroke before the list reloads
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Hex overrides for theme colors, keyed by theme field name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            search_debounce_ms: default_search_debounce_ms(),
            colors: HashMap::new(),
        }
    }
}

fn default_search_debounce_ms() -> u64 {
    300
}
