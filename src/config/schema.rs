//! Configuration schema for the REST workbench.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Client configuration.
///
/// Read from the `"rest-workbench"` settings key. Missing fields fall back to
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Origin that relative endpoint paths are resolved against.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Path (or absolute URL) of the relay endpoint.
    #[serde(default = "default_relay_path")]
    pub relay_path: String,

    /// Path (or absolute URL) of the code-generation endpoint.
    #[serde(default = "default_codegen_path")]
    pub codegen_path: String,

    /// First segment of the visible address path.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Quiet period before URL and body edits propagate, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of history entries kept. Must be > 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Language label used for snippets until the user picks one.
    #[serde(default = "default_snippet_language")]
    pub default_snippet_language: String,

    /// Directory for file-backed storage. `~/.config/rest-workbench` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            relay_path: default_relay_path(),
            codegen_path: default_codegen_path(),
            locale: default_locale(),
            debounce_ms: default_debounce_ms(),
            history_limit: default_history_limit(),
            default_snippet_language: default_snippet_language(),
            storage_dir: None,
        }
    }
}

impl ClientConfig {
    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }

        if self.locale.trim().is_empty() {
            return Err("locale must not be empty".to_string());
        }

        Url::parse(&self.origin).map_err(|e| format!("origin is not a valid URL: {}", e))?;

        if self.relay_path.is_empty() || self.codegen_path.is_empty() {
            return Err("endpoint paths must not be empty".to_string());
        }

        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Absolute URL of the relay endpoint.
    pub fn relay_endpoint(&self) -> String {
        self.resolve(&self.relay_path)
    }

    /// Absolute URL of the code-generation endpoint.
    pub fn codegen_endpoint(&self) -> String {
        self.resolve(&self.codegen_path)
    }

    fn resolve(&self, path: &str) -> String {
        if path.contains("://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_relay_path() -> String {
    "/api/proxy".to_string()
}

fn default_codegen_path() -> String {
    "/api/code-generator".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_history_limit() -> usize {
    1000
}

fn default_snippet_language() -> String {
    "cURL".to_string()
}
