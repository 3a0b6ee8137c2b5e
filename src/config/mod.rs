//! Configuration loading.
//!
//! Settings live under the `"rest-workbench"` key of a JSON settings object.
//! The loaded [`ClientConfig`] is passed to [`crate::session::Session`]
//! explicitly; there is no process-wide configuration.

pub mod schema;

pub use schema::ClientConfig;

use serde_json::Value;
use std::path::Path;

/// Settings key holding the workbench configuration.
pub const SETTINGS_KEY: &str = "rest-workbench";

/// Loads configuration from a settings object.
///
/// Settings that fail to parse are ignored with a warning. Settings that
/// parse but fail validation are an error.
///
/// # Arguments
///
/// * `settings_json` - The host settings object, with the workbench
///   configuration under [`SETTINGS_KEY`]
///
/// # Returns
///
/// The loaded configuration, or a validation message.
///
/// # Example
///
/// ```
/// use rest_workbench::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({ "rest-workbench": { "debounceMs": 300 } });
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.debounce_ms, 300);
/// assert_eq!(config.history_limit, 1000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ClientConfig, String> {
    let mut config = ClientConfig::default();

    if let Some(settings) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<ClientConfig>(settings.clone()) {
            Ok(user_config) => config = user_config,
            Err(e) => {
                log::warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY,
                    e
                );
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    Ok(config)
}

/// Loads configuration from a JSON settings file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<ClientConfig, String> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let settings: Value = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    load_config(Some(settings))
}
