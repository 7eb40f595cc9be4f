//! Application settings with per-field defaults.
//!
//! Every field falls back to its default when missing, so partial JSON files
//! (or an empty `{}`) are valid configs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How long the success notice stays visible before the wizard closes.
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,
    /// Prefix for every key written to the key-value store.
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Shown in the submission notice.
    #[serde(default = "default_review_window")]
    pub review_window: String,
}

fn default_close_delay_ms() -> u64 {
    1500
}

fn default_storage_prefix() -> String {
    "nanofi.".to_string()
}

fn default_min_password_len() -> usize {
    6
}

fn default_review_window() -> String {
    "3-5 business days".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: default_close_delay_ms(),
            storage_prefix: default_storage_prefix(),
            min_password_len: default_min_password_len(),
            review_window: default_review_window(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Loads `path` when it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn storage_key(&self, name: &str) -> String {
        format!("{}{}", self.storage_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = AppConfig::from_json("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.close_delay(), Duration::from_millis(1500));
        assert_eq!(cfg.storage_key("session"), "nanofi.session");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = AppConfig::from_json(r#"{ "close_delay_ms": 250, "storage_prefix": "t." }"#)
            .unwrap();
        assert_eq!(cfg.close_delay_ms, 250);
        assert_eq!(cfg.storage_prefix, "t.");
        assert_eq!(cfg.min_password_len, 6);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            AppConfig::from_json("{ close_delay_ms: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_or_default(&dir.path().join("config.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
