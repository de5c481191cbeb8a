//! Configuration file handling
//!
//! All log endpoints and timing defaults are injected configuration; nothing
//! is hard-coded at call sites. Values can be overridden per-call from the
//! CLI or a scenario file.

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Log resource endpoints
    #[serde(default)]
    pub log: LogConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Validation timing defaults
    #[serde(default)]
    pub validation: ValidationDefaults,
}

/// Log resource endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// URL serving the current console log (HTTP GET)
    #[serde(default = "default_log_url")]
    pub url: String,

    /// URL accepting the log reset (HTTP DELETE). Defaults to `url`.
    #[serde(default)]
    pub reset_url: Option<String>,
}

impl LogConfig {
    /// The effective reset endpoint
    pub fn reset_url(&self) -> &str {
        self.reset_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            url: default_log_url(),
            reset_url: None,
        }
    }
}

fn default_log_url() -> String {
    // Console log exposed by the instrumented device over local port forwarding
    "http://localhost:8080/consolelog/logs.txt".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Timeout for the log fetch request
    #[serde(default = "default_fetch")]
    pub fetch_secs: u64,

    /// Timeout for the log reset request
    #[serde(default = "default_reset")]
    pub reset_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            fetch_secs: default_fetch(),
            reset_secs: default_reset(),
        }
    }
}

fn default_fetch() -> u64 {
    30
}
fn default_reset() -> u64 {
    30
}

/// Validation timing defaults
#[derive(Debug, Deserialize)]
pub struct ValidationDefaults {
    /// Seconds to wait before the first fetch, so out-of-process
    /// instrumentation has time to flush (empirically 5-10s)
    #[serde(default = "default_settle")]
    pub settle_secs: f64,

    /// Poll interval in seconds when bounded polling is requested
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: f64,

    /// Maximum seconds to keep polling before giving up with a FAILED verdict
    #[serde(default = "default_max_wait")]
    pub max_wait_secs: f64,
}

impl Default for ValidationDefaults {
    fn default() -> Self {
        Self {
            settle_secs: default_settle(),
            poll_interval_secs: default_poll_interval(),
            max_wait_secs: default_max_wait(),
        }
    }
}

fn default_settle() -> f64 {
    5.0
}
fn default_poll_interval() -> f64 {
    2.0
}
fn default_max_wait() -> f64 {
    30.0
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log.url, "http://localhost:8080/consolelog/logs.txt");
        assert_eq!(config.log.reset_url(), config.log.url);
        assert_eq!(config.timeouts.fetch_secs, 30);
        assert_eq!(config.validation.settle_secs, 5.0);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [log]
            url = "http://10.0.0.5:8080/consolelog/logs.txt"

            [validation]
            settle_secs = 8.5
            "#,
        )
        .unwrap();

        assert_eq!(config.log.url, "http://10.0.0.5:8080/consolelog/logs.txt");
        assert_eq!(config.log.reset_url(), config.log.url);
        assert_eq!(config.validation.settle_secs, 8.5);
        // Untouched sections keep their defaults
        assert_eq!(config.timeouts.reset_secs, 30);
    }

    #[test]
    fn test_separate_reset_url() {
        let config: Config = toml::from_str(
            r#"
            [log]
            url = "http://localhost:8080/consolelog/logs.txt"
            reset_url = "http://localhost:8080/consolelog/reset"
            "#,
        )
        .unwrap();

        assert_eq!(config.log.reset_url(), "http://localhost:8080/consolelog/reset");
    }
}
