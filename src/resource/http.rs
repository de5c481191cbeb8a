//! HTTP-backed log resource
//!
//! Fetch is an HTTP GET whose 2xx body is the literal log content. Reset is
//! an HTTP DELETE that the device agent acknowledges with the body `true`;
//! anything else counts as a failed reset.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::common::config::Config;

use super::{FetchError, LogResource, ResetError};

/// Body the device agent returns for a successful log delete
const RESET_ACK: &str = "true";

/// Remote console log accessed over HTTP
pub struct HttpLogResource {
    client: Client,
    fetch_url: String,
    reset_url: String,
    fetch_timeout: Duration,
    reset_timeout: Duration,
}

impl HttpLogResource {
    /// Create a resource handle for the given endpoints
    pub fn new(fetch_url: impl Into<String>, reset_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            fetch_url: fetch_url.into(),
            reset_url: reset_url.into(),
            fetch_timeout: Duration::from_secs(30),
            reset_timeout: Duration::from_secs(30),
        }
    }

    /// Create a resource handle from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::new(),
            fetch_url: config.log.url.clone(),
            reset_url: config.log.reset_url().to_string(),
            fetch_timeout: Duration::from_secs(config.timeouts.fetch_secs),
            reset_timeout: Duration::from_secs(config.timeouts.reset_secs),
        }
    }

    /// Override the per-request timeouts
    pub fn with_timeouts(mut self, fetch: Duration, reset: Duration) -> Self {
        self.fetch_timeout = fetch;
        self.reset_timeout = reset;
        self
    }

    /// The fetch endpoint URL
    pub fn url(&self) -> &str {
        &self.fetch_url
    }
}

impl LogResource for HttpLogResource {
    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        debug!(url = %self.fetch_url, "fetching log");

        let response = self
            .client
            .get(&self.fetch_url)
            .timeout(self.fetch_timeout)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        debug!(bytes = body.len(), "log fetched");
        Ok(body.to_vec())
    }

    fn reset(&self) -> Result<(), ResetError> {
        debug!(url = %self.reset_url, "resetting log");

        let response = self
            .client
            .delete(&self.reset_url)
            .timeout(self.reset_timeout)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResetError::Status(status.as_u16()));
        }

        let body = response.text()?;
        if body != RESET_ACK {
            return Err(ResetError::Unacknowledged { body });
        }

        Ok(())
    }
}
