//! Error types for the span validation harness
//!
//! Infrastructure errors (the log channel itself was unreachable) are kept
//! strictly separate from content failures (markers missing from the log),
//! so CI can tell a broken harness apart from a product regression. Missing
//! markers are reported through a normal `Verdict`, never through this type.

use std::io;
use thiserror::Error;

use crate::resource::{FetchError, ResetError};

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the span validation harness
#[derive(Error, Debug)]
pub enum Error {
    // === Infrastructure Errors ===
    #[error("failed to fetch log: {0}")]
    Fetch(#[from] FetchError),

    #[error("log not confirmed clean: previous reset failed and retry failed: {source}")]
    StaleLog {
        #[source]
        source: ResetError,
    },

    #[error("failed to reset log: {0}")]
    Reset(#[from] ResetError),

    // === Scenario Errors ===
    #[error("unknown marker preset '{0}'")]
    UnknownPreset(String),

    #[error("scenario has no markers: {0}")]
    EmptyMarkerSet(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file read error with the offending path
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Whether this error means the log channel itself was unusable,
    /// as opposed to a problem in local configuration or scenario files.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Error::Fetch(_) | Error::Reset(_) | Error::StaleLog { .. }
        )
    }
}
