//! Log resource access
//!
//! The console log of the instrumented application is an append-only byte
//! buffer owned by an external process and exposed over HTTP. The harness
//! has read and reset access only; it never appends. The resource is always
//! passed in explicitly so scanner and engine logic can be unit tested
//! against an in-memory fake.

mod http;
mod memory;

pub use http::HttpLogResource;
pub use memory::MemoryLog;

use thiserror::Error;

/// Failure retrieving the log content
///
/// Never to be interpreted as "marker absent" - a fetch failure means the
/// validation was inconclusive, not that the product failed to emit spans.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("log fetch request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("log fetch returned status {0}")]
    Status(u16),

    #[error("log resource unavailable: {0}")]
    Unavailable(String),
}

/// Failure resetting (truncating) the log content
#[derive(Error, Debug)]
pub enum ResetError {
    #[error("log reset request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("log reset returned status {0}")]
    Status(u16),

    #[error("log reset not acknowledged: expected body 'true', got {body:?}")]
    Unacknowledged { body: String },

    #[error("log resource unavailable: {0}")]
    Unavailable(String),
}

/// Read + reset handle to the shared console log
///
/// `fetch` is idempotent and side-effect free; `reset` truncates the log but
/// leaves the endpoint alive for the rest of the test run.
pub trait LogResource {
    /// Retrieve the complete current byte content of the log
    fn fetch(&self) -> Result<Vec<u8>, FetchError>;

    /// Truncate the log to empty
    fn reset(&self) -> Result<(), ResetError>;
}

impl<T: LogResource + ?Sized> LogResource for &T {
    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        (**self).fetch()
    }

    fn reset(&self) -> Result<(), ResetError> {
        (**self).reset()
    }
}
