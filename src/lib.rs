//! spancheck - telemetry span validation harness
//!
//! Validates that an instrumented application emitted the expected telemetry
//! spans by scanning a remote console log for literal byte markers, then
//! resetting the log so the next scenario starts from a clean slate.

pub mod cli;
pub mod commands;
pub mod common;
pub mod resource;
pub mod scenario;
pub mod validate;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use resource::{FetchError, LogResource, ResetError};
pub use validate::{Marker, MarkerSet, RetryPolicy, ValidateOptions, Validator, Verdict};
