//! Marker scanning and verdict engine
//!
//! A `MarkerSet` lists the literal byte patterns a scenario expects to see in
//! the console log. The scanner is a pure function over fetched content; the
//! `Validator` adds the timing and lifecycle around it: settle, fetch, scan,
//! reset, verdict.

pub mod engine;
pub mod markers;
pub mod scanner;

pub use engine::{RetryPolicy, ValidateOptions, Validator, Verdict};
pub use markers::{Marker, MarkerSet};
pub use scanner::{scan, ScanReport};
