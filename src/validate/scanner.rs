//! Pure marker scan over fetched log content
//!
//! Scanning has no side effects and no timing; it is a pure function of the
//! content and the marker set, so the same inputs always produce the same
//! report.

use serde::Serialize;

use super::markers::{Marker, MarkerSet};

/// Per-marker presence result for one scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Markers found at least once in the content
    pub found: Vec<Marker>,
    /// Markers absent from the content
    pub missing: Vec<Marker>,
}

impl ScanReport {
    /// Whether every required marker was found
    pub fn all_found(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Test every marker in `markers` for presence in `content`
///
/// Each marker is matched independently by exact byte containment; a marker
/// appearing multiple times still counts once.
pub fn scan(content: &[u8], markers: &MarkerSet) -> ScanReport {
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for marker in markers.iter() {
        if marker.is_present_in(content) {
            found.push(marker.clone());
        } else {
            missing.push(marker.clone());
        }
    }

    ScanReport { found, missing }
}
