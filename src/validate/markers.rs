//! Expected span markers
//!
//! Each marker is a literal byte pattern written to the console log by the
//! RUM agent when a span is exported. The well-known presets mirror the
//! spans the smoke-test app emits for its buttons: SDK startup, one network
//! call per HTTP verb, and screen tracking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

// Agent startup spans
pub const INITIALIZE_SPAN: &str = "Span SplunkRum.initialize";
pub const APP_START_SPAN: &str = "Span AppStart";
pub const PRESENTATION_SPAN: &str = "Span PresentationTransition";

// Network spans, one per HTTP verb, each paired with the literal URL the
// smoke-test app calls for that verb
pub const POST_SPAN: &str = "Span HTTP POST";
pub const GET_SPAN: &str = "Span HTTP GET";
pub const PUT_SPAN: &str = "Span HTTP PUT";
pub const DELETE_SPAN: &str = "Span HTTP DELETE";
pub const NETWORK_CALL_POST_URL: &str = "https://reqres.in/api/login";
pub const NETWORK_CALL_GET_URL: &str = "https://www.splunk.com";
pub const NETWORK_CALL_PUT_URL: &str = "https://reqres.in/api/users/2";
pub const NETWORK_CALL_DELETE_URL: &str =
    "https://my-json-server.typicode.com/typicode/demo/posts/1";

// Screen tracking spans and view controller identifiers
pub const SCREEN_CHANGE_SPAN: &str = "Span screen name change";
pub const SHOW_VC_SPAN: &str = "Span ShowVC";
pub const SCREEN_TRACK_VC: &str = "ScreenTrackVC";
pub const CUSTOM_SCREEN_TRACK_VC: &str = "CustomScreenNameVC";

/// A literal byte pattern expected to appear somewhere in the log
///
/// Matching is exact, case-sensitive substring containment; the log is not
/// assumed to be well-formed lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The literal pattern bytes
    pub fn pattern(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the pattern occurs anywhere in `content`
    pub fn is_present_in(&self, content: &[u8]) -> bool {
        let needle = self.pattern();
        if needle.is_empty() {
            return true;
        }
        content
            .windows(needle.len())
            .any(|window| window == needle)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Marker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Marker {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The full set of markers one scenario requires
///
/// Markers are logically ANDed: the scenario passes only if every marker is
/// found at least once. Existence is checked, not occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// Markers for the SDK initialization scenario
    pub fn sdk_init() -> Self {
        [INITIALIZE_SPAN, APP_START_SPAN, PRESENTATION_SPAN]
            .into_iter()
            .collect()
    }

    /// Markers for the POST network call scenario
    pub fn network_post() -> Self {
        [POST_SPAN, NETWORK_CALL_POST_URL].into_iter().collect()
    }

    /// Markers for the GET network call scenario
    pub fn network_get() -> Self {
        [GET_SPAN, NETWORK_CALL_GET_URL].into_iter().collect()
    }

    /// Markers for the PUT network call scenario
    pub fn network_put() -> Self {
        [PUT_SPAN, NETWORK_CALL_PUT_URL].into_iter().collect()
    }

    /// Markers for the DELETE network call scenario
    pub fn network_delete() -> Self {
        [DELETE_SPAN, NETWORK_CALL_DELETE_URL].into_iter().collect()
    }

    /// Markers for the screen tracking scenario (default and custom
    /// view controller names)
    pub fn screen_track() -> Self {
        [
            SCREEN_CHANGE_SPAN,
            SHOW_VC_SPAN,
            SCREEN_TRACK_VC,
            CUSTOM_SCREEN_TRACK_VC,
        ]
        .into_iter()
        .collect()
    }

    /// Look up a preset marker set by name
    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "sdk-init" => Ok(Self::sdk_init()),
            "network-post" => Ok(Self::network_post()),
            "network-get" => Ok(Self::network_get()),
            "network-put" => Ok(Self::network_put()),
            "network-delete" => Ok(Self::network_delete()),
            "screen-track" => Ok(Self::screen_track()),
            other => Err(Error::UnknownPreset(other.to_string())),
        }
    }

    /// Names of all known presets, for CLI help and error messages
    pub fn preset_names() -> &'static [&'static str] {
        &[
            "sdk-init",
            "network-post",
            "network-get",
            "network-put",
            "network-delete",
            "screen-track",
        ]
    }

    /// Add a marker to the set
    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Merge another set into this one
    pub fn extend(&mut self, other: MarkerSet) {
        self.markers.extend(other.markers);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl<M: Into<Marker>> FromIterator<M> for MarkerSet {
    fn from_iter<T: IntoIterator<Item = M>>(iter: T) -> Self {
        Self {
            markers: iter.into_iter().map(Into::into).collect(),
        }
    }
}
