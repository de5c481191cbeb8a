//! Scenario configuration types
//!
//! Defines the data structures for deserializing YAML validation scenarios.

use serde::Deserialize;

use crate::common::config::ValidationDefaults;
use crate::common::{Error, Result};
use crate::validate::{MarkerSet, ValidateOptions};

/// A validation scenario loaded from a YAML file
///
/// Markers come from a well-known preset, a literal list, or both; the two
/// are merged. Timing fields are optional and fall back to the configured
/// defaults.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    /// Name of the scenario
    pub name: String,
    /// Optional description of the UI action whose spans are validated
    pub description: Option<String>,
    /// Well-known marker preset (e.g., "sdk-init", "network-post")
    pub preset: Option<String>,
    /// Literal markers, in addition to the preset if both are given
    #[serde(default)]
    pub markers: Vec<String>,
    /// Settle time before the first fetch, in seconds
    pub settle_secs: Option<f64>,
    /// Bounded polling; absent means a single fetch after the settle wait
    pub poll: Option<PollConfig>,
}

/// Bounded-poll settings for a scenario
#[derive(Deserialize, Debug)]
pub struct PollConfig {
    /// Seconds between fetch attempts
    pub interval_secs: Option<f64>,
    /// Seconds before giving up with a failed verdict
    pub max_wait_secs: Option<f64>,
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse scenario: {e}")))
    }

    /// Resolve the full marker set for this scenario
    pub fn marker_set(&self) -> Result<MarkerSet> {
        let mut set = match &self.preset {
            Some(name) => MarkerSet::preset(name)?,
            None => MarkerSet::default(),
        };

        for pattern in &self.markers {
            set.push(pattern.as_str().into());
        }

        if set.is_empty() {
            return Err(Error::EmptyMarkerSet(self.name.clone()));
        }

        Ok(set)
    }

    /// Resolve the timing options, filling gaps from the configured defaults
    pub fn options(&self, defaults: &ValidationDefaults) -> ValidateOptions {
        let settle = self.settle_secs.unwrap_or(defaults.settle_secs);

        match &self.poll {
            Some(poll) => ValidateOptions::bounded_poll(
                settle,
                poll.interval_secs.unwrap_or(defaults.poll_interval_secs),
                poll.max_wait_secs.unwrap_or(defaults.max_wait_secs),
            ),
            None => ValidateOptions::single_shot(settle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::RetryPolicy;
    use std::time::Duration;

    #[test]
    fn test_parse_preset_scenario() {
        let scenario = ScenarioConfig::from_yaml(
            r#"
            name: SDK initialization spans
            description: Spans emitted during agent startup
            preset: sdk-init
            settle_secs: 5
            "#,
        )
        .unwrap();

        assert_eq!(scenario.name, "SDK initialization spans");
        let set = scenario.marker_set().unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_preset_and_literal_markers_merge() {
        let scenario = ScenarioConfig::from_yaml(
            r#"
            name: POST with session id
            preset: network-post
            markers:
              - "session.id="
            "#,
        )
        .unwrap();

        let set = scenario.marker_set().unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.iter().any(|m| m.as_str() == "session.id="));
    }

    #[test]
    fn test_scenario_without_markers_is_rejected() {
        let scenario = ScenarioConfig::from_yaml("name: empty").unwrap();
        assert!(matches!(
            scenario.marker_set(),
            Err(Error::EmptyMarkerSet(_))
        ));
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let scenario = ScenarioConfig::from_yaml(
            r#"
            name: bad
            preset: network-patch
            "#,
        )
        .unwrap();
        assert!(matches!(scenario.marker_set(), Err(Error::UnknownPreset(_))));
    }

    #[test]
    fn test_poll_block_selects_bounded_poll() {
        let scenario = ScenarioConfig::from_yaml(
            r#"
            name: polled
            preset: screen-track
            poll:
              interval_secs: 1.5
              max_wait_secs: 20
            "#,
        )
        .unwrap();

        let defaults = ValidationDefaults::default();
        let options = scenario.options(&defaults);

        match options.policy {
            RetryPolicy::BoundedPoll { interval, max_wait } => {
                assert_eq!(interval, Duration::from_secs_f64(1.5));
                assert_eq!(max_wait, Duration::from_secs_f64(20.0));
            }
            RetryPolicy::SingleShot => panic!("expected bounded poll"),
        }
        // Settle falls back to the configured default
        assert_eq!(options.settle, Duration::from_secs_f64(defaults.settle_secs));
    }

    #[test]
    fn test_defaults_fill_partial_poll_block() {
        let scenario = ScenarioConfig::from_yaml(
            r#"
            name: polled
            preset: sdk-init
            poll:
              max_wait_secs: 10
            "#,
        )
        .unwrap();

        let defaults = ValidationDefaults::default();
        match scenario.options(&defaults).policy {
            RetryPolicy::BoundedPoll { interval, .. } => {
                assert_eq!(
                    interval,
                    Duration::from_secs_f64(defaults.poll_interval_secs)
                );
            }
            RetryPolicy::SingleShot => panic!("expected bounded poll"),
        }
    }
}
