//! Scenario runner
//!
//! Reads YAML validation scenarios (which spans a UI action is expected to
//! have emitted) and runs them sequentially against a shared log resource,
//! printing per-marker results. Scenarios share one validator because the
//! log has no per-scenario isolation.

mod config;
mod runner;

pub use config::{PollConfig, ScenarioConfig};
pub use runner::{run_scenario, run_scenarios, ScenarioResult};
