//! Scenario runner implementation
//!
//! Loads YAML scenarios and validates them against the shared log resource,
//! reporting per-marker results so a failure names exactly which spans were
//! missing rather than a bare pass/fail.

use std::path::Path;

use colored::Colorize;
use tracing::warn;

use crate::common::config::ValidationDefaults;
use crate::common::{Error, Result};
use crate::resource::LogResource;
use crate::validate::Validator;

use super::config::ScenarioConfig;

/// Result of one scenario run
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    /// Patterns that were not found in the log
    pub missing: Vec<String>,
    /// False if the post-scan log reset was not acknowledged
    pub reset_confirmed: bool,
}

/// Run a single scenario from a YAML file
///
/// Returns `Ok` with a failed result when markers are missing; returns `Err`
/// only when the scenario file is unusable or the log channel itself failed.
pub fn run_scenario<R: LogResource>(
    validator: &mut Validator<R>,
    path: &Path,
    defaults: &ValidationDefaults,
    verbose: bool,
) -> Result<ScenarioResult> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
    let scenario = ScenarioConfig::from_yaml(&content)?;

    let markers = scenario.marker_set()?;
    let options = scenario.options(defaults);

    println!(
        "\n{} {}",
        "Running Scenario:".blue().bold(),
        scenario.name.white().bold()
    );

    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    if verbose {
        println!("  settle: {:?}, policy: {:?}", options.settle, options.policy);
    }

    let verdict = validator.validate(&markers, &options)?;

    for marker in &verdict.report.found {
        println!("  {} found    {}", "✓".green(), marker.as_str().dimmed());
    }
    for marker in &verdict.report.missing {
        println!("  {} missing  {}", "✗".red(), marker.as_str());
    }

    if !verdict.reset_confirmed {
        warn!(scenario = %scenario.name, "log reset not acknowledged after scenario");
        println!("  {} log reset not acknowledged", "!".yellow());
    }

    if verdict.passed {
        println!("{} {}", "✓".green().bold(), "Scenario Passed".green().bold());
    } else {
        println!(
            "{} {} ({} of {} markers missing)",
            "✗".red().bold(),
            "Scenario Failed".red().bold(),
            verdict.missing().len(),
            markers.len()
        );
    }

    Ok(ScenarioResult {
        name: scenario.name,
        passed: verdict.passed,
        missing: verdict
            .missing()
            .iter()
            .map(|m| m.as_str().to_string())
            .collect(),
        reset_confirmed: verdict.reset_confirmed,
    })
}

/// Run scenario files in order, sharing one validator
///
/// Scenarios run strictly sequentially; the log resource is a single shared
/// buffer, so interleaving them would corrupt the verdicts. Returns true iff
/// every scenario passed.
pub fn run_scenarios<R: LogResource>(
    validator: &mut Validator<R>,
    paths: &[impl AsRef<Path>],
    defaults: &ValidationDefaults,
    verbose: bool,
) -> Result<bool> {
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        results.push(run_scenario(validator, path.as_ref(), defaults, verbose)?);
    }

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    println!(
        "\n{} {} passed, {} failed",
        "Summary:".blue().bold(),
        passed.to_string().green(),
        if failed > 0 {
            failed.to_string().red().to_string()
        } else {
            failed.to_string()
        }
    );

    for result in results.iter().filter(|r| !r.passed) {
        println!("  {} {}: missing {:?}", "✗".red(), result.name, result.missing);
    }

    Ok(failed == 0)
}
