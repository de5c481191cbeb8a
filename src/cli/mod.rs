//! CLI command handling
//!
//! Dispatches CLI commands against the configured log resource and formats
//! output. Returns whether everything passed so `main` can map the outcome
//! to an exit code (0 = passed, 1 = markers missing, 2 = infrastructure).

use std::io::Write;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::resource::{HttpLogResource, LogResource};
use crate::scenario::run_scenarios;
use crate::validate::{MarkerSet, ValidateOptions, Validator};

/// Dispatch a CLI command; returns true iff all validations passed
pub fn dispatch(command: Commands, config: &Config) -> Result<bool> {
    let resource = HttpLogResource::from_config(config);

    match command {
        Commands::Run {
            scenarios,
            verbose,
        } => {
            let mut validator = Validator::new(resource);
            run_scenarios(&mut validator, &scenarios, &config.validation, verbose)
        }

        Commands::Check {
            preset,
            markers,
            settle,
            poll_interval,
            max_wait,
            json,
        } => {
            let mut set = match preset {
                Some(name) => MarkerSet::preset(&name)?,
                None => MarkerSet::default(),
            };
            for pattern in markers {
                set.push(pattern.into());
            }
            if set.is_empty() {
                return Err(Error::Config(
                    "no markers to check; use --preset or --marker".to_string(),
                ));
            }

            let settle = settle.unwrap_or(config.validation.settle_secs);
            let options = if poll_interval.is_some() || max_wait.is_some() {
                ValidateOptions::bounded_poll(
                    settle,
                    poll_interval.unwrap_or(config.validation.poll_interval_secs),
                    max_wait.unwrap_or(config.validation.max_wait_secs),
                )
            } else {
                ValidateOptions::single_shot(settle)
            };

            let mut validator = Validator::new(resource);
            let verdict = validator.validate(&set, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                for marker in &verdict.report.found {
                    println!("{} found    {}", "✓".green(), marker.as_str().dimmed());
                }
                for marker in &verdict.report.missing {
                    println!("{} missing  {}", "✗".red(), marker.as_str());
                }
                if !verdict.reset_confirmed {
                    println!("{} log reset not acknowledged", "!".yellow());
                }
            }

            Ok(verdict.passed)
        }

        Commands::Fetch => {
            let content = resource.fetch().map_err(Error::Fetch)?;
            std::io::stdout().write_all(&content)?;
            Ok(true)
        }

        Commands::Reset => {
            resource.reset().map_err(Error::Reset)?;
            println!("Log reset");
            Ok(true)
        }
    }
}
