//! spancheck - telemetry span validation harness
//!
//! Invoked by UI-automation steps after they drive the instrumented app:
//! scans the device's console log for the expected span markers, resets the
//! log, and maps the verdict to an exit code the test runner understands.

use clap::Parser;
use spancheck::common::config::Config;
use spancheck::{cli, commands::Commands, common};

#[derive(Parser)]
#[command(name = "spancheck", about = "Telemetry span validation harness")]
#[command(version, long_about = None)]
struct Cli {
    /// Log fetch endpoint, overriding the config file
    #[arg(long, global = true)]
    log_url: Option<String>,

    /// Log reset endpoint, overriding the config file
    #[arg(long, global = true)]
    reset_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    common::logging::init_cli();

    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    if let Some(url) = cli.log_url {
        config.log.url = url;
    }
    if let Some(url) = cli.reset_url {
        config.log.reset_url = Some(url);
    }

    // Exit codes: 0 = all passed, 1 = markers missing (content failure),
    // 2 = infrastructure error (log channel unreachable, bad config)
    match cli::dispatch(cli.command, &config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
