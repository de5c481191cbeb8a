//! CLI command definitions
//!
//! Defines the clap commands for the span validation harness.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run YAML validation scenarios sequentially
    Run {
        /// Paths to scenario YAML files, executed in order
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },

    /// Run one ad hoc validation against the log
    Check {
        /// Well-known marker preset (sdk-init, network-get, network-post,
        /// network-put, network-delete, screen-track)
        #[arg(long)]
        preset: Option<String>,

        /// Literal marker pattern, can be specified multiple times
        #[arg(long = "marker", short = 'm')]
        markers: Vec<String>,

        /// Seconds to wait before fetching, covering instrumentation flush
        #[arg(long)]
        settle: Option<f64>,

        /// Poll interval in seconds; enables bounded polling
        #[arg(long)]
        poll_interval: Option<f64>,

        /// Maximum seconds to keep polling before giving up
        #[arg(long)]
        max_wait: Option<f64>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the current log content to stdout
    Fetch,

    /// Reset (truncate) the log
    Reset,
}
