//! CLI argument structure using clap

use bmcprobe_core::config::{
    BACKEND_URL_ENV, DEFAULT_BACKEND_URL, DEFAULT_COVERAGE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SETTLE_DELAY,
};
use clap::Parser;

/// Runs every check once; no arguments are required
#[derive(Parser, Debug)]
#[command(name = "bmcprobe")]
#[command(version, about = "Integration checks for the BigMouthCat backend API", long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = BACKEND_URL_ENV, default_value = DEFAULT_BACKEND_URL)]
    pub base_url: String,

    /// Timeout for each check request, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Timeout for each endpoint-coverage probe, in seconds
    #[arg(long, default_value_t = DEFAULT_COVERAGE_TIMEOUT.as_secs())]
    pub coverage_timeout_secs: u64,

    /// Pause between creating a record and listing again, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY.as_millis() as u64)]
    pub settle_ms: u64,

    /// Print the run as a JSON report instead of progress text
    #[arg(long)]
    pub json: bool,

    #[arg(short, long)]
    pub verbose: bool,
}
