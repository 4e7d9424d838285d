//! Runs the check suite and reports the outcome

use crate::cli::Cli;
use crate::output;
use anyhow::Result;
use bmcprobe_core::{Harness, ProbeConfig};
use std::io;
use std::time::Duration;

/// Builds the configuration from parsed arguments
pub fn config_from_cli(cli: &Cli) -> Result<ProbeConfig> {
    let config = ProbeConfig::new(&cli.base_url)?
        .with_request_timeout(Duration::from_secs(cli.timeout_secs))
        .with_coverage_timeout(Duration::from_secs(cli.coverage_timeout_secs))
        .with_settle_delay(Duration::from_millis(cli.settle_ms));
    Ok(config)
}

/// Runs every check once
///
/// # Returns
///
/// Ok(true) iff every attempted check passed
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP client cannot
/// be built or the JSON report cannot be written.
pub fn run(cli: &Cli) -> Result<bool> {
    let config = config_from_cli(cli)?;
    log::debug!("config: {:?}", config);

    if cli.json {
        // Progress text would corrupt the JSON on stdout
        let mut harness = Harness::with_writer(config, io::sink())?;
        let success = harness.run();
        output::print_json(&serde_json::to_string_pretty(&harness.report())?)?;
        return Ok(success);
    }

    let mut harness = Harness::new(config)?;
    let success = harness.run();
    harness.summary();
    Ok(success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_from_cli_applies_timings() {
        let cli = Cli::parse_from([
            "bmcprobe",
            "--base-url",
            "http://backend.test:9000",
            "--timeout-secs",
            "3",
            "--coverage-timeout-secs",
            "1",
            "--settle-ms",
            "50",
        ]);

        let config = config_from_cli(&cli).unwrap();

        assert_eq!(config.base_url.as_str(), "http://backend.test:9000/");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.coverage_timeout, Duration::from_secs(1));
        assert_eq!(config.settle_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_config_from_cli_rejects_bad_url() {
        let cli = Cli::parse_from(["bmcprobe", "--base-url", "ftp://backend.test"]);

        let err = config_from_cli(&cli).unwrap_err();
        assert!(err.to_string().starts_with("UNSUPPORTED_SCHEME"));
    }
}
