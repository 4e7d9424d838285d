//! Sequential check runner
//!
//! The harness owns one HTTP client for the whole run, executes the
//! connectivity probe and then every suite check in order, and keeps an
//! ordered log of [`CheckResult`]s. Progress is written to `W` as each check
//! completes (stdout for the CLI, a buffer in tests).

use crate::checks::{self, Check, CheckContext, CheckOutcome};
use crate::client::build_client;
use crate::config::ProbeConfig;
use crate::endpoints::Endpoints;
use crate::error::Result;
use crate::record::CheckResult;
use crate::report::{Report, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use colored::Colorize;
use reqwest::blocking::Client;
use std::any::Any;
use std::io::{self, Stdout, Write};
use std::panic::{self, AssertUnwindSafe};

const RULE: &str = "============================================================";

// Progress output is best effort; a closed stdout must not abort the run.
macro_rules! say {
    ($out:expr, $($arg:tt)*) => {
        if let Err(e) = writeln!($out, $($arg)*) {
            log::debug!("progress output failed: {e}");
        }
    };
}

/// Pass/total counts derived from the result log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub total: usize,
}

impl Tally {
    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    /// True when at least one check ran and none failed
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}

/// One harness run against one backend
pub struct Harness<W: Write = Stdout> {
    config: ProbeConfig,
    endpoints: Endpoints,
    client: Client,
    log: Vec<CheckResult>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    out: W,
}

impl Harness<Stdout> {
    /// Creates a harness printing progress to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if the routes cannot be resolved or the HTTP client
    /// cannot be built.
    pub fn new(config: ProbeConfig) -> Result<Self> {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> Harness<W> {
    /// Creates a harness printing progress to `out`
    ///
    /// # Errors
    ///
    /// Same as [`Harness::new`].
    pub fn with_writer(config: ProbeConfig, out: W) -> Result<Self> {
        let endpoints = Endpoints::resolve(&config)?;
        let client = build_client(config.request_timeout)?;

        Ok(Self {
            config,
            endpoints,
            client,
            log: Vec::new(),
            started_at: None,
            finished_at: None,
            out,
        })
    }

    /// Runs the connectivity probe and, if it passes, the default suite
    ///
    /// Returns true iff every attempted check passed.
    pub fn run(&mut self) -> bool {
        let suite = checks::default_suite();
        self.run_suite(&checks::gatekeeper(), &suite)
    }

    /// Runs `gatekeeper`, then each check of `suite` in order
    ///
    /// A failing gatekeeper stops the run with a single result in the log.
    /// Results of a previous run are discarded.
    pub fn run_suite(&mut self, gatekeeper: &dyn Check, suite: &[Box<dyn Check>]) -> bool {
        self.log.clear();
        self.started_at = Some(Utc::now());
        self.finished_at = None;
        log::info!(
            "running {} checks against {}",
            suite.len() + 1,
            self.config.base_url
        );

        say!(self.out, "{}", "Starting BigMouthCat backend API tests".bold());
        say!(self.out, "Target: {}", self.config.base_url);
        say!(self.out, "{RULE}");

        if !self.attempt(gatekeeper) {
            say!(self.out, "{} Server not accessible. Stopping tests.", "✗".red());
            self.finished_at = Some(Utc::now());
            log::info!("connectivity probe failed; run aborted");
            return false;
        }

        for check in suite {
            self.attempt(check.as_ref());
        }

        // The gatekeeper already passed; the headline counts suite checks only
        let suite_tally = Tally {
            passed: self.log[1..].iter().filter(|r| r.success()).count(),
            total: suite.len(),
        };
        say!(self.out, "{RULE}");
        say!(
            self.out,
            "Test Results: {}/{} tests passed",
            suite_tally.passed,
            suite_tally.total
        );
        if suite_tally.failed() == 0 {
            say!(self.out, "{} All backend tests passed!", "✓".green());
        } else {
            say!(self.out, "{} {} tests failed", "✗".red(), suite_tally.failed());
        }

        let tally = self.tally();
        self.finished_at = Some(Utc::now());
        log::info!("run finished: {}/{} passed", tally.passed, tally.total);
        tally.all_passed()
    }

    /// Prints every result and the overall count, returning `(passed, total)`
    ///
    /// Recomputed from the log on every call; calling it again only prints
    /// the same summary again.
    pub fn summary(&mut self) -> (usize, usize) {
        let tally = self.tally();

        say!(self.out, "\n{RULE}");
        say!(self.out, "{}", "DETAILED TEST SUMMARY".bold());
        say!(self.out, "{RULE}");

        for result in &self.log {
            let mark = if result.success() {
                "✓".green()
            } else {
                "✗".red()
            };
            say!(self.out, "{} {}", mark, result.name());
            if !result.detail().is_empty() {
                say!(self.out, "   {}", result.detail());
            }
        }

        say!(
            self.out,
            "\nOverall: {}/{} tests passed",
            tally.passed,
            tally.total
        );
        (tally.passed, tally.total)
    }

    /// Pass/total counts over the current log
    pub fn tally(&self) -> Tally {
        Tally {
            passed: self.log.iter().filter(|r| r.success()).count(),
            total: self.log.len(),
        }
    }

    /// Results in the order the checks ran
    pub fn results(&self) -> &[CheckResult] {
        &self.log
    }

    /// Snapshot of the run for JSON output
    pub fn report(&self) -> Report {
        let tally = self.tally();
        Report {
            schema_version: SCHEMA_VERSION.to_string(),
            base_url: self.config.base_url.to_string(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            success: tally.all_passed(),
            passed: tally.passed,
            total: tally.total,
            results: self.log.clone(),
        }
    }

    /// Consumes the harness, returning the progress writer
    pub fn into_writer(self) -> W {
        self.out
    }

    fn attempt(&mut self, check: &dyn Check) -> bool {
        let ctx = CheckContext {
            client: &self.client,
            config: &self.config,
            endpoints: &self.endpoints,
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| check.run(&ctx)))
            .unwrap_or_else(|payload| {
                CheckOutcome::fail(format!("check crashed: {}", panic_message(payload.as_ref())))
            });

        let result = CheckResult::new(
            check.name(),
            outcome.success,
            outcome.detail,
            outcome.response,
        );
        if !result.success() {
            log::warn!("{} failed: {}", result.name(), result.detail());
        }

        self.print_result(&result);
        let success = result.success();
        self.log.push(result);
        success
    }

    fn print_result(&mut self, result: &CheckResult) {
        let status = if result.success() {
            "✓ PASS".green()
        } else {
            "✗ FAIL".red()
        };
        say!(self.out, "{} {}", status, result.name());

        if !result.detail().is_empty() {
            say!(self.out, "   Details: {}", result.detail());
        }
        if let Some(response) = result.response() {
            say!(self.out, "   Response: {}", response);
        }
        say!(self.out, "");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
