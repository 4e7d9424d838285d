//! Integration checks for the BigMouthCat backend API.
//!
//! This crate drives a fixed, ordered list of HTTP checks against a running
//! backend and records one [`CheckResult`] per check.
//!
//! # Run Flow
//!
//! ```text
//! Harness::run()
//!     ↓
//! 1. Connectivity probe (GET /docs)
//!     → fails: stop, log holds one result
//!     ↓
//! 2. Root message, create, list, persistence,
//!    CORS headers, validation error, endpoint coverage
//!     ↓
//! 3. Test Results: P/T tests passed
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bmcprobe_core::{Harness, ProbeConfig};
//!
//! # fn main() -> bmcprobe_core::Result<()> {
//! let config = ProbeConfig::from_env()?;
//! let mut harness = Harness::new(config)?;
//!
//! let success = harness.run();
//! let (passed, total) = harness.summary();
//! println!("{passed}/{total}");
//! std::process::exit(if success { 0 } else { 1 });
//! # }
//! ```

pub mod checks;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod harness;
pub mod record;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use checks::{Check, CheckContext, CheckOutcome};
pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use harness::{Harness, Tally};
pub use record::{CheckResult, StatusRecord};
pub use report::Report;
