//! Harness configuration
//!
//! The base URL defaults to the local development backend and can be
//! overridden through [`BACKEND_URL_ENV`] or explicitly by the caller.

use crate::error::{ProbeError, Result};
use std::time::Duration;
use url::Url;

/// Environment variable overriding the backend base URL
pub const BACKEND_URL_ENV: &str = "BMCPROBE_BACKEND_URL";

/// Backend the frontend talks to during local development
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Path segment every API route lives under
pub const API_PREFIX: &str = "api";

/// Timeout for every regular check request (5 seconds)
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for each endpoint-coverage probe (2 seconds)
pub const DEFAULT_COVERAGE_TIMEOUT: Duration = Duration::from_secs(2);

/// Pause between create and re-list in the persistence check
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Origin sent by the cross-origin header check
pub const DEV_ORIGIN: &str = "http://localhost:3000";

/// Routes the game frontend needs but the backend does not serve yet.
pub const EXPECTED_GAME_ENDPOINTS: [&str; 8] = [
    "/api/taps",
    "/api/party-rooms",
    "/api/continents",
    "/api/popwars",
    "/api/leaderboard",
    "/api/combos",
    "/api/users",
    "/api/realtime",
];

/// Settings shared by every check in a harness run
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub coverage_timeout: Duration,
    pub settle_delay: Duration,
    pub origin: String,
    pub expected_endpoints: Vec<String>,
}

impl ProbeConfig {
    /// Creates a configuration targeting `base_url` with default timings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_url` does not parse
    /// - the scheme is not http or https
    /// - the URL cannot carry path segments
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            coverage_timeout: DEFAULT_COVERAGE_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            origin: DEV_ORIGIN.to_string(),
            expected_endpoints: EXPECTED_GAME_ENDPOINTS
                .iter()
                .map(|path| path.to_string())
                .collect(),
        })
    }

    /// Creates a configuration from [`BACKEND_URL_ENV`], falling back to
    /// [`DEFAULT_BACKEND_URL`] when the variable is unset
    ///
    /// # Errors
    ///
    /// Same as [`ProbeConfig::new`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(DEFAULT_BACKEND_URL),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_coverage_timeout(mut self, timeout: Duration) -> Self {
        self.coverage_timeout = timeout;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|source| ProbeError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(ProbeError::CannotBeABase { url });
    }

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProbeError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}
