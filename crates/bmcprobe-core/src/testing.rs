//! Shared setup for check unit tests

use crate::checks::CheckContext;
use crate::client::build_client;
use crate::config::ProbeConfig;
use crate::endpoints::Endpoints;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Owns everything a [`CheckContext`] borrows
pub(crate) struct Fixture {
    client: Client,
    config: ProbeConfig,
    endpoints: Endpoints,
}

impl Fixture {
    /// Fixture against `base_url` with no settle delay
    pub(crate) fn new(base_url: &str) -> Self {
        let config = ProbeConfig::new(base_url)
            .expect("Failed to build test config")
            .with_settle_delay(Duration::ZERO)
            .with_coverage_timeout(Duration::from_millis(500));
        let endpoints = Endpoints::resolve(&config).expect("Failed to resolve endpoints");
        let client = build_client(config.request_timeout).expect("Failed to build client");

        Self {
            client,
            config,
            endpoints,
        }
    }

    /// Replaces the coverage inventory, keeping its order
    pub(crate) fn with_coverage(mut self, coverage: Vec<(String, Url)>) -> Self {
        self.endpoints.coverage = coverage;
        self
    }

    pub(crate) fn ctx(&self) -> CheckContext<'_> {
        CheckContext {
            client: &self.client,
            config: &self.config,
            endpoints: &self.endpoints,
        }
    }
}
