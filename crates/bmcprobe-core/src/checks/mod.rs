//! Backend checks
//!
//! Every check has the same shape: it reads the shared [`CheckContext`],
//! performs one or more HTTP calls and reports a [`CheckOutcome`]. Transport
//! errors and unexpected responses are folded into a failed outcome; a check
//! never returns an error to the harness.
//!
//! Checks that other checks compose (create and list) expose their core as a
//! `pub(crate)` function returning `Result<_, CheckFailure>` so `?` can chain
//! them without each sub-call being logged on its own.

pub mod connectivity;
pub mod coverage;
pub mod cors;
pub mod root;
pub mod status;

pub use connectivity::ConnectivityProbe;
pub use coverage::EndpointCoverageCheck;
pub use cors::CorsHeaderCheck;
pub use root::RootMessageCheck;
pub use status::{CreateRecordCheck, ListRecordsCheck, PersistenceCheck, ValidationErrorCheck};

use crate::config::ProbeConfig;
use crate::endpoints::Endpoints;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::Value;

/// Shared, read-only state every check runs against
pub struct CheckContext<'a> {
    pub client: &'a Client,
    pub config: &'a ProbeConfig,
    pub endpoints: &'a Endpoints,
}

impl CheckContext<'_> {
    /// Sends `request` on the shared client, logging method, URL and status
    pub(crate) fn execute(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        match self.client.execute(request) {
            Ok(response) => {
                log::debug!("{method} {url} -> {}", response.status());
                Ok(response)
            }
            Err(e) => {
                log::debug!("{method} {url} failed: {e}");
                Err(e)
            }
        }
    }

    /// Like [`CheckContext::execute`], turning transport errors into a failure
    pub(crate) fn send(&self, request: RequestBuilder) -> Result<Response, CheckFailure> {
        self.execute(request)
            .map_err(|e| CheckFailure::new(format!("Request failed: {e}")))
    }
}

/// A single named verification step
pub trait Check {
    /// Name shown in progress output and the summary
    fn name(&self) -> &'static str;

    /// Runs the check; failures are reported in the outcome
    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome;
}

/// What a check reports back to the harness
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub success: bool,
    pub detail: String,
    pub response: Option<Value>,
}

impl CheckOutcome {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
            response: None,
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
            response: None,
        }
    }
}

impl From<Result<String, CheckFailure>> for CheckOutcome {
    fn from(result: Result<String, CheckFailure>) -> Self {
        match result {
            Ok(detail) => Self::pass(detail),
            Err(failure) => failure.into(),
        }
    }
}

/// Why a check (or one step of a composed check) failed
#[derive(Debug, Clone, PartialEq)]
pub struct CheckFailure {
    pub detail: String,
    pub response: Option<Value>,
}

impl CheckFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            response: None,
        }
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    /// Prefixes the detail with the step that failed
    pub fn context(mut self, step: &str) -> Self {
        self.detail = format!("{step}: {}", self.detail);
        self
    }
}

impl From<CheckFailure> for CheckOutcome {
    fn from(failure: CheckFailure) -> Self {
        Self {
            success: false,
            detail: failure.detail,
            response: failure.response,
        }
    }
}

/// The gatekeeper that must pass before anything else runs
pub fn gatekeeper() -> ConnectivityProbe {
    ConnectivityProbe
}

/// Checks run after a successful connectivity probe, in execution order
pub fn default_suite() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(RootMessageCheck),
        Box::new(CreateRecordCheck),
        Box::new(ListRecordsCheck),
        Box::new(PersistenceCheck),
        Box::new(CorsHeaderCheck),
        Box::new(ValidationErrorCheck),
        Box::new(EndpointCoverageCheck),
    ]
}

/// Fails with `HTTP <code>` and the raw body unless the status is 200
pub(crate) fn expect_ok(response: Response) -> Result<Response, CheckFailure> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    Err(CheckFailure::new(format!("HTTP {}", status.as_u16())).with_response(body_text(response)))
}

/// Reads the body as JSON
pub(crate) fn body_json(response: Response) -> Result<Value, CheckFailure> {
    let text = response
        .text()
        .map_err(|e| CheckFailure::new(format!("Failed to read response body: {e}")))?;
    serde_json::from_str(&text).map_err(|e| {
        CheckFailure::new(format!("Response is not valid JSON: {e}")).with_response(Value::String(text))
    })
}

/// Reads the body as text for diagnostics; unreadable bodies become `null`
pub(crate) fn body_text(response: Response) -> Value {
    response.text().map(Value::String).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use serde_json::json;
    use std::time::{Duration, Instant};

    #[test]
    fn test_default_suite_order() {
        let names: Vec<&str> = default_suite().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "Root Endpoint (GET /api/)",
                "Status POST Endpoint",
                "Status GET Endpoint",
                "Status Persistence",
                "CORS Configuration",
                "Error Handling",
                "Game API Coverage",
            ]
        );
        assert_eq!(gatekeeper().name(), "Server Connectivity");
    }

    #[test]
    fn test_failure_converts_with_payload() {
        let outcome: CheckOutcome = CheckFailure::new("HTTP 500")
            .with_response(json!("boom"))
            .context("Could not create test data")
            .into();

        assert!(!outcome.success);
        assert_eq!(outcome.detail, "Could not create test data: HTTP 500");
        assert_eq!(outcome.response, Some(json!("boom")));
    }

    #[test]
    fn test_ok_result_converts_to_pass() {
        let outcome = CheckOutcome::from(Ok::<_, CheckFailure>("fine".to_string()));
        assert_eq!(outcome, CheckOutcome::pass("fine"));
    }

    #[test]
    fn test_execute_honors_per_request_timeout() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/slow")
            .with_status(200)
            .with_body_from_request(|_| {
                std::thread::sleep(Duration::from_millis(1500));
                b"late".to_vec()
            })
            .create();

        let fixture = Fixture::new(&server.url());
        let ctx = fixture.ctx();
        let request = ctx
            .client
            .get(format!("{}/slow", server.url()))
            .timeout(Duration::from_millis(200));

        let started = Instant::now();
        let err = ctx.execute(request).unwrap_err();

        assert!(err.is_timeout(), "{err}");
        assert!(started.elapsed() < Duration::from_millis(1500));
    }

    #[test]
    fn test_send_wraps_transport_errors() {
        let fixture = Fixture::new(&bmcprobe_testkit::unreachable_url());
        let ctx = fixture.ctx();

        let failure = ctx.send(ctx.client.get(ctx.endpoints.docs.clone())).unwrap_err();

        assert!(failure.detail.starts_with("Request failed:"));
        assert!(failure.response.is_none());
    }

    #[test]
    fn test_execute_passes_status_through() {
        let mut server = mockito::Server::new();
        let mock = server.mock("DELETE", "/api/status").with_status(204).create();

        let fixture = Fixture::new(&server.url());
        let ctx = fixture.ctx();
        let response = ctx
            .execute(ctx.client.delete(ctx.endpoints.status.clone()))
            .unwrap();

        mock.assert();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
