use super::{Check, CheckContext, CheckFailure, CheckOutcome, body_json, expect_ok};
use serde_json::Value;

/// Message the backend root must greet with
pub const EXPECTED_ROOT_MESSAGE: &str = "Hello World";

/// `GET /api/` must answer 200 with `{"message": "Hello World"}`
pub struct RootMessageCheck;

impl RootMessageCheck {
    fn verify(ctx: &CheckContext<'_>) -> Result<String, CheckFailure> {
        let response = expect_ok(ctx.send(ctx.client.get(ctx.endpoints.api_root.clone()))?)?;
        let body = body_json(response)?;

        match body.get("message").and_then(Value::as_str) {
            Some(EXPECTED_ROOT_MESSAGE) => Ok("Returned expected hello world message".to_string()),
            _ => Err(CheckFailure::new("Unexpected response content").with_response(body)),
        }
    }
}

impl Check for RootMessageCheck {
    fn name(&self) -> &'static str {
        "Root Endpoint (GET /api/)"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        Self::verify(ctx).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use serde_json::json;

    fn run_against(status: usize, body: &str) -> CheckOutcome {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let fixture = Fixture::new(&server.url());
        let outcome = RootMessageCheck.run(&fixture.ctx());
        mock.assert();
        outcome
    }

    #[test]
    fn test_passes_on_hello_world() {
        let outcome = run_against(200, r#"{"message": "Hello World"}"#);
        assert!(outcome.success);
        assert!(outcome.response.is_none());
    }

    #[test]
    fn test_fails_on_other_message() {
        let outcome = run_against(200, r#"{"message": "Hello Cat"}"#);

        assert!(!outcome.success);
        assert_eq!(outcome.detail, "Unexpected response content");
        assert_eq!(outcome.response, Some(json!({"message": "Hello Cat"})));
    }

    #[test]
    fn test_fails_on_non_200() {
        let outcome = run_against(500, "Internal Server Error");

        assert!(!outcome.success);
        assert_eq!(outcome.detail, "HTTP 500");
        assert_eq!(outcome.response, Some(json!("Internal Server Error")));
    }

    #[test]
    fn test_fails_on_invalid_json() {
        let outcome = run_against(200, "<html>hello</html>");

        assert!(!outcome.success);
        assert!(outcome.detail.starts_with("Response is not valid JSON"));
    }

    #[test]
    fn test_fails_when_server_is_down() {
        let fixture = Fixture::new(&bmcprobe_testkit::unreachable_url());
        let outcome = RootMessageCheck.run(&fixture.ctx());

        assert!(!outcome.success);
        assert!(outcome.detail.starts_with("Request failed:"));
    }
}
