use super::{Check, CheckContext, CheckOutcome};
use reqwest::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, HeaderMap, HeaderName, ORIGIN,
};

/// A cross-origin request to the API root gets `*` plus credentials.
///
/// The backend is expected to answer with this combination even though
/// browsers refuse it for credentialed requests; the check only records it.
pub struct CorsHeaderCheck;

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

impl Check for CorsHeaderCheck {
    fn name(&self) -> &'static str {
        "CORS Configuration"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let request = ctx
            .client
            .get(ctx.endpoints.api_root.clone())
            .header(ORIGIN, ctx.config.origin.as_str());

        let response = match ctx.send(request) {
            Ok(response) => response,
            Err(failure) => return failure.context("CORS test failed").into(),
        };

        let headers = response.headers();
        let allow_origin = header_str(headers, ACCESS_CONTROL_ALLOW_ORIGIN);
        let allow_credentials = header_str(headers, ACCESS_CONTROL_ALLOW_CREDENTIALS);

        if allow_origin == Some("*") && allow_credentials == Some("true") {
            CheckOutcome::pass("CORS configured for all origins with credentials")
        } else {
            CheckOutcome::fail(format!(
                "CORS not properly configured - Origin: {}, Credentials: {}",
                allow_origin.unwrap_or("None"),
                allow_credentials.unwrap_or("None")
            ))
        }
    }
}
