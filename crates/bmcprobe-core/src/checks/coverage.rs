use super::{Check, CheckContext, CheckOutcome};
use reqwest::StatusCode;

/// Inventory of routes the game frontend expects.
///
/// None of these exist on the backend yet, so this check stays red until
/// they are implemented. A route counts as missing when it answers 404 or
/// cannot be reached within the coverage timeout.
pub struct EndpointCoverageCheck;

impl EndpointCoverageCheck {
    fn missing_endpoints<'a>(ctx: &'a CheckContext<'_>) -> Vec<&'a str> {
        ctx.endpoints
            .coverage
            .iter()
            .filter(|(_, url)| {
                let request = ctx.client.get(url.clone()).timeout(ctx.config.coverage_timeout);
                match ctx.execute(request) {
                    Ok(response) => response.status() == StatusCode::NOT_FOUND,
                    Err(_) => true,
                }
            })
            .map(|(path, _)| path.as_str())
            .collect()
    }
}

impl Check for EndpointCoverageCheck {
    fn name(&self) -> &'static str {
        "Game API Coverage"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let missing = Self::missing_endpoints(ctx);
        if missing.is_empty() {
            CheckOutcome::pass("All expected game endpoints are implemented")
        } else {
            CheckOutcome::fail(format!("Missing endpoints: {}", missing.join(", ")))
        }
    }
}
