use super::{Check, CheckContext, CheckOutcome};
use reqwest::StatusCode;

/// Confirms the backend answers at all by fetching its API docs page
pub struct ConnectivityProbe;

impl Check for ConnectivityProbe {
    fn name(&self) -> &'static str {
        "Server Connectivity"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        match ctx.execute(ctx.client.get(ctx.endpoints.docs.clone())) {
            Ok(response) if response.status() == StatusCode::OK => {
                CheckOutcome::pass("API docs accessible")
            }
            Ok(response) => CheckOutcome::fail(format!(
                "Docs returned status {}",
                response.status().as_u16()
            )),
            Err(e) => CheckOutcome::fail(format!("Connection failed: {e}")),
        }
    }
}
