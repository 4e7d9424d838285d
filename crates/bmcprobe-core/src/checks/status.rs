//! Checks against the status-record collection (`/api/status`)

use super::{Check, CheckContext, CheckFailure, CheckOutcome, body_json, expect_ok};
use crate::record::StatusRecord;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};

/// Client name the create check registers
pub const TEST_CLIENT_NAME: &str = "BigMouthCat_TestClient";

/// Creates one status record and validates the echoed fields.
pub(crate) fn create_record(ctx: &CheckContext<'_>) -> Result<StatusRecord, CheckFailure> {
    let request = ctx
        .client
        .post(ctx.endpoints.status.clone())
        .header(CONTENT_TYPE, "application/json")
        .json(&json!({ "client_name": TEST_CLIENT_NAME }));
    let body = body_json(expect_ok(ctx.send(request)?)?)?;

    let missing: Vec<&str> = StatusRecord::REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| body.get(field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(
            CheckFailure::new(format!("Missing fields: [{}]", missing.join(", "))).with_response(body),
        );
    }

    if body["client_name"].as_str() != Some(TEST_CLIENT_NAME) {
        return Err(CheckFailure::new("Client name mismatch").with_response(body));
    }

    serde_json::from_value(body.clone())
        .map_err(|e| CheckFailure::new(format!("Malformed status record: {e}")).with_response(body))
}

/// Lists every status record the backend holds.
pub(crate) fn list_records(ctx: &CheckContext<'_>) -> Result<Vec<Value>, CheckFailure> {
    let body = body_json(expect_ok(ctx.send(ctx.client.get(ctx.endpoints.status.clone()))?)?)?;
    match body {
        Value::Array(records) => Ok(records),
        other => Err(CheckFailure::new("Response is not a list").with_response(other)),
    }
}

/// `POST /api/status` creates a record echoing the client name
pub struct CreateRecordCheck;

impl Check for CreateRecordCheck {
    fn name(&self) -> &'static str {
        "Status POST Endpoint"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        create_record(ctx)
            .map(|record| format!("Created status check with ID: {}", record.display_id()))
            .into()
    }
}

/// `GET /api/status` returns a list
pub struct ListRecordsCheck;

impl Check for ListRecordsCheck {
    fn name(&self) -> &'static str {
        "Status GET Endpoint"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        list_records(ctx)
            .map(|records| format!("Retrieved {} status checks", records.len()))
            .into()
    }
}

/// A created record shows up in the next listing, exactly once
pub struct PersistenceCheck;

impl PersistenceCheck {
    fn verify(ctx: &CheckContext<'_>) -> Result<String, CheckFailure> {
        let initial_count = list_records(ctx)
            .map_err(|f| f.context("Could not retrieve initial data"))?
            .len();

        let created = create_record(ctx).map_err(|f| f.context("Could not create test data"))?;

        // Writes may land asynchronously on the backend
        std::thread::sleep(ctx.config.settle_delay);

        let updated = list_records(ctx).map_err(|f| f.context("Could not retrieve updated data"))?;
        let updated_count = updated.len();

        if updated_count != initial_count + 1 {
            return Err(CheckFailure::new(format!(
                "Count mismatch. Expected: {}, Got: {}",
                initial_count + 1,
                updated_count
            )));
        }

        if !updated.iter().any(|item| item.get("id") == Some(&created.id)) {
            return Err(CheckFailure::new(format!(
                "Created item {} not found in retrieved data",
                created.display_id()
            ))
            .with_response(Value::Array(updated)));
        }

        Ok(format!(
            "Data persisted correctly. Count: {initial_count} → {updated_count}"
        ))
    }
}

impl Check for PersistenceCheck {
    fn name(&self) -> &'static str {
        "Status Persistence"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        Self::verify(ctx).into()
    }
}

/// A create request without `client_name` is rejected with 422
pub struct ValidationErrorCheck;

impl Check for ValidationErrorCheck {
    fn name(&self) -> &'static str {
        "Error Handling"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let request = ctx
            .client
            .post(ctx.endpoints.status.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "invalid_field": "test" }));

        match ctx.send(request) {
            Ok(response) if response.status() == StatusCode::UNPROCESSABLE_ENTITY => {
                CheckOutcome::pass("Properly handles validation errors")
            }
            Ok(response) => {
                CheckOutcome::fail(format!("Expected 422, got {}", response.status().as_u16()))
            }
            Err(failure) => failure.into(),
        }
    }
}
