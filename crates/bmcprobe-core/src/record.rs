//! Check outcomes and the backend records they inspect

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Immutable record of a single check's outcome
///
/// The response payload is only kept for failed checks, where it helps
/// diagnose what the backend actually returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    name: String,
    success: bool,
    #[serde(default)]
    detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<Value>,
    recorded_at: DateTime<Utc>,
}

impl CheckResult {
    /// Records a check outcome stamped with the current time
    pub fn new(
        name: impl Into<String>,
        success: bool,
        detail: impl Into<String>,
        response: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            success,
            detail: detail.into(),
            response: if success { None } else { response },
            recorded_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Status record as returned by `POST /api/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Backend-generated identifier (kept as raw JSON for comparison)
    pub id: Value,
    pub client_name: String,
    pub timestamp: Value,
}

impl StatusRecord {
    /// Fields every created record must carry
    pub const REQUIRED_FIELDS: [&'static str; 3] = ["id", "client_name", "timestamp"];

    /// Identifier rendered for humans (strings without quotes)
    pub fn display_id(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
