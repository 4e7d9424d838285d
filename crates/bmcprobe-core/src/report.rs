//! Machine-readable snapshot of a harness run

use crate::record::CheckResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report schema version
pub const SCHEMA_VERSION: &str = "1.0";

/// JSON output schema for `--json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: String,
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub success: bool,
    pub passed: usize,
    pub total: usize,
    pub results: Vec<CheckResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_round_trips_through_json() {
        let report = Report {
            schema_version: SCHEMA_VERSION.to_string(),
            base_url: "http://localhost:8001/".to_string(),
            started_at: None,
            finished_at: None,
            success: false,
            passed: 0,
            total: 1,
            results: vec![CheckResult::new(
                "Server Connectivity",
                false,
                "Connection failed: refused",
                None,
            )],
        };

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(!json.contains("started_at"));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results, report.results);
        assert_eq!(parsed.total, 1);
    }
}
