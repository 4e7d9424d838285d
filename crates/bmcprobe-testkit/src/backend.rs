//! Fake backend speaking the status-check API
//!
//! [`FakeBackend`] mounts mocks on a dedicated mockito server for every route
//! the harness touches. The status collection is stateful: records created
//! through `POST /api/status` show up in later `GET /api/status` calls.
//! Builder knobs break one part of the contract at a time.
//!
//! # Examples
//!
//! ```no_run
//! use bmcprobe_testkit::FakeBackend;
//!
//! let backend = FakeBackend::builder().omit_record_field("id").build();
//! // point the harness at backend.url() ...
//! assert!(backend.records().is_empty());
//! ```

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Game routes the frontend expects; unimplemented unless requested
pub const GAME_ROUTES: [&str; 8] = [
    "/api/taps",
    "/api/party-rooms",
    "/api/continents",
    "/api/popwars",
    "/api/leaderboard",
    "/api/combos",
    "/api/users",
    "/api/realtime",
];

/// Timestamp stamped on every fake record
pub const RECORD_TIMESTAMP: &str = "2026-01-12T10:00:00";

type Records = Arc<Mutex<Vec<Value>>>;

fn lock(records: &Mutex<Vec<Value>>) -> MutexGuard<'_, Vec<Value>> {
    // A panicking test must not take the fake backend down with it
    records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Configures which parts of the backend contract the fake honours
#[derive(Debug, Clone)]
pub struct FakeBackendBuilder {
    docs_status: usize,
    root_message: String,
    cors_allow_origin: Option<String>,
    cors_allow_credentials: Option<String>,
    omit_record_field: Option<String>,
    persisted_copies: usize,
    foreign_id: bool,
    validation_status: usize,
    game_endpoints: bool,
    seed: Vec<Value>,
}

impl Default for FakeBackendBuilder {
    fn default() -> Self {
        Self {
            docs_status: 200,
            root_message: "Hello World".to_string(),
            cors_allow_origin: Some("*".to_string()),
            cors_allow_credentials: Some("true".to_string()),
            omit_record_field: None,
            persisted_copies: 1,
            foreign_id: false,
            validation_status: 422,
            game_endpoints: false,
            seed: Vec::new(),
        }
    }
}

impl FakeBackendBuilder {
    /// Status served at `GET /docs`
    pub fn docs_status(mut self, status: usize) -> Self {
        self.docs_status = status;
        self
    }

    /// `message` served at `GET /api/`
    pub fn root_message(mut self, message: &str) -> Self {
        self.root_message = message.to_string();
        self
    }

    /// CORS headers on the API root; `None` leaves a header out
    pub fn cors(mut self, allow_origin: Option<&str>, allow_credentials: Option<&str>) -> Self {
        self.cors_allow_origin = allow_origin.map(str::to_string);
        self.cors_allow_credentials = allow_credentials.map(str::to_string);
        self
    }

    /// Drops `field` from create responses (the stored record keeps it)
    pub fn omit_record_field(mut self, field: &str) -> Self {
        self.omit_record_field = Some(field.to_string());
        self
    }

    /// How many copies of each created record land in the collection
    pub fn persisted_copies(mut self, copies: usize) -> Self {
        self.persisted_copies = copies;
        self
    }

    /// Stores created records under an id different from the one returned
    pub fn persist_with_foreign_id(mut self) -> Self {
        self.foreign_id = true;
        self
    }

    /// Status answered to a create request without `client_name`
    pub fn validation_status(mut self, status: usize) -> Self {
        self.validation_status = status;
        self
    }

    /// Serves every [`GAME_ROUTES`] entry with 200 instead of 404
    pub fn with_game_endpoints(mut self) -> Self {
        self.game_endpoints = true;
        self
    }

    /// Adds a record present before the run starts
    pub fn seed_record(mut self, record: Value) -> Self {
        self.seed.push(record);
        self
    }

    /// Starts the mock server and mounts every route
    pub fn build(self) -> FakeBackend {
        let mut server = Server::new();
        let records: Records = Arc::new(Mutex::new(self.seed.clone()));
        let mut mocks = Vec::new();

        mocks.push(
            server
                .mock("GET", "/docs")
                .with_status(self.docs_status)
                .with_header("content-type", "text/html")
                .with_body("<!DOCTYPE html><title>API docs</title>")
                .create(),
        );

        let mut root = server
            .mock("GET", "/api/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "message": self.root_message }).to_string());
        if let Some(origin) = &self.cors_allow_origin {
            root = root.with_header("access-control-allow-origin", origin);
        }
        if let Some(credentials) = &self.cors_allow_credentials {
            root = root.with_header("access-control-allow-credentials", credentials);
        }
        mocks.push(root.create());

        let listed = Arc::clone(&records);
        mocks.push(
            server
                .mock("GET", "/api/status")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body_from_request(move |_| {
                    serde_json::to_vec(&*lock(&listed)).unwrap_or_default()
                })
                .create(),
        );

        mocks.push(self.create_mock(&mut server, Arc::clone(&records)));

        mocks.push(
            server
                .mock("POST", "/api/status")
                .match_body(Matcher::PartialJson(json!({ "invalid_field": "test" })))
                .with_status(self.validation_status)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "detail": [{
                            "loc": ["body", "client_name"],
                            "msg": "field required",
                            "type": "value_error.missing"
                        }]
                    })
                    .to_string(),
                )
                .create(),
        );

        for route in GAME_ROUTES {
            let mock = if self.game_endpoints {
                server.mock("GET", route).with_status(200).with_body("[]")
            } else {
                server
                    .mock("GET", route)
                    .with_status(404)
                    .with_body(r#"{"detail":"Not Found"}"#)
            };
            mocks.push(mock.with_header("content-type", "application/json").create());
        }

        FakeBackend {
            server,
            records,
            _mocks: mocks,
        }
    }

    fn create_mock(&self, server: &mut ServerGuard, records: Records) -> Mock {
        let counter = AtomicU64::new(0);
        let omit = self.omit_record_field.clone();
        let copies = self.persisted_copies;
        let foreign_id = self.foreign_id;

        server
            .mock("POST", "/api/status")
            .match_body(Matcher::Regex(r#""client_name"\s*:"#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |request| {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                let client_name = request
                    .body()
                    .ok()
                    .and_then(|body| serde_json::from_slice::<Value>(body).ok())
                    .and_then(|body| body.get("client_name").cloned())
                    .unwrap_or(Value::Null);

                let record = json!({
                    "id": format!("rec-{n}"),
                    "client_name": client_name,
                    "timestamp": RECORD_TIMESTAMP,
                });

                let mut stored = record.clone();
                if foreign_id {
                    stored["id"] = json!(format!("foreign-{n}"));
                }
                lock(&records).extend(std::iter::repeat_n(stored, copies));

                let mut response = record;
                if let (Some(field), Some(fields)) = (&omit, response.as_object_mut()) {
                    fields.remove(field);
                }
                response.to_string().into_bytes()
            })
            .create()
    }
}

/// Running fake backend; routes disappear when it is dropped
pub struct FakeBackend {
    server: ServerGuard,
    records: Records,
    _mocks: Vec<Mock>,
}

impl FakeBackend {
    pub fn builder() -> FakeBackendBuilder {
        FakeBackendBuilder::default()
    }

    /// Base URL to point the harness at
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Snapshot of the status collection
    pub fn records(&self) -> Vec<Value> {
        lock(&self.records).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    /// Minimal HTTP/1.1 exchange so these tests need no client crate
    fn request(url: &str, method: &str, path: &str, body: Option<&str>) -> String {
        let addr = url.trim_start_matches("http://");
        let mut stream = TcpStream::connect(addr).unwrap();
        let body = body.unwrap_or("");
        write!(
            stream,
            "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn test_created_records_are_listed() {
        let backend = FakeBackend::builder().build();
        let url = backend.url();

        let created = request(&url, "POST", "/api/status", Some(r#"{"client_name":"cat"}"#));
        assert!(created.starts_with("HTTP/1.1 200"));
        assert!(created.contains(r#""id":"rec-1""#));

        let listed = request(&url, "GET", "/api/status", None);
        assert!(listed.contains(r#""client_name":"cat""#));
        assert_eq!(backend.records().len(), 1);
    }

    #[test]
    fn test_missing_client_name_is_rejected() {
        let backend = FakeBackend::builder().build();

        let response = request(
            &backend.url(),
            "POST",
            "/api/status",
            Some(r#"{"invalid_field":"test"}"#),
        );

        assert!(response.starts_with("HTTP/1.1 422"));
        assert!(backend.records().is_empty());
    }

    #[test]
    fn test_game_routes_are_404_by_default() {
        let backend = FakeBackend::builder().build();
        let response = request(&backend.url(), "GET", "/api/leaderboard", None);
        assert!(response.starts_with("HTTP/1.1 404"));
    }

    #[test]
    fn test_omitted_field_is_still_stored() {
        let backend = FakeBackend::builder().omit_record_field("id").build();

        let created = request(
            &backend.url(),
            "POST",
            "/api/status",
            Some(r#"{"client_name":"cat"}"#),
        );

        assert!(!created.contains(r#""id""#));
        assert_eq!(backend.records()[0]["id"], "rec-1");
    }
}
