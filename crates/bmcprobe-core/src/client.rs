//! HTTP client construction for backend checks

use reqwest::blocking::Client;
use std::time::Duration;

/// User agent sent with every check request
pub const USER_AGENT: &str = concat!("bmcprobe/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by every check in a run
///
/// The client keeps its connection pool across requests; individual requests
/// may still override `timeout` (the coverage check does).
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        let client = build_client(Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("bmcprobe/"));
    }

    #[test]
    fn test_client_sends_user_agent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/ua")
            .match_header("user-agent", USER_AGENT)
            .with_status(204)
            .create();

        let client = build_client(Duration::from_secs(5)).unwrap();
        let response = client.get(format!("{}/ua", server.url())).send().unwrap();

        mock.assert();
        assert_eq!(response.status().as_u16(), 204);
    }
}
