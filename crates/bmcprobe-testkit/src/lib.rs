//! Test utilities for bmcprobe
//!
//! This crate provides a fake backend built on mockito plus small helpers
//! shared by the workspace's unit and integration tests.

pub mod backend;

pub use backend::{FakeBackend, FakeBackendBuilder, GAME_ROUTES};

use std::net::TcpListener;

/// Returns a base URL nothing is listening on
///
/// Binds an ephemeral port and releases it immediately, so connections to
/// the returned URL are refused.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
