//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - Stubbed HTTP server for client tests
//! - [`fixture`] - Load JSON documents from `tests/fixtures`

#![allow(dead_code)]

pub mod http_mock;

use serde_json::Value;

/// Load a JSON fixture by file name.
pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("parse {path}: {e}"))
}
