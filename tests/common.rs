//! Test helper utilities for http-errors integration tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use http_errors::{BaseError, HttpError};
use serde_json::json;

/// A plain error as an upstream client library would hand it over.
pub fn upstream_error(message: &str, status: i64) -> BaseError {
    BaseError::new(message)
        .with_property("status", status)
        .with_property("upstream", json!("billing-service"))
}

/// Assert the data-model invariants every produced error must satisfy.
pub fn assert_http_error_invariants(err: &HttpError) {
    assert_eq!(err.status(), err.status_code(), "status aliases must agree");
    assert!(
        (400..=599).contains(&err.status()),
        "status {} outside the error range",
        err.status()
    );
    assert!(err.properties().get("status").is_none());
    assert!(err.properties().get("statusCode").is_none());
    assert!(http_errors::is_http_error(err));
}
