//! Test helper utilities shared across unit test modules.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use serde_json::Value;

use crate::base_error::BaseError;
use crate::factory::ErrorFactory;
use crate::registry::StatusRegistry;
use crate::Properties;

/// Build a property bag from a `json!` object literal.
///
/// # Panics
///
/// Panics if `value` is not a JSON object (test failure is appropriate).
pub fn props(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A plain error carrying a `status` property, as an upstream library would produce.
pub fn upstream_error(message: &str, status: impl Into<Value>) -> BaseError {
    BaseError::new(message).with_property("status", status)
}

/// Factory with `420 Enhance Your Calm` registered on top of the standard table.
pub fn factory_with_custom_status() -> ErrorFactory {
    let mut registry = StatusRegistry::default();
    registry
        .register(420, "Enhance Your Calm")
        .expect("420 is a valid custom status");
    ErrorFactory::new(registry)
}
