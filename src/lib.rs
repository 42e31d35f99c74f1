//! # http-errors
//!
//! Create errors that carry HTTP status semantics: a numeric status, its
//! canonical reason phrase, a derived error name, and an exposure policy
//! telling serving code whether the message is safe to show a client.
//!
//! ## Key Features
//!
//! - **Factory**: one entry point resolving loosely-typed arguments into an error
//! - **Class Hierarchy**: one class per standard 4xx/5xx code, by name or by code
//! - **Adoption**: annotate an existing error instead of replacing it
//! - **Exposure Policy**: 4xx exposed, 5xx hidden, overridable per error
//! - **Extensible Registry**: register custom status codes before use
//!
//! ## Example
//!
//! ```rust
//! use http_errors::{args, construct, create, is_http_error, ErrorClass, ErrorConstructor};
//! use serde_json::json;
//!
//! # fn example() -> http_errors::FactoryResult<()> {
//! let err = create(args![404, "no such user", json!({ "user_id": 7 })])?;
//! assert_eq!(err.status(), 404);
//! assert_eq!(err.name(), "NotFoundError");
//! assert!(err.expose());
//! assert_eq!(err.property("user_id"), Some(&json!(7)));
//! assert!(is_http_error(&err));
//!
//! let err = construct(ErrorClass::INTERNAL_SERVER_ERROR, args![])?;
//! assert_eq!(err.client_message(), "Internal Server Error");
//! assert!(err.is_instance_of(ErrorConstructor::HttpError));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod args;
pub mod base_error;
pub mod class;
pub mod config;
pub mod error;
pub mod factory;
pub mod http_error;
pub mod registry;

#[cfg(test)]
pub mod tests;

/// Property bag copied onto errors.
pub type Properties = serde_json::Map<String, serde_json::Value>;

// Re-export main types
pub use args::Arg;
pub use base_error::BaseError;
pub use class::{ErrorClass, ErrorConstructor};
pub use config::FactoryConfig;
pub use error::{ArgKind, ErrorCategory, ErrorSeverity, FactoryError, FactoryResult};
pub use factory::{construct, create, ErrorFactory, DEFAULT_STATUS};
pub use http_error::{is_http_error, HttpError, Origin};
pub use registry::{StatusEntry, StatusRegistry};
