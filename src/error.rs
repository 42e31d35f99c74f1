//! Error types for factory operations.
//!
//! These are the errors the library itself raises when it is used incorrectly.
//! They are distinct from [`HttpError`](crate::HttpError), which is the value
//! the factory *produces*.
//!
//! # Error Types
//!
//! The main error type is [`FactoryError`], which covers all failure modes:
//! - An argument of an unsupported type, or in an unsupported position
//! - A numeric status argument outside 400–599
//! - Construction of the abstract `HttpError` base
//! - Rejected custom status registration
//! - Invalid factory configuration
//!
//! # Error Handling Example
//!
//! ```rust
//! use http_errors::{args, create};
//!
//! match create(args!["LOL", 404]) {
//!     Err(err) if err.is_invalid_argument() => {
//!         assert_eq!(err.to_string(), "argument #2 unsupported type number");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! # Result Type
//!
//! Use [`FactoryResult<T>`] as a convenient alias for `Result<T, FactoryError>`.

use std::fmt;

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`FactoryError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller passed something the factory cannot accept.
    ///
    /// Fix the call site: wrong argument type, bad status, bad config.
    Client,

    /// Misuse of the class hierarchy itself.
    ///
    /// Constructing the abstract base is a programming error.
    Internal,
}

/// Severity level for logging and alerting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed and indicates a bug in the caller.
    Error,

    /// Input was rejected but the process is unaffected.
    Warning,
}

/// Type tag of a factory argument, used in error messages.
///
/// Rendered the way a loosely-typed caller would name it
/// (`number`, `boolean`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Number,
    String,
    Error,
    Object,
    Null,
    Boolean,
    Array,
}

impl ArgKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Error => "error",
            Self::Object => "object",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Factory error types
// ============================================================================

/// Convenient result type for factory operations.
pub type FactoryResult<T> = std::result::Result<T, FactoryError>;

/// Errors raised by the factory, the class constructors, and the registry.
///
/// | Variant | Category | Severity |
/// |---------|----------|----------|
/// | `InvalidArgumentType` | Client | Warning |
/// | `InvalidStatusArgument` | Client | Warning |
/// | `AbstractConstruction` | Internal | Error |
/// | `InvalidRegistration` | Client | Error |
/// | `Configuration` | Client | Error |
///
/// Use the constructor methods, which log the error at creation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// An argument has a type the factory does not accept in its position.
    ///
    /// Positions are 1-based.
    #[error("argument #{position} unsupported type {kind}")]
    InvalidArgumentType {
        /// 1-based index of the offending argument.
        position: usize,
        /// The argument's actual type.
        kind: ArgKind,
    },

    /// A numeric status argument that is not an integer in 400–599.
    #[error(
        "argument #{position} unsupported type number: status {status} is not an integer between 400 and 599"
    )]
    InvalidStatusArgument {
        /// 1-based index of the offending argument.
        position: usize,
        /// The rejected value, as written by the caller.
        status: String,
    },

    /// The abstract base class was constructed directly.
    #[error("cannot construct abstract class {class}")]
    AbstractConstruction {
        /// Name of the abstract class.
        class: &'static str,
    },

    /// A custom status code could not be registered.
    #[error("cannot register status {code}: {reason}")]
    InvalidRegistration {
        /// The code that was rejected.
        code: u16,
        /// Why it was rejected.
        reason: String,
    },

    /// Factory configuration is invalid.
    #[error("factory configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl FactoryError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgumentType { .. } => ErrorCategory::Client,
            Self::InvalidStatusArgument { .. } => ErrorCategory::Client,
            Self::AbstractConstruction { .. } => ErrorCategory::Internal,
            Self::InvalidRegistration { .. } => ErrorCategory::Client,
            Self::Configuration { .. } => ErrorCategory::Client,
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgumentType { .. } | Self::InvalidStatusArgument { .. } => {
                ErrorSeverity::Warning
            }
            Self::AbstractConstruction { .. }
            | Self::InvalidRegistration { .. }
            | Self::Configuration { .. } => ErrorSeverity::Error,
        }
    }

    /// Whether this error reports an argument of unsupported type or position.
    ///
    /// Both `InvalidArgumentType` and `InvalidStatusArgument` qualify: a bad
    /// numeric status is a number where no acceptable number could go.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgumentType { .. } | Self::InvalidStatusArgument { .. }
        )
    }

    /// 1-based position of the offending argument, if this is an argument error.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidArgumentType { position, .. }
            | Self::InvalidStatusArgument { position, .. } => Some(*position),
            _ => None,
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    /// Create an unsupported argument error (logs at WARN level).
    pub fn invalid_argument_type(position: usize, kind: ArgKind) -> Self {
        log_warn!(
            error_type = "invalid_argument_type",
            position = position,
            kind = %kind,
            "Unsupported argument passed to error factory"
        );
        Self::InvalidArgumentType { position, kind }
    }

    pub fn invalid_status_argument(position: usize, status: impl fmt::Display) -> Self {
        let status = status.to_string();
        log_warn!(
            error_type = "invalid_status_argument",
            position = position,
            status = %status,
            "Non-error status code passed to error factory; use only 4xx or 5xx status codes"
        );
        Self::InvalidStatusArgument { position, status }
    }

    pub fn abstract_construction(class: &'static str) -> Self {
        log_error!(
            error_type = "abstract_construction",
            class = class,
            "Attempted to construct abstract error class"
        );
        Self::AbstractConstruction { class }
    }

    pub fn invalid_registration(code: u16, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log_error!(
            error_type = "invalid_registration",
            code = code,
            reason = %reason,
            "Custom status registration rejected"
        );
        Self::InvalidRegistration { code, reason }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Error factory configuration validation failed"
        );
        Self::Configuration { message }
    }
}
