//! The error factory.
//!
//! [`ErrorFactory::create`] resolves an ordered argument list in one pass,
//! left to right, into a status, a message, an optional error to adopt, and
//! a property bag. It then either annotates the adopted error or builds a
//! fresh one from the class matching the status.
//!
//! ```rust
//! use http_errors::{args, create, BaseError};
//!
//! let err = create(args![404, "missing"]).unwrap();
//! assert_eq!((err.status(), err.name(), err.expose()), (404, "NotFoundError", true));
//!
//! let upstream = BaseError::new("Connection refused").with_property("status", -1);
//! let id = upstream.id();
//! let err = create(args![upstream]).unwrap();
//! assert_eq!(err.id(), id);
//! assert_eq!((err.status(), err.expose()), (500, false));
//! ```

use std::backtrace::Backtrace;
use std::error::Error as StdError;

use once_cell::sync::Lazy;
use serde_json::Value;
use uuid::Uuid;

use crate::args::Arg;
use crate::base_error::BaseError;
use crate::class::{ErrorClass, ErrorConstructor};
use crate::config::FactoryConfig;
use crate::error::{ArgKind, FactoryError, FactoryResult};
use crate::http_error::{HttpError, Origin, RESERVED_STATUS_KEYS};
use crate::logging::{log_debug, log_warn};
use crate::registry::{is_error_status, StatusRegistry};
use crate::Properties;

/// Status used when nothing else resolves one, and for untrusted statuses.
pub const DEFAULT_STATUS: u16 = 500;

static DEFAULT_FACTORY: Lazy<ErrorFactory> = Lazy::new(ErrorFactory::default);

/// Create an error with the standard registry. See [`ErrorFactory::create`].
pub fn create(args: impl IntoIterator<Item = Arg>) -> FactoryResult<HttpError> {
    DEFAULT_FACTORY.create(args)
}

/// Construct an error through a class constructor with the standard
/// registry. See [`ErrorFactory::construct`].
pub fn construct(
    constructor: impl Into<ErrorConstructor>,
    args: impl IntoIterator<Item = Arg>,
) -> FactoryResult<HttpError> {
    DEFAULT_FACTORY.construct(constructor.into(), args)
}

/// What the argument scan is for.
#[derive(Clone, Copy)]
enum Mode {
    /// `create`: status comes from the arguments.
    Create,
    /// `new Class(...)`: status is pinned to the class.
    Class(ErrorClass),
}

/// State accumulated while scanning arguments.
#[derive(Default)]
struct Resolution {
    status: Option<u16>,
    untrusted_status: bool,
    message: Option<String>,
    base: Option<BaseError>,
    source: Option<Box<dyn StdError + Send + Sync>>,
    properties: Properties,
    property_status: Option<Value>,
}

/// Builds [`HttpError`]s against one [`StatusRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ErrorFactory {
    registry: StatusRegistry,
    force_backtrace: bool,
}

impl ErrorFactory {
    pub fn new(registry: StatusRegistry) -> Self {
        Self {
            registry,
            force_backtrace: false,
        }
    }

    /// Build a factory from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::Configuration`] if the configuration is
    /// invalid, or [`FactoryError::InvalidRegistration`] if a custom status
    /// is rejected by the registry.
    pub fn from_config(config: &FactoryConfig) -> FactoryResult<Self> {
        config.validate()?;
        let mut registry = StatusRegistry::default();
        for (code, phrase) in &config.custom_statuses {
            registry.register(*code, phrase.as_str())?;
        }
        Ok(Self::new(registry).with_force_backtrace(config.force_backtrace))
    }

    pub fn with_force_backtrace(mut self, force_backtrace: bool) -> Self {
        self.force_backtrace = force_backtrace;
        self
    }

    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    /// Create an error from loosely-typed arguments.
    ///
    /// - a number is accepted only first, and only as an integer in 400–599
    /// - a string sets the message
    /// - a [`BaseError`] is adopted and returned with its identity intact
    /// - a property bag is shallow-copied onto the result; its `status` and
    ///   `statusCode` are used only when nothing else resolved a status
    /// - booleans and arrays are rejected
    ///
    /// Missing pieces default to status 500, the registry phrase, and
    /// `expose = status < 500`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::InvalidArgumentType`] or
    /// [`FactoryError::InvalidStatusArgument`] naming the 1-based position of
    /// the first rejected argument.
    pub fn create(&self, args: impl IntoIterator<Item = Arg>) -> FactoryResult<HttpError> {
        let resolution = Self::scan(args, Mode::Create)?;
        Ok(self.build(resolution, None))
    }

    /// Construct an error through a constructor, like `new NotFound(...)`.
    ///
    /// Accepts the same argument forms as [`create`](Self::create), except
    /// that numbers are rejected (the class fixes the status) and an error
    /// argument becomes the new error's `source` instead of being adopted.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::AbstractConstruction`] for the abstract base,
    /// or an argument error as for [`create`](Self::create).
    pub fn construct(
        &self,
        constructor: ErrorConstructor,
        args: impl IntoIterator<Item = Arg>,
    ) -> FactoryResult<HttpError> {
        let class = match constructor {
            ErrorConstructor::HttpError => {
                return Err(FactoryError::abstract_construction(
                    ErrorConstructor::BASE_NAME,
                ))
            }
            ErrorConstructor::Class(class) => class,
        };
        let resolution = Self::scan(args, Mode::Class(class))?;
        Ok(self.build(resolution, Some(class)))
    }

    fn scan(args: impl IntoIterator<Item = Arg>, mode: Mode) -> FactoryResult<Resolution> {
        let mut resolution = Resolution::default();
        if let Mode::Class(class) = mode {
            resolution.status = Some(class.code());
        }

        for (index, arg) in args.into_iter().enumerate() {
            let position = index + 1;
            match arg {
                Arg::Integer(value) => {
                    let status = Self::status_argument(mode, position, value, || {
                        value.to_string()
                    })?;
                    resolution.status = Some(status);
                }
                Arg::Float(value) => {
                    let integral = value.is_finite() && value.fract() == 0.0;
                    // Saturating cast; anything outside i64 fails the range check anyway.
                    let candidate = if integral { value as i64 } else { i64::MIN };
                    let status = Self::status_argument(mode, position, candidate, || {
                        value.to_string()
                    })?;
                    resolution.status = Some(status);
                }
                Arg::Message(message) => resolution.message = Some(message),
                Arg::Error(base) => match mode {
                    Mode::Create => Self::adopt(&mut resolution, base),
                    Mode::Class(_) => resolution.source = Some(Box::new(base)),
                },
                Arg::Properties(map) => {
                    for (key, value) in map {
                        if RESERVED_STATUS_KEYS.contains(&key.as_str()) {
                            // A null status falls through to statusCode, as on adopted errors.
                            if !value.is_null()
                                && (resolution.property_status.is_none() || key == "status")
                            {
                                resolution.property_status = Some(value);
                            }
                        } else {
                            resolution.properties.insert(key, value);
                        }
                    }
                }
                Arg::Null => {}
                Arg::Bool(_) => {
                    return Err(FactoryError::invalid_argument_type(position, ArgKind::Boolean))
                }
                Arg::Array(_) => {
                    return Err(FactoryError::invalid_argument_type(position, ArgKind::Array))
                }
            }
        }

        Ok(resolution)
    }

    fn status_argument(
        mode: Mode,
        position: usize,
        value: i64,
        written: impl FnOnce() -> String,
    ) -> FactoryResult<u16> {
        if position != 1 || matches!(mode, Mode::Class(_)) {
            return Err(FactoryError::invalid_argument_type(position, ArgKind::Number));
        }
        match u16::try_from(value) {
            Ok(status) if is_error_status(value) => Ok(status),
            _ => Err(FactoryError::invalid_status_argument(position, written())),
        }
    }

    /// Take over `base`. A valid carried status replaces what was resolved so
    /// far; an invalid one marks the status as untrusted.
    fn adopt(resolution: &mut Resolution, base: BaseError) {
        resolution.untrusted_status = false;
        match base.carried_status().map(Self::valid_status) {
            Some(Some(status)) => resolution.status = Some(status),
            Some(None) => resolution.untrusted_status = true,
            None => {}
        }
        resolution.base = Some(base);
    }

    fn valid_status(value: &Value) -> Option<u16> {
        let status = match value.as_i64() {
            Some(status) => status,
            None => {
                let float = value.as_f64()?;
                if !float.is_finite() || float.fract() != 0.0 {
                    return None;
                }
                float as i64
            }
        };
        if is_error_status(status) {
            u16::try_from(status).ok()
        } else {
            None
        }
    }

    fn build(&self, resolution: Resolution, pinned: Option<ErrorClass>) -> HttpError {
        let Resolution {
            status,
            untrusted_status,
            message,
            base,
            source,
            mut properties,
            property_status,
        } = resolution;

        let status = if untrusted_status {
            log_warn!(
                fallback_status = DEFAULT_STATUS,
                "Adopted error carries an invalid status; treating it as an internal error"
            );
            DEFAULT_STATUS
        } else {
            status
                .or_else(|| property_status.as_ref().and_then(Self::valid_status))
                .unwrap_or(DEFAULT_STATUS)
        };

        let (class, class_name, reason_phrase) = match self.registry.resolve(status) {
            Some(entry) => (
                Some(pinned.unwrap_or_else(|| entry.class())),
                entry.class_name().to_string(),
                entry.phrase().to_string(),
            ),
            None => (pinned, "HttpError".to_string(), generic_phrase(status)),
        };

        let mut error = match base {
            Some(base) => {
                let mut inherited = base.properties;
                for key in ["status", "statusCode", "expose", "message", "name"] {
                    inherited.remove(key);
                }
                HttpError {
                    id: base.id,
                    name: base.name,
                    message: message.unwrap_or(base.message),
                    reason_phrase,
                    status,
                    expose: status < 500,
                    properties: inherited,
                    class: None,
                    origin: Origin::Adopted,
                    source: base.source,
                    backtrace: base.backtrace,
                }
            }
            None => HttpError {
                id: Uuid::new_v4(),
                name: class_name,
                message: message.unwrap_or_else(|| reason_phrase.clone()),
                reason_phrase,
                status,
                expose: status < 500,
                properties: Properties::new(),
                class,
                origin: Origin::Constructed,
                source,
                backtrace: self.capture_backtrace(),
            },
        };

        if let Some(expose) = properties.remove("expose") {
            match expose {
                Value::Bool(expose) => error.expose = expose,
                other => log_warn!(value = %other, "Ignoring non-boolean expose property"),
            }
        }
        for key in ["message", "name"] {
            if let Some(value) = properties.remove(key) {
                match (key, value) {
                    ("message", Value::String(message)) => error.message = message,
                    ("name", Value::String(name)) => error.name = name,
                    (key, other) => {
                        log_warn!(key = key, value = %other, "Ignoring non-string property")
                    }
                }
            }
        }
        error.properties.append(&mut properties);

        log_debug!(
            error_id = %error.id,
            status = error.status,
            name = %error.name,
            expose = error.expose,
            adopted = error.is_adopted(),
            "Created HTTP error"
        );

        error
    }

    fn capture_backtrace(&self) -> Backtrace {
        if self.force_backtrace {
            Backtrace::force_capture()
        } else {
            Backtrace::capture()
        }
    }
}

/// Phrase for a status the registry cannot resolve.
fn generic_phrase(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or(if status < 500 {
            "Bad Request"
        } else {
            "Internal Server Error"
        })
        .to_string()
}
