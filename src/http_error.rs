//! The error value produced by the factory.

use std::any::Any;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::class::{ErrorClass, ErrorConstructor};
use crate::logging::log_debug;
use crate::Properties;

/// Property keys that alias the resolved status and can never be overwritten
/// through a property bag.
pub const RESERVED_STATUS_KEYS: [&str; 2] = ["status", "statusCode"];

/// How an [`HttpError`] came into being.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Freshly built from an [`ErrorClass`].
    Constructed,
    /// A caller-supplied [`BaseError`](crate::BaseError) annotated in place.
    /// Its id, name, message and backtrace are the caller's.
    Adopted,
}

/// An error carrying HTTP status semantics.
///
/// `status` and `status_code` always agree and lie in 400–599. `expose`
/// says whether `message` is safe to show to a client.
pub struct HttpError {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) reason_phrase: String,
    pub(crate) status: u16,
    pub(crate) expose: bool,
    pub(crate) properties: Properties,
    pub(crate) class: Option<ErrorClass>,
    pub(crate) origin: Origin,
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(crate) backtrace: Backtrace,
}

impl HttpError {
    /// Identity of the error object. Adopted errors keep the id of the
    /// [`BaseError`](crate::BaseError) they were built from.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Alias of [`status`](Self::status).
    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn expose(&self) -> bool {
        self.expose
    }

    /// Canonical phrase of the status (or its century) at creation time.
    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    /// Message safe to send to a client: the message itself when exposed,
    /// the bare reason phrase otherwise.
    pub fn client_message(&self) -> &str {
        if self.expose {
            &self.message
        } else {
            &self.reason_phrase
        }
    }

    /// The status as an [`http::StatusCode`] for response building.
    pub fn http_status(&self) -> http::StatusCode {
        http::StatusCode::from_u16(self.status).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Class this error was constructed from. `None` for adopted errors.
    pub fn class(&self) -> Option<ErrorClass> {
        self.class
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_adopted(&self) -> bool {
        self.origin == Origin::Adopted
    }

    /// `instanceof` semantics: constructed errors are instances of the
    /// abstract base and of their class; adopted errors of neither.
    pub fn is_instance_of(&self, constructor: ErrorConstructor) -> bool {
        match (constructor, self.class) {
            (_, None) => false,
            (ErrorConstructor::HttpError, Some(_)) => true,
            (ErrorConstructor::Class(wanted), Some(class)) => wanted == class,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status < 500
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Extra properties copied from property bags and adopted errors.
    /// Never contains `status`, `statusCode` or `expose`.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_expose(&mut self, expose: bool) {
        self.expose = expose;
    }

    /// Set an extra property. Returns `false`, leaving the error untouched,
    /// for the reserved status keys.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if RESERVED_STATUS_KEYS.contains(&key.as_str()) {
            log_debug!(key = %key, status = self.status, "Ignoring reserved status property");
            return false;
        }
        self.properties.insert(key, value.into());
        true
    }

    /// Find an `HttpError` behind an error trait object.
    pub fn downcast_ref<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a HttpError> {
        error.downcast_ref::<HttpError>()
    }
}

/// Whether `value` is an error produced by this crate, whichever path
/// produced it.
///
/// Looks through `Box` and `Option`. Plain maps, primitives and
/// [`BaseError`](crate::BaseError)s that never went through the factory are
/// not HTTP errors, even when they carry a `status`.
pub fn is_http_error(value: &dyn Any) -> bool {
    value.is::<HttpError>()
        || value.is::<Box<HttpError>>()
        || value
            .downcast_ref::<Option<HttpError>>()
            .is_some_and(Option::is_some)
}

impl fmt::Debug for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpError")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("message", &self.message)
            .field("status", &self.status)
            .field("expose", &self.expose)
            .field("properties", &self.properties)
            .field("class", &self.class)
            .field("origin", &self.origin)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl StdError for HttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}
