//! Plain errors that the factory can adopt.
//!
//! A [`BaseError`] is the loosely-annotated error a caller already holds:
//! a name, a message, a backtrace and a bag of properties that may include a
//! `status` nobody has validated yet. Passing it to the factory turns it into
//! an [`HttpError`](crate::HttpError) that keeps the same identity.

use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::Properties;

/// Name given to plain errors that were not named explicitly.
pub const DEFAULT_ERROR_NAME: &str = "Error";

/// A plain error, not yet marked as an HTTP error.
pub struct BaseError {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) properties: Properties,
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(crate) backtrace: Backtrace,
}

impl BaseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::named(DEFAULT_ERROR_NAME, message)
    }

    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            message: message.into(),
            properties: Properties::new(),
            source: None,
            backtrace: Backtrace::capture(),
        }
    }

    /// Wrap any error; its `Display` output becomes the message and the
    /// error itself becomes the `source`.
    pub fn wrap<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut base = Self::new(error.to_string());
        base.source = Some(Box::new(error));
        base
    }

    /// Builder-style [`set_property`](Self::set_property).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Set an arbitrary property. `status` and `statusCode` are taken at face
    /// value here; the factory validates them on adoption.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Status carried by this error: `status`, or `statusCode` when `status`
    /// is missing or null.
    pub fn carried_status(&self) -> Option<&Value> {
        ["status", "statusCode"]
            .iter()
            .filter_map(|key| self.properties.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Debug for BaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseError")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("message", &self.message)
            .field("properties", &self.properties)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl fmt::Display for BaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl StdError for BaseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}
