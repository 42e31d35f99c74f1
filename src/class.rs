//! Error class hierarchy.
//!
//! Every registered status code has one [`ErrorClass`]. The standard ones are
//! available as constants (`ErrorClass::NOT_FOUND`) and through named or
//! numeric lookup, which always resolve to the same value:
//!
//! ```rust
//! use http_errors::ErrorClass;
//!
//! assert_eq!(ErrorClass::from_code(404), Some(ErrorClass::NOT_FOUND));
//! assert_eq!(ErrorClass::from_name("NotFound"), Some(ErrorClass::NOT_FOUND));
//! ```
//!
//! [`ErrorConstructor`] is the constructible side of the hierarchy: the
//! abstract `HttpError` base, or one concrete class.

use std::fmt;

use crate::registry::{StatusEntry, StatusRegistry};

/// A concrete error class, identified by its status code.
///
/// Name, phrase and identifier live in the [`StatusRegistry`] the class was
/// obtained from; use [`StatusRegistry::entry`] to read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorClass {
    code: u16,
}

impl ErrorClass {
    pub(crate) const fn new_unchecked(code: u16) -> Self {
        Self { code }
    }

    /// Standard class for exactly `code`. Unmapped codes have no class.
    pub fn from_code(code: u16) -> Option<Self> {
        StatusRegistry::standard().class_for_code(code)
    }

    /// Standard class by named-access key (`"NotFound"`, `"ImATeapot"`).
    pub fn from_name(identifier: &str) -> Option<Self> {
        StatusRegistry::standard().class_by_name(identifier)
    }

    /// Status code fixed for every instance of this class.
    pub const fn code(self) -> u16 {
        self.code
    }

    pub const fn default_expose(self) -> bool {
        self.code < 500
    }

    /// Class name as registered in `registry`, including custom codes.
    pub fn name_in(self, registry: &StatusRegistry) -> Option<&str> {
        registry.entry(self.code).map(StatusEntry::class_name)
    }
}

/// Renders the class name from the standard table only; a custom code prints
/// as `HttpError[code]`. Use [`ErrorClass::name_in`] with the factory's
/// registry to name custom classes.
impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match StatusRegistry::standard().entry(self.code) {
            Some(entry) => f.write_str(entry.class_name()),
            None => write!(f, "HttpError[{}]", self.code),
        }
    }
}

/// Something that can be asked to construct an error.
///
/// The abstract base exists for [`HttpError::is_instance_of`] checks only;
/// constructing it fails.
///
/// [`HttpError::is_instance_of`]: crate::HttpError::is_instance_of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorConstructor {
    /// Abstract base of every class.
    HttpError,
    /// One concrete class.
    Class(ErrorClass),
}

impl ErrorConstructor {
    /// Name of the abstract base.
    pub const BASE_NAME: &'static str = "HttpError";

    /// Constructor by name against the standard registry.
    ///
    /// `"HttpError"` yields the abstract base; anything else is looked up as
    /// a class identifier.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::by_name_in(StatusRegistry::standard(), name)
    }

    pub fn by_name_in(registry: &StatusRegistry, name: &str) -> Option<Self> {
        if name == Self::BASE_NAME {
            return Some(Self::HttpError);
        }
        registry.class_by_name(name).map(Self::Class)
    }

    /// Constructor by numeric key against the standard registry.
    pub fn by_code(code: u16) -> Option<Self> {
        ErrorClass::from_code(code).map(Self::Class)
    }

    pub fn is_abstract(self) -> bool {
        matches!(self, Self::HttpError)
    }

    pub fn class(self) -> Option<ErrorClass> {
        match self {
            Self::HttpError => None,
            Self::Class(class) => Some(class),
        }
    }
}

impl From<ErrorClass> for ErrorConstructor {
    fn from(class: ErrorClass) -> Self {
        Self::Class(class)
    }
}
