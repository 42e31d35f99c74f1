//! Status registry: HTTP status code -> canonical reason phrase.
//!
//! The standard table covers every 4xx and 5xx code defined for HTTP. A
//! consumer may extend an owned [`StatusRegistry`] with custom codes before
//! handing it to an [`ErrorFactory`](crate::ErrorFactory); the shared
//! [`StatusRegistry::standard()`] instance is built once and never changes.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::class::ErrorClass;
use crate::error::{FactoryError, FactoryResult};
use crate::logging::log_debug;

/// Lowest status code that can carry an error class.
pub const MIN_ERROR_STATUS: u16 = 400;
/// Highest status code that can carry an error class.
pub const MAX_ERROR_STATUS: u16 = 599;

macro_rules! standard_statuses {
    ($($code:literal => $konst:ident, $phrase:literal;)+) => {
        /// Standard 4xx/5xx codes and their reason phrases, in code order.
        pub(crate) const STANDARD_STATUSES: &[(u16, &str)] = &[$(($code, $phrase)),+];

        impl ErrorClass {
            $(
                #[doc = concat!("`", stringify!($code), " ", $phrase, "`")]
                pub const $konst: ErrorClass = ErrorClass::new_unchecked($code);
            )+
        }
    };
}

standard_statuses! {
    400 => BAD_REQUEST, "Bad Request";
    401 => UNAUTHORIZED, "Unauthorized";
    402 => PAYMENT_REQUIRED, "Payment Required";
    403 => FORBIDDEN, "Forbidden";
    404 => NOT_FOUND, "Not Found";
    405 => METHOD_NOT_ALLOWED, "Method Not Allowed";
    406 => NOT_ACCEPTABLE, "Not Acceptable";
    407 => PROXY_AUTHENTICATION_REQUIRED, "Proxy Authentication Required";
    408 => REQUEST_TIMEOUT, "Request Timeout";
    409 => CONFLICT, "Conflict";
    410 => GONE, "Gone";
    411 => LENGTH_REQUIRED, "Length Required";
    412 => PRECONDITION_FAILED, "Precondition Failed";
    413 => PAYLOAD_TOO_LARGE, "Payload Too Large";
    414 => URI_TOO_LONG, "URI Too Long";
    415 => UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type";
    416 => RANGE_NOT_SATISFIABLE, "Range Not Satisfiable";
    417 => EXPECTATION_FAILED, "Expectation Failed";
    418 => IM_A_TEAPOT, "I'm a Teapot";
    421 => MISDIRECTED_REQUEST, "Misdirected Request";
    422 => UNPROCESSABLE_ENTITY, "Unprocessable Entity";
    423 => LOCKED, "Locked";
    424 => FAILED_DEPENDENCY, "Failed Dependency";
    425 => TOO_EARLY, "Too Early";
    426 => UPGRADE_REQUIRED, "Upgrade Required";
    428 => PRECONDITION_REQUIRED, "Precondition Required";
    429 => TOO_MANY_REQUESTS, "Too Many Requests";
    431 => REQUEST_HEADER_FIELDS_TOO_LARGE, "Request Header Fields Too Large";
    451 => UNAVAILABLE_FOR_LEGAL_REASONS, "Unavailable For Legal Reasons";
    500 => INTERNAL_SERVER_ERROR, "Internal Server Error";
    501 => NOT_IMPLEMENTED, "Not Implemented";
    502 => BAD_GATEWAY, "Bad Gateway";
    503 => SERVICE_UNAVAILABLE, "Service Unavailable";
    504 => GATEWAY_TIMEOUT, "Gateway Timeout";
    505 => HTTP_VERSION_NOT_SUPPORTED, "HTTP Version Not Supported";
    506 => VARIANT_ALSO_NEGOTIATES, "Variant Also Negotiates";
    507 => INSUFFICIENT_STORAGE, "Insufficient Storage";
    508 => LOOP_DETECTED, "Loop Detected";
    509 => BANDWIDTH_LIMIT_EXCEEDED, "Bandwidth Limit Exceeded";
    510 => NOT_EXTENDED, "Not Extended";
    511 => NETWORK_AUTHENTICATION_REQUIRED, "Network Authentication Required";
}

static STANDARD: Lazy<StatusRegistry> = Lazy::new(|| {
    let entries = STANDARD_STATUSES
        .iter()
        .map(|&(code, phrase)| (code, StatusEntry::new(code, phrase)))
        .collect();
    StatusRegistry { entries }
});

/// Whether `code` lies in the error range 400–599.
pub fn is_error_status(code: i64) -> bool {
    (i64::from(MIN_ERROR_STATUS)..=i64::from(MAX_ERROR_STATUS)).contains(&code)
}

/// Turn a reason phrase into a PascalCase identifier.
///
/// Each space-separated token gets an upper-case first character, tokens are
/// joined, and anything that is not ASCII alphanumeric or `_` is dropped:
/// `"I'm a Teapot"` becomes `"ImATeapot"`.
pub fn to_identifier(phrase: &str) -> String {
    phrase
        .split(' ')
        .flat_map(|token| {
            let mut chars = token.chars();
            let first = chars.next().map(|c| c.to_ascii_uppercase());
            first.into_iter().chain(chars)
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Class name for an identifier: append `Error` unless it already ends so.
pub fn to_class_name(identifier: &str) -> String {
    if identifier.ends_with("Error") {
        identifier.to_string()
    } else {
        format!("{identifier}Error")
    }
}

/// One registered status code with everything derived from its phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    code: u16,
    phrase: String,
    identifier: String,
    class_name: String,
}

impl StatusEntry {
    fn new(code: u16, phrase: &str) -> Self {
        let identifier = to_identifier(phrase);
        let class_name = to_class_name(&identifier);
        Self {
            code,
            phrase: phrase.to_string(),
            identifier,
            class_name,
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Canonical reason phrase, e.g. `"Not Found"`.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Named-access key, e.g. `"NotFound"`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Error name given to instances, e.g. `"NotFoundError"`.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn class(&self) -> ErrorClass {
        ErrorClass::new_unchecked(self.code)
    }

    /// Client errors are exposed by default, server errors are not.
    pub fn default_expose(&self) -> bool {
        self.code < 500
    }
}

/// Mapping from status code to [`StatusEntry`].
///
/// Extension happens through `&mut self`, so a registry can only grow while
/// it has a single owner. Once moved into a factory it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRegistry {
    entries: BTreeMap<u16, StatusEntry>,
}

impl Default for StatusRegistry {
    fn default() -> Self {
        STANDARD.clone()
    }
}

impl StatusRegistry {
    /// The shared, immutable registry of standard codes.
    pub fn standard() -> &'static StatusRegistry {
        &STANDARD
    }

    /// Reason phrase for `code`, if registered.
    pub fn lookup(&self, code: u16) -> Option<&str> {
        self.entries.get(&code).map(StatusEntry::phrase)
    }

    pub fn entry(&self, code: u16) -> Option<&StatusEntry> {
        self.entries.get(&code)
    }

    pub fn contains(&self, code: u16) -> bool {
        self.entries.contains_key(&code)
    }

    /// The `x00` entry for the century of `code` (`499` -> `400`).
    ///
    /// Returns `None` for codes outside the error range, or when the century
    /// code itself is not registered.
    pub fn century_fallback(&self, code: u16) -> Option<&StatusEntry> {
        if !is_error_status(i64::from(code)) {
            return None;
        }
        self.entries.get(&(code / 100 * 100))
    }

    /// Entry for `code`, or its century fallback when `code` is unmapped.
    pub fn resolve(&self, code: u16) -> Option<&StatusEntry> {
        self.entry(code).or_else(|| self.century_fallback(code))
    }

    /// Class registered for exactly `code`.
    pub fn class_for_code(&self, code: u16) -> Option<ErrorClass> {
        self.entries.get(&code).map(StatusEntry::class)
    }

    /// Class registered under a named-access identifier such as `"NotFound"`.
    pub fn class_by_name(&self, identifier: &str) -> Option<ErrorClass> {
        self.entries
            .values()
            .find(|entry| entry.identifier == identifier)
            .map(StatusEntry::class)
    }

    /// Add a custom code, or replace the phrase of an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::InvalidRegistration`] when `code` is outside
    /// 400–599 or `phrase` has no identifier characters.
    pub fn register(&mut self, code: u16, phrase: impl Into<String>) -> FactoryResult<()> {
        let phrase = phrase.into();
        if !is_error_status(i64::from(code)) {
            return Err(FactoryError::invalid_registration(
                code,
                "only 4xx and 5xx status codes can be registered",
            ));
        }
        let phrase = phrase.trim();
        if to_identifier(phrase).is_empty() {
            return Err(FactoryError::invalid_registration(
                code,
                "reason phrase must contain at least one letter or digit",
            ));
        }

        let entry = StatusEntry::new(code, phrase);
        log_debug!(
            code = code,
            phrase = %entry.phrase,
            class_name = %entry.class_name,
            replaced = self.entries.contains_key(&code),
            "Registered status code"
        );
        self.entries.insert(code, entry);
        Ok(())
    }

    /// All entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
