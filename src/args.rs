//! Factory arguments.
//!
//! The factory takes an ordered list of loosely-typed arguments. [`Arg`] is
//! the sum of every form it understands, plus the forms it must reject, so
//! resolution is a single exhaustive match. Build lists with [`args!`].
//!
//! [`args!`]: crate::args

use serde_json::Value;

use crate::base_error::BaseError;
use crate::error::ArgKind;
use crate::Properties;

/// One factory argument.
#[derive(Debug)]
pub enum Arg {
    /// Status code; only valid as the first argument.
    Integer(i64),
    /// Status code written as a float; must be integral.
    Float(f64),
    /// Message override.
    Message(String),
    /// Error to adopt.
    Error(BaseError),
    /// Property bag shallow-copied onto the result.
    Properties(Properties),
    /// Treated as an empty property bag.
    Null,
    /// Always rejected.
    Bool(bool),
    /// Always rejected.
    Array(Vec<Value>),
}

impl Arg {
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Integer(_) | Self::Float(_) => ArgKind::Number,
            Self::Message(_) => ArgKind::String,
            Self::Error(_) => ArgKind::Error,
            Self::Properties(_) => ArgKind::Object,
            Self::Null => ArgKind::Null,
            Self::Bool(_) => ArgKind::Boolean,
            Self::Array(_) => ArgKind::Array,
        }
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```rust
/// use http_errors::{args, create};
/// use serde_json::json;
///
/// let err = create(args![404, "missing", json!({ "id": 1 })]).unwrap();
/// assert_eq!(err.status(), 404);
/// assert_eq!(err.message(), "missing");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

macro_rules! integer_args {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )+
    };
}

integer_args!(i16, i32, i64, u16, u32);

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<BaseError> for Arg {
    fn from(value: BaseError) -> Self {
        Self::Error(value)
    }
}

impl From<Properties> for Arg {
    fn from(value: Properties) -> Self {
        Self::Properties(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<()> for Arg {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::Integer(integer),
                None => Self::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(message) => Self::Message(message),
            Value::Array(items) => Self::Array(items),
            Value::Object(map) => Self::Properties(map),
        }
    }
}
