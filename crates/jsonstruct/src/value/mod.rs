//! The dynamic JSON value and its type tags.
//!
//! [`Value`] is a tagged union over the JSON types plus two refinements:
//! numbers keep whether they were signed, unsigned or floating point, and
//! strings shaped like RFC 3339 timestamps become [`Value::Time`].
//!
//! Reading a value never fails. Every getter (`bool`, `int`, `uint`, `float`,
//! `string`, `time`) is defined for every tag, see [`coerce`]. Container
//! operations live in [`container`] and report misuse through
//! [`ValueError`](crate::ValueError).
use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, FixedOffset};

pub mod coerce;
pub mod container;
pub mod populate;

/// Timestamps carry their original UTC offset.
pub type Timestamp = DateTime<FixedOffset>;

/// Object storage. Keys are unique and iterate in sorted order.
pub type Map = BTreeMap<String, Value>;

/// Array storage.
pub type Array = Vec<Value>;

/// Seconds from the Unix epoch to `0001-01-01T00:00:00Z`.
const ZERO_TIME_UNIX_SECS: i64 = -62_135_596_800;

/// The zero timestamp, `0001-01-01T00:00:00Z`, returned by
/// [`Value::time`] for anything that is not a time.
#[must_use]
pub fn zero_time() -> Timestamp {
    DateTime::from_timestamp(ZERO_TIME_UNIX_SECS, 0)
        .unwrap_or_default()
        .fixed_offset()
}

/// A JSON value.
///
/// A fresh value is [`Value::Null`]. It only becomes a container through
/// [`Value::as_object`] or [`Value::as_array`].
///
/// # Examples
///
/// ```
/// use jsonstruct::{Type, Value};
///
/// let mut v = Value::default();
/// v.as_object();
/// v.set_key("n", 1u8).unwrap();
/// v.set_key("s", "two").unwrap();
/// assert_eq!(v.value_type(), Type::Object);
/// assert_eq!(v.get_key("n").map(Value::int), Some(1));
/// assert_eq!(v.to_string(), r#"{"n":1,"s":"two"}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `false`
    False,
    /// `true`
    True,
    /// A signed integer.
    Int(i64),
    /// An unsigned integer above `i64::MAX`, or one set explicitly.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// A timestamp.
    Time(Timestamp),
    /// A JSON object.
    Object(Map),
    /// A JSON array.
    Array(Array),
}

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// See [`Value::Null`].
    Null,
    /// See [`Value::False`].
    False,
    /// See [`Value::True`].
    True,
    /// See [`Value::Int`].
    Int,
    /// See [`Value::Uint`].
    Uint,
    /// See [`Value::Float`].
    Float,
    /// See [`Value::String`].
    String,
    /// See [`Value::Time`].
    Time,
    /// See [`Value::Object`].
    Object,
    /// See [`Value::Array`].
    Array,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Value {
    /// The tag of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::False => Type::False,
            Self::True => Type::True,
            Self::Int(_) => Type::Int,
            Self::Uint(_) => Type::Uint,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::String,
            Self::Time(_) => Type::Time,
            Self::Object(_) => Type::Object,
            Self::Array(_) => Type::Array,
        }
    }

    /// Byte length of a string, entry count of a container, `None` for
    /// everything else.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// assert_eq!(Value::from("héllo").size(), Some(6));
    /// assert_eq!(Value::Int(5).size(), None);
    /// ```
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.len()),
            Self::Object(m) => Some(m.len()),
            Self::Array(a) => Some(a.len()),
            _ => None,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::False.is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`False`] and [`True`].
    ///
    /// [`False`]: Value::False
    /// [`True`]: Value::True
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::False | Self::True)
    }

    /// Returns `true` for any of the three number tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// assert!(Value::Int(-1).is_number());
    /// assert!(Value::Uint(1).is_number());
    /// assert!(Value::Float(0.5).is_number());
    /// assert!(!Value::from("1").is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Uint(_) | Self::Float(_))
    }

    /// Returns `true` if the value is [`Int`](Value::Int).
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns `true` if the value is [`Uint`](Value::Uint).
    #[must_use]
    pub fn is_uint(&self) -> bool {
        matches!(self, Self::Uint(_))
    }

    /// Returns `true` if the value is [`Float`](Value::Float).
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns `true` if the value is [`String`](Value::String). Times are
    /// not strings.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` if the value is [`Time`](Value::Time).
    #[must_use]
    pub fn is_time(&self) -> bool {
        matches!(self, Self::Time(_))
    }

    /// Returns `true` if the value is [`Object`](Value::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns `true` if the value is [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Replaces the payload with `null`.
    pub fn set_null(&mut self) {
        *self = Self::Null;
    }

    /// Replaces the payload with a boolean.
    pub fn set_bool(&mut self, v: bool) {
        *self = Self::from(v);
    }

    /// Replaces the payload with a signed integer.
    pub fn set_int(&mut self, v: i64) {
        *self = Self::Int(v);
    }

    /// Replaces the payload with an unsigned integer.
    pub fn set_uint(&mut self, v: u64) {
        *self = Self::Uint(v);
    }

    /// Replaces the payload with a float.
    pub fn set_float(&mut self, v: f64) {
        *self = Self::Float(v);
    }

    /// Replaces the payload with a string.
    pub fn set_string(&mut self, v: impl Into<String>) {
        *self = Self::String(v.into());
    }

    /// Replaces the payload with a timestamp.
    pub fn set_time(&mut self, v: Timestamp) {
        *self = Self::Time(v);
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        if v { Self::True } else { Self::False }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Time(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
