//! Total coercions: every getter is defined for every tag.
//!
//! | tag | `bool` | `int` / `uint` | `float` | `string` | `time` |
//! |---|---|---|---|---|---|
//! | null | `false` | `0` | `0.0` | `"null"` | zero |
//! | bool | tag | `0` / `1` | `0.0` / `1.0` | `"false"` / `"true"` | zero |
//! | int, uint | `!= 0` | value, bits reinterpreted across signedness | widened | decimal | zero |
//! | float | `!= 0.0` | truncated | value | shortest round trip | zero |
//! | string | non-empty | saturating decimal parse | best-effort parse | value | RFC 3339 parse |
//! | time | unix millis `!= 0` | unix millis | `0.0` | RFC 3339, whole seconds | value |
//! | object, array | `false` | `0` | `0.0` | `"[object]"` / `"[array]"` | zero |
//!
//! Failed parses yield the zero of the target type; "zero" time is
//! [`zero_time`].
use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat};

use super::{Timestamp, Value, zero_time};
use crate::numbers::{string_to_int, string_to_uint};

/// RFC 3339 with whole seconds and `Z` for a zero offset.
pub(crate) fn format_time(t: &Timestamp) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Value {
    /// Truthiness of the value.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// assert!(Value::from("x").bool());
    /// assert!(!Value::from("").bool());
    /// assert!(!Value::Float(0.0).bool());
    /// ```
    #[must_use]
    pub fn bool(&self) -> bool {
        match self {
            Self::True => true,
            Self::Int(v) => *v != 0,
            Self::Uint(v) => *v != 0,
            Self::Float(v) => *v != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Time(t) => t.timestamp_millis() != 0,
            Self::Null | Self::False | Self::Object(_) | Self::Array(_) => false,
        }
    }

    /// Signed integer view.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// assert_eq!(Value::Uint(u64::MAX).int(), -1);
    /// assert_eq!(Value::Float(-3.99).int(), -3);
    /// assert_eq!(Value::from("-3.1415").int(), -3);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn int(&self) -> i64 {
        match self {
            Self::True => 1,
            Self::Int(v) => *v,
            Self::Uint(v) => *v as i64,
            Self::Float(v) => *v as i64,
            Self::String(s) => string_to_int(s.as_bytes()).0,
            Self::Time(t) => t.timestamp_millis(),
            Self::Null | Self::False | Self::Object(_) | Self::Array(_) => 0,
        }
    }

    /// Unsigned integer view. Negative numbers reinterpret their two's
    /// complement bits.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// assert_eq!(Value::Int(-1).uint(), u64::MAX);
    /// assert_eq!(Value::Float(-3.2).uint(), u64::MAX - 2);
    /// assert_eq!(Value::from("-3").uint(), 0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn uint(&self) -> u64 {
        match self {
            Self::True => 1,
            Self::Int(v) => *v as u64,
            Self::Uint(v) => *v,
            Self::Float(v) => (*v as i64) as u64,
            Self::String(s) => string_to_uint(s.as_bytes()).0,
            Self::Time(t) => t.timestamp_millis() as u64,
            Self::Null | Self::False | Self::Object(_) | Self::Array(_) => 0,
        }
    }

    /// Floating point view. Times read as `0.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn float(&self) -> f64 {
        match self {
            Self::True => 1.0,
            Self::Int(v) => *v as f64,
            Self::Uint(v) => *v as f64,
            Self::Float(v) => *v,
            Self::String(s) => s.parse().unwrap_or(0.0),
            Self::Null | Self::False | Self::Time(_) | Self::Object(_) | Self::Array(_) => 0.0,
        }
    }

    /// Text view. Strings are borrowed; everything else is rendered.
    ///
    /// This is not JSON: strings are not quoted and containers render as
    /// `[object]` or `[array]`. Use [`Display`](std::fmt::Display) for JSON.
    ///
    /// ```
    /// use jsonstruct::Value;
    ///
    /// assert_eq!(Value::Float(1.0).string(), "1");
    /// assert_eq!(Value::Null.string(), "null");
    /// assert_eq!(Value::Array(vec![]).string(), "[array]");
    /// ```
    #[must_use]
    pub fn string(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed("null"),
            Self::False => Cow::Borrowed("false"),
            Self::True => Cow::Borrowed("true"),
            Self::Int(v) => Cow::Owned(v.to_string()),
            Self::Uint(v) => Cow::Owned(v.to_string()),
            Self::Float(v) => Cow::Owned(v.to_string()),
            Self::String(s) => Cow::Borrowed(s),
            Self::Time(t) => Cow::Owned(format_time(t)),
            Self::Object(_) => Cow::Borrowed("[object]"),
            Self::Array(_) => Cow::Borrowed("[array]"),
        }
    }

    /// Timestamp view. Strings are parsed as RFC 3339.
    #[must_use]
    pub fn time(&self) -> Timestamp {
        match self {
            Self::Time(t) => *t,
            Self::String(s) => DateTime::parse_from_rfc3339(s).unwrap_or_else(|_| zero_time()),
            _ => zero_time(),
        }
    }
}
