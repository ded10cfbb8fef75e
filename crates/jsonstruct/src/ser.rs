//! Compact JSON output for [`Value`].
use std::{
    fmt::{self, Write as _},
    io,
};

use chrono::SecondsFormat;

use crate::{escape::write_escaped_string, value::Value};

fn write_quoted<W: fmt::Write + ?Sized>(s: &str, f: &mut W) -> fmt::Result {
    f.write_char('"')?;
    write_escaped_string(s, f)?;
    f.write_char('"')
}

/// Writes compact JSON.
///
/// Non-finite floats have no JSON form and are written as `null`; integral
/// floats are written with a `.0` fraction. Times are
/// written as quoted RFC 3339 strings, keeping any fractional seconds.
///
/// ```
/// use jsonstruct::Value;
///
/// let v = Value::Array(vec![Value::from("a\"b"), Value::Float(f64::NAN), Value::Uint(7)]);
/// assert_eq!(v.to_string(), r#"["a\"b",null,7]"#);
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::False => f.write_str("false"),
            Value::True => f.write_str("true"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            // Integral floats keep a fraction so they read back as floats.
            Value::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.1}"),
            Value::Float(n) if n.is_finite() => write!(f, "{n}"),
            Value::Float(_) => f.write_str("null"),
            Value::String(s) => write_quoted(s, f),
            Value::Time(t) => write_quoted(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true), f),
            Value::Array(arr) => {
                f.write_char('[')?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_char(']')
            }
            Value::Object(map) => {
                f.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_quoted(k, f)?;
                    write!(f, ":{v}")?;
                }
                f.write_char('}')
            }
        }
    }
}

/// Writes `value` as compact JSON into `writer`.
///
/// # Errors
///
/// Whatever `writer` reports.
pub fn to_writer<W: io::Write>(value: &Value, mut writer: W) -> io::Result<()> {
    write!(writer, "{value}")
}

/// Renders `value` as compact JSON bytes.
#[must_use]
pub fn to_vec(value: &Value) -> Vec<u8> {
    to_string(value).into_bytes()
}

/// Renders `value` as compact JSON text.
#[must_use]
pub fn to_string(value: &Value) -> String {
    value.to_string()
}
