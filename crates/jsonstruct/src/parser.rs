//! Assembles tokenizer output into a [`Value`] tree.
//!
//! Containers are built on an explicit frame stack, so nesting depth is
//! bounded by memory rather than by the call stack.
use std::io::Read;

use chrono::DateTime;

use crate::{
    error::Error,
    escape::unescape,
    numbers::{string_to_int, string_to_uint},
    options::ParserOptions,
    tokenizer::{Kind, Level, Tokenizer},
    value::{Array, Map, Value},
};

/// A container under construction.
#[derive(Debug)]
enum Frame {
    Array(Array),
    /// The map so far and the key waiting for its value.
    Object(Map, Option<String>),
}

impl Frame {
    fn into_value(self) -> Value {
        match self {
            Frame::Array(a) => Value::Array(a),
            Frame::Object(m, key) => {
                debug_assert!(key.is_none(), "object closed with a dangling key");
                Value::Object(m)
            }
        }
    }
}

/// Decodes one JSON document from a reader.
///
/// # Examples
///
/// ```
/// use jsonstruct::{Decoder, Type};
///
/// let v = Decoder::new(&b"[1, -2, 18446744073709551615, 0.5]"[..]).decode().unwrap();
/// let types: Vec<Type> = (0..4).map(|i| v.get_index(i).unwrap().value_type()).collect();
/// assert_eq!(types, [Type::Int, Type::Int, Type::Uint, Type::Float]);
/// ```
#[derive(Debug)]
pub struct Decoder<R> {
    tokens: Tokenizer<R>,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder with the default buffer options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::default())
    }

    /// Creates a decoder with explicit buffer options.
    pub fn with_options(reader: R, options: ParserOptions) -> Self {
        Self {
            tokens: Tokenizer::with_options(reader, options),
        }
    }

    /// Reads tokens until the root value is complete.
    ///
    /// # Errors
    ///
    /// Any error from [`Tokenizer::next`]. Trailing bytes after the root
    /// value are rejected.
    pub fn decode(mut self) -> Result<Value, Error> {
        let mut stack: Vec<Frame> = Vec::new();
        loop {
            self.tokens.next()?;
            let complete = match (self.tokens.kind(), self.tokens.level()) {
                (Kind::Literal, Level::Array) => {
                    stack.push(Frame::Array(Array::new()));
                    None
                }
                (Kind::Literal, Level::Object) => {
                    stack.push(Frame::Object(Map::new(), None));
                    None
                }
                (Kind::Literal, _) => stack.pop().map(Frame::into_value),
                (_, Level::Key) => {
                    if let Some(Frame::Object(_, key)) = stack.last_mut() {
                        *key = Some(unescape(inner(self.tokens.value())));
                    }
                    None
                }
                (kind, _) => Some(scalar(kind, self.tokens.value())),
            };
            #[cfg(any(test, feature = "fuzzing"))]
            assert_eq!(
                stack.len(),
                self.tokens.depth(),
                "Internal error: frame stack out of step with the tokenizer"
            );

            let Some(value) = complete else { continue };
            match stack.last_mut() {
                None => {
                    debug_assert!(self.tokens.is_done());
                    return Ok(value);
                }
                Some(Frame::Array(a)) => a.push(value),
                Some(Frame::Object(m, key)) => {
                    debug_assert!(key.is_some(), "object value without a key");
                    m.insert(key.take().unwrap_or_default(), value);
                }
            }
        }
    }
}

/// The bytes between the quotes of a string token.
fn inner(raw: &[u8]) -> &[u8] {
    raw.get(1..raw.len().saturating_sub(1)).unwrap_or_default()
}

fn scalar(kind: Kind, raw: &[u8]) -> Value {
    match kind {
        Kind::Null => Value::Null,
        Kind::False => Value::False,
        Kind::True => Value::True,
        Kind::Number => integer(raw),
        Kind::FloatNumber => Value::Float(float(raw)),
        Kind::String => Value::String(unescape(inner(raw))),
        Kind::Time => time(raw),
        Kind::Literal | Kind::Unknown => {
            debug_assert!(false, "{kind:?} is not a scalar");
            Value::Null
        }
    }
}

/// Signed if it fits, else unsigned, else the nearest float.
fn integer(raw: &[u8]) -> Value {
    match string_to_int(raw) {
        (v, true) => Value::Int(v),
        _ => match string_to_uint(raw) {
            (v, true) => Value::Uint(v),
            _ => Value::Float(float(raw)),
        },
    }
}

fn float(raw: &[u8]) -> f64 {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

/// Shape-checked timestamps can still name impossible dates; those stay
/// strings.
fn time(raw: &[u8]) -> Value {
    let text = unescape(inner(raw));
    match DateTime::parse_from_rfc3339(&text) {
        Ok(t) => Value::Time(t),
        Err(_) => Value::String(text),
    }
}

/// Decodes one JSON document from `reader`.
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn from_reader<R: Read>(reader: R) -> Result<Value, Error> {
    Decoder::new(reader).decode()
}

/// Decodes one JSON document from `reader` with explicit buffer options.
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn from_reader_with_options<R: Read>(reader: R, options: ParserOptions) -> Result<Value, Error> {
    Decoder::with_options(reader, options).decode()
}

/// Decodes one JSON document from bytes.
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn from_slice(bytes: &[u8]) -> Result<Value, Error> {
    from_reader(bytes)
}

/// Decodes one JSON document from text.
///
/// ```
/// let v = jsonstruct::from_str(r#"{"at": "2015-05-14T12:34:56+02:00"}"#).unwrap();
/// assert!(v.get_key("at").unwrap().is_time());
/// ```
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn from_str(text: &str) -> Result<Value, Error> {
    from_slice(text.as_bytes())
}

impl Value {
    /// Replaces `self` with the document read from `reader`. On failure
    /// `self` is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn unmarshal<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        *self = from_reader(reader)?;
        Ok(())
    }
}
