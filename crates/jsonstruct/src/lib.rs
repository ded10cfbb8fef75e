//! Streaming JSON scanner, tokenizer and dynamic value model.
//!
//! Bytes flow one way through three layers:
//!
//! - [`Scanner`] keeps a growable window over any [`std::io::Read`] and hands
//!   out the bytes consumed since the last release without copying them.
//! - [`Tokenizer`] classifies one token at a time and reports its [`Kind`],
//!   its nesting [`Level`] and its raw span.
//! - [`Decoder`] assembles tokens into a [`Value`], a tagged union whose
//!   getters coerce between every pair of types and never fail.
//!
//! Strings shaped like RFC 3339 timestamps are recognised while tokenizing
//! and decoded as [`Value::Time`].
//!
//! ```rust
//! use jsonstruct::{Type, Value};
//!
//! let v = jsonstruct::from_str(r#"{"id": 7, "at": "2015-05-14T12:34:56.379+02:00"}"#).unwrap();
//! assert_eq!(v.get_key("id").map(Value::int), Some(7));
//! assert_eq!(v.get_key("at").map(Value::value_type), Some(Type::Time));
//! assert_eq!(v.get_key("at").unwrap().string(), "2015-05-14T12:34:56+02:00");
//! ```

mod codec;
mod error;
mod options;
mod parser;
mod scanner;
mod ser;
#[cfg(any(test, feature = "serde"))]
mod serde_impl;
mod tokenizer;
mod value;

pub mod escape;
pub mod numbers;
pub mod time_format;

#[cfg(test)]
mod tests;

pub use codec::{JsonCodec, StdCodec};
pub use error::{Error, ScanError, SyntaxError, ValueError};
pub use options::{DEFAULT_BUFFER_SIZE, ParserOptions};
pub use parser::{Decoder, from_reader, from_reader_with_options, from_slice, from_str};
pub use scanner::Scanner;
pub use ser::{to_string, to_vec, to_writer};
pub use tokenizer::{Kind, Level, Token, Tokenizer};
pub use value::{Array, Map, Timestamp, Type, Value, populate::Populate, zero_time};
