use std::io::{Read, Write};

use crate::{error::Error, options::ParserOptions, parser, value::Value};

/// Strategy for turning bytes into a [`Value`] and back.
///
/// [`Value::unmarshal_with`] and [`Value::marshal_with`] go through this
/// trait, so callers can substitute their own implementation, for instance to
/// record calls in tests.
pub trait JsonCodec {
    /// Replaces `target` with the document read from `reader`.
    ///
    /// # Errors
    ///
    /// Implementation defined. [`StdCodec`] reports decoder errors and
    /// leaves `target` unchanged.
    fn decode(&self, reader: &mut dyn Read, target: &mut Value) -> Result<(), Error>;

    /// Writes `value` to `writer`.
    ///
    /// # Errors
    ///
    /// Implementation defined. [`StdCodec`] only reports write failures.
    fn encode(&self, value: &Value, writer: &mut dyn Write) -> Result<(), Error>;
}

/// The codec built on this crate's own decoder and compact writer.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdCodec {
    /// Buffer options for decoding.
    pub options: ParserOptions,
}

impl JsonCodec for StdCodec {
    fn decode(&self, reader: &mut dyn Read, target: &mut Value) -> Result<(), Error> {
        *target = parser::from_reader_with_options(reader, self.options)?;
        Ok(())
    }

    fn encode(&self, value: &Value, writer: &mut dyn Write) -> Result<(), Error> {
        write!(writer, "{value}")?;
        Ok(())
    }
}

impl Value {
    /// Replaces `self` with the document `codec` reads from `reader`.
    ///
    /// ```
    /// use jsonstruct::{StdCodec, Value};
    ///
    /// let mut v = Value::default();
    /// v.unmarshal_with(&StdCodec::default(), &mut &b"[true]"[..]).unwrap();
    /// assert_eq!(v, Value::Array(vec![Value::True]));
    /// ```
    ///
    /// # Errors
    ///
    /// Whatever `codec` reports.
    pub fn unmarshal_with<C: JsonCodec + ?Sized>(
        &mut self,
        codec: &C,
        reader: &mut dyn Read,
    ) -> Result<(), Error> {
        codec.decode(reader, self)
    }

    /// Writes `self` through `codec`.
    ///
    /// # Errors
    ///
    /// Whatever `codec` reports.
    pub fn marshal_with<C: JsonCodec + ?Sized>(
        &self,
        codec: &C,
        writer: &mut dyn Write,
    ) -> Result<(), Error> {
        codec.encode(self, writer)
    }
}
