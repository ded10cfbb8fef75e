use std::io;

use thiserror::Error;

/// Errors reported by [`Scanner`](crate::Scanner).
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source is exhausted. This is a control signal, not a failure: the
    /// partially scanned span stays available through
    /// [`Scanner::bytes`](crate::Scanner::bytes).
    #[error("end of stream")]
    EndOfStream,
    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

impl ScanError {
    /// Returns `true` for [`ScanError::EndOfStream`].
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// The lexical reason behind an [`Error::InvalidJson`] or
/// [`Error::InvalidJsonAt`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// A `\u` escape is not followed by four hexadecimal digits.
    #[error("invalid hex number")]
    InvalidHexNumber,
    /// A backslash is followed by a byte that does not start a JSON escape.
    #[error("invalid escape character")]
    InvalidEscapeCharacter,
    /// A raw control byte appears inside a string.
    #[error("invalid character")]
    InvalidCharacter,
    /// The source ran out in the middle of a token or container.
    #[error("unexpected end of stream")]
    EndOfStream,
}

/// Errors reported by [`Tokenizer`](crate::Tokenizer) and the decoder.
#[derive(Debug, Error)]
pub enum Error {
    /// There are no more tokens: the root value is complete.
    #[error("end of stream")]
    EndOfStream,
    /// The input is not JSON and no byte position applies.
    #[error("invalid json{}", fmt_cause(.cause))]
    InvalidJson {
        /// The lexical reason, when one is known.
        cause: Option<SyntaxError>,
    },
    /// The input is not JSON; the failure was decided at byte `pos`.
    #[error("invalid json at position {pos}{}", fmt_cause(.cause))]
    InvalidJsonAt {
        /// Absolute byte offset in the stream.
        pos: u64,
        /// The lexical reason, when one is known.
        cause: Option<SyntaxError>,
    },
    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

fn fmt_cause(cause: &Option<SyntaxError>) -> String {
    match cause {
        Some(c) => format!(": {c}"),
        None => String::new(),
    }
}

impl Error {
    /// Byte position of the failure, if the error carries one.
    #[must_use]
    pub fn position(&self) -> Option<u64> {
        match self {
            Self::InvalidJsonAt { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// The wrapped lexical cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<SyntaxError> {
        match self {
            Self::InvalidJson { cause } | Self::InvalidJsonAt { cause, .. } => *cause,
            _ => None,
        }
    }

    /// Returns `true` for either invalid-json variant.
    #[must_use]
    pub fn is_invalid_json(&self) -> bool {
        matches!(self, Self::InvalidJson { .. } | Self::InvalidJsonAt { .. })
    }

    pub(crate) fn at(pos: u64, cause: Option<SyntaxError>) -> Self {
        Self::InvalidJsonAt { pos, cause }
    }

    pub(crate) fn invalid(cause: Option<SyntaxError>) -> Self {
        Self::InvalidJson { cause }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EndOfStream, Self::EndOfStream) => true,
            (Self::InvalidJson { cause: a }, Self::InvalidJson { cause: b }) => a == b,
            (
                Self::InvalidJsonAt { pos: p, cause: a },
                Self::InvalidJsonAt { pos: q, cause: b },
            ) => p == q && a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

/// Failures of container and populate operations on a
/// [`Value`](crate::Value). These never leave the target half-modified.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// An object operation was applied to a non-object.
    #[error("value is not an object")]
    NotObject,
    /// An array operation was applied to a non-array.
    #[error("value is not an array")]
    NotArray,
    /// A negative array index.
    #[error("index out of range")]
    IndexOutOfRange,
    /// The source has no JSON representation.
    #[error("unsupported type")]
    UnsupportedType,
}
