//! Tokenizer: classifies the next JSON token and reports its exact span.
//!
//! The tokenizer pulls bytes from a [`Scanner`] one at a time and never
//! copies token bytes: [`Tokenizer::value`] borrows the scanner window. String
//! values keep their quotes and escapes; decoding them is left to the caller.
//!
//! Every complete value, closing brackets included, is followed by a
//! terminator check that consumes trailing whitespace and the next delimiter.
//! The delimiter decides the [`Level`] of a scalar token: `,` makes it a
//! [`Level::Value`], a closing bracket a [`Level::ValueLast`] and `:` a
//! [`Level::Key`]. A closing bracket consumed this way is reported as its own
//! token on the following call.
//!
//! Invariants
//! - Whitespace between tokens is released before the next token starts, so
//!   the window always begins at the first byte of the current token.
//! - After the first error the tokenizer is desynchronized and refuses to
//!   read further.
use std::{fmt, io::Read};

use bstr::BStr;

use crate::{
    error::{Error, ScanError, SyntaxError},
    escape::UnicodeEscapeBuffer,
    options::ParserOptions,
    scanner::Scanner,
    time_format::is_time_format,
};

mod literal_buffer;

use literal_buffer::{ExpectedLiteralBuffer, Step};

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// No token yet, or the last call failed.
    #[default]
    Unknown,
    /// `null`
    Null,
    /// `false`
    False,
    /// `true`
    True,
    /// An integer lexeme: no fraction and no exponent.
    Number,
    /// A number with a fraction or an exponent.
    FloatNumber,
    /// A string whose quoted span has the shape of an RFC 3339 timestamp.
    Time,
    /// Any other string.
    String,
    /// A structural byte: `[`, `]`, `{` or `}`.
    Literal,
}

/// Position of a token relative to the containers around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// A complete top-level scalar.
    Root,
    /// An opening `[`.
    Array,
    /// A closing `]`.
    ArrayEnd,
    /// A container element followed by `,`.
    Value,
    /// A container element followed by the closing bracket.
    ValueLast,
    /// An object key, followed by `:`.
    Key,
    /// An opening `{`.
    Object,
    /// A closing `}`.
    ObjectEnd,
    /// No token yet, or the last call failed.
    #[default]
    Unknown,
}

/// A borrowed view of the current token.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Lexical class.
    pub kind: Kind,
    /// Nesting position.
    pub level: Level,
    /// Raw bytes, quotes included for strings. Empty for `[` and `{`.
    pub value: &'a [u8],
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("level", &self.level)
            .field("value", &BStr::new(self.value))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    ValueOrClose,
    Key,
    KeyOrClose,
    /// The closing bracket was consumed by the last terminator check.
    Close,
    Done,
    Failed,
}

/// Where the scanner cursor sits once a token's own bytes are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// On the token's last byte.
    OnToken,
    /// On the first byte after the token.
    OnNext,
    /// The source ended right after the token.
    AtEnd,
}

const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Pull tokenizer over one JSON document.
///
/// # Examples
///
/// ```rust
/// use jsonstruct::{Kind, Level, Tokenizer};
///
/// let mut t = Tokenizer::new(&br#"[1, "a"]"#[..]);
/// t.next().unwrap();
/// assert_eq!((t.kind(), t.level()), (Kind::Literal, Level::Array));
/// t.next().unwrap();
/// assert_eq!((t.kind(), t.level(), t.value()), (Kind::Number, Level::Value, &b"1"[..]));
/// t.next().unwrap();
/// assert_eq!(t.value(), br#""a""#);
/// assert_eq!(t.level(), Level::ValueLast);
/// t.next().unwrap();
/// assert_eq!(t.level(), Level::ArrayEnd);
/// assert!(t.next().is_err());
/// ```
#[derive(Debug)]
pub struct Tokenizer<R> {
    scanner: Scanner<R>,
    stack: Vec<Container>,
    expect: Expect,
    kind: Kind,
    level: Level,
    token_len: usize,
}

impl<R: Read> Tokenizer<R> {
    /// Creates a tokenizer with the default buffer options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::default())
    }

    /// Creates a tokenizer with explicit buffer options.
    pub fn with_options(reader: R, options: ParserOptions) -> Self {
        Self::from_scanner(Scanner::with_options(reader, options))
    }

    /// Wraps an existing scanner, which should not have been advanced yet.
    pub fn from_scanner(scanner: Scanner<R>) -> Self {
        Self {
            scanner,
            stack: Vec::new(),
            expect: Expect::Value,
            kind: Kind::Unknown,
            level: Level::Unknown,
            token_len: 0,
        }
    }

    /// Advances to the next token.
    ///
    /// # Errors
    ///
    /// - [`Error::EndOfStream`] once the root value is complete.
    /// - [`Error::InvalidJson`] when the input cannot start a JSON value, or
    ///   when called again after a failure.
    /// - [`Error::InvalidJsonAt`] for syntax errors at a known byte.
    /// - [`Error::Io`] when the reader fails.
    ///
    /// After a positioned error, [`Tokenizer::value`] returns everything
    /// consumed since the failed token started. After an unpositioned one it
    /// is empty.
    pub fn next(&mut self) -> Result<(), Error> {
        match self.expect {
            Expect::Done => return Err(Error::EndOfStream),
            Expect::Failed => return Err(Error::invalid(None)),
            _ => {}
        }
        let res = self.advance();
        if res.is_err() {
            self.expect = Expect::Failed;
            self.kind = Kind::Unknown;
            self.level = Level::Unknown;
            self.token_len = match &res {
                Err(Error::InvalidJson { .. }) => 0,
                _ => self.scanner.peek_window().len(),
            };
        }
        res
    }

    /// Raw bytes of the current token.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        self.scanner.window_prefix(self.token_len)
    }

    /// Lexical class of the current token.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Nesting position of the current token.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// The current token as one value.
    #[must_use]
    pub fn token(&self) -> Token<'_> {
        Token {
            kind: self.kind,
            level: self.level,
            value: self.value(),
        }
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` once the root value has been fully consumed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.expect == Expect::Done
    }

    /// Consumes the tokenizer, returning the reader.
    pub fn into_inner(self) -> R {
        self.scanner.into_inner()
    }

    fn advance(&mut self) -> Result<(), Error> {
        if self.expect == Expect::Close {
            return self.close();
        }

        self.scanner.release();
        let Some(b) = self.skip_whitespace()? else {
            return Err(if self.stack.is_empty() {
                Error::invalid(Some(SyntaxError::EndOfStream))
            } else {
                self.eof_here()
            });
        };
        self.scanner.release_before_cursor();

        let key = matches!(self.expect, Expect::Key | Expect::KeyOrClose);
        match b {
            b']' if self.expect == Expect::ValueOrClose => self.close(),
            b'}' if self.expect == Expect::KeyOrClose => self.close(),
            b'"' => self.string(key),
            _ if key => Err(self.error_here(None)),
            b'[' => {
                self.open(Container::Array);
                Ok(())
            }
            b'{' => {
                self.open(Container::Object);
                Ok(())
            }
            b'n' | b't' | b'f' => self.literal(b),
            b'-' | b'0'..=b'9' => self.number(b),
            _ if self.stack.is_empty() => Err(Error::invalid(None)),
            _ => Err(self.error_here(None)),
        }
    }

    fn open(&mut self, container: Container) {
        self.stack.push(container);
        self.kind = Kind::Literal;
        self.token_len = 0;
        (self.level, self.expect) = match container {
            Container::Array => (Level::Array, Expect::ValueOrClose),
            Container::Object => (Level::Object, Expect::KeyOrClose),
        };
    }

    /// Emits the closing bracket under the cursor and checks what follows it.
    fn close(&mut self) -> Result<(), Error> {
        self.scanner.release_before_cursor();
        let closed = self.stack.pop();
        debug_assert!(closed.is_some(), "close without an open container");
        self.kind = Kind::Literal;
        self.token_len = 1;
        self.level = match closed {
            Some(Container::Object) => Level::ObjectEnd,
            _ => Level::ArrayEnd,
        };
        self.terminate(false, Cursor::OnToken)?;
        Ok(())
    }

    fn literal(&mut self, first: u8) -> Result<(), Error> {
        let start = self.position();
        let Some(mut matcher) = ExpectedLiteralBuffer::new(first) else {
            return Err(self.error_here(None));
        };
        self.kind = loop {
            let Some(b) = self.next_byte()? else {
                return Err(Error::at(
                    start + matcher.offset() as u64,
                    Some(SyntaxError::EndOfStream),
                ));
            };
            match matcher.step(b) {
                Step::NeedMore => {}
                Step::Done(kind) => break kind,
                Step::Reject => return Err(self.error_here(None)),
            }
        };
        self.token_len = self.scanner.peek_window().len();
        self.level = self.terminate(false, Cursor::OnToken)?;
        Ok(())
    }

    fn number(&mut self, first: u8) -> Result<(), Error> {
        let mut float = false;

        let lead = if first == b'-' {
            self.require_digit()?
        } else {
            first
        };
        let mut next = if lead == b'0' {
            self.next_byte()?
        } else {
            self.skip_digits()?
        };

        if next == Some(b'.') {
            float = true;
            self.require_digit()?;
            next = self.skip_digits()?;
        }

        if matches!(next, Some(b'e' | b'E')) {
            float = true;
            let sign = self.require_byte()?;
            if matches!(sign, b'+' | b'-') {
                self.require_digit()?;
            } else if !sign.is_ascii_digit() {
                return Err(self.error_here(None));
            }
            next = self.skip_digits()?;
        }

        self.kind = if float { Kind::FloatNumber } else { Kind::Number };
        let window = self.scanner.peek_window().len();
        let cursor = if next.is_some() {
            self.token_len = window - 1;
            Cursor::OnNext
        } else {
            self.token_len = window;
            Cursor::AtEnd
        };
        self.level = self.terminate(false, cursor)?;
        Ok(())
    }

    fn string(&mut self, key: bool) -> Result<(), Error> {
        let mut hex = UnicodeEscapeBuffer::new();
        loop {
            match self.require_byte()? {
                b'"' => break,
                b'\\' => match self.require_byte()? {
                    b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {}
                    b'u' => {
                        for _ in 0..4 {
                            let h = self.require_byte()?;
                            hex.feed(h).map_err(|e| self.error_here(Some(e)))?;
                        }
                        debug_assert!(hex.is_empty());
                    }
                    _ => return Err(self.error_here(Some(SyntaxError::InvalidEscapeCharacter))),
                },
                0x00..=0x1F => return Err(self.error_here(Some(SyntaxError::InvalidCharacter))),
                _ => {}
            }
        }

        self.token_len = self.scanner.peek_window().len();
        self.kind = if !key && is_time_format(self.scanner.peek_window()) {
            Kind::Time
        } else {
            Kind::String
        };
        self.level = self.terminate(key, Cursor::OnToken)?;
        Ok(())
    }

    /// Consumes trailing whitespace and the delimiter after a complete value
    /// and returns the level the delimiter implies.
    fn terminate(&mut self, key: bool, cursor: Cursor) -> Result<Level, Error> {
        let mut pending = match cursor {
            Cursor::OnToken => None,
            Cursor::OnNext => Some(self.scanner.current()),
            Cursor::AtEnd => return self.end_of_value(),
        };
        let b = loop {
            let b = match pending.take() {
                Some(b) => b,
                None => match self.next_byte()? {
                    Some(b) => b,
                    None => return self.end_of_value(),
                },
            };
            if !is_whitespace(b) {
                break b;
            }
        };

        let (level, expect) = match (self.stack.last(), key, b) {
            (Some(Container::Object), true, b':') => (Level::Key, Expect::Value),
            (Some(Container::Array), false, b',') => (Level::Value, Expect::Value),
            (Some(Container::Array), false, b']') | (Some(Container::Object), false, b'}') => {
                (Level::ValueLast, Expect::Close)
            }
            (Some(Container::Object), false, b',') => (Level::Value, Expect::Key),
            _ => return Err(self.error_here(None)),
        };
        self.expect = expect;
        Ok(level)
    }

    /// The source ended right after a complete value.
    fn end_of_value(&mut self) -> Result<Level, Error> {
        if self.stack.is_empty() {
            self.expect = Expect::Done;
            Ok(Level::Root)
        } else {
            Err(self.eof_here())
        }
    }

    fn skip_whitespace(&mut self) -> Result<Option<u8>, Error> {
        while let Some(b) = self.next_byte()? {
            if !is_whitespace(b) {
                return Ok(Some(b));
            }
            self.scanner.release();
        }
        Ok(None)
    }

    /// Advances one byte; `None` at end of stream.
    fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        match self.scanner.next() {
            Ok(()) => Ok(Some(self.scanner.current())),
            Err(ScanError::EndOfStream) => Ok(None),
            Err(ScanError::Io(e)) => Err(Error::Io(e)),
        }
    }

    /// Advances one byte; end of stream is an error at the cursor.
    fn require_byte(&mut self) -> Result<u8, Error> {
        match self.next_byte()? {
            Some(b) => Ok(b),
            None => Err(self.eof_here()),
        }
    }

    fn require_digit(&mut self) -> Result<u8, Error> {
        let b = self.require_byte()?;
        if b.is_ascii_digit() {
            Ok(b)
        } else {
            Err(self.error_here(None))
        }
    }

    /// Consumes digits and returns the first non-digit byte.
    fn skip_digits(&mut self) -> Result<Option<u8>, Error> {
        while let Some(b) = self.next_byte()? {
            if !b.is_ascii_digit() {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }

    fn position(&self) -> u64 {
        u64::try_from(self.scanner.index()).unwrap_or(0)
    }

    fn error_here(&self, cause: Option<SyntaxError>) -> Error {
        Error::at(self.position(), cause)
    }

    fn eof_here(&self) -> Error {
        self.error_here(Some(SyntaxError::EndOfStream))
    }
}

#[cfg(test)]
mod tests;
