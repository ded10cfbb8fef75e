//! JSON string escapes in both directions.
//!
//! [`UnicodeEscapeBuffer`] collects the four hex digits of a `\u` escape and
//! is shared by the tokenizer (which only validates) and [`unescape`] (which
//! decodes). [`write_escaped_string`] is the inverse used by serialization.
use std::fmt;

use bstr::ByteSlice;

use crate::error::SyntaxError;

/// Accumulates the four hexadecimal digits of a `\u` escape and yields the
/// UTF-16 code unit they encode. Resets itself after each complete unit.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    unit: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.unit = 0;
        self.len = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Feeds one byte. `Ok(None)` while fewer than four digits were seen,
    /// `Ok(Some(unit))` on the fourth.
    pub fn feed(&mut self, b: u8) -> Result<Option<u16>, SyntaxError> {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return Err(SyntaxError::InvalidHexNumber),
        };
        self.unit = (self.unit << 4) | u16::from(digit);
        self.len += 1;
        if self.len == 4 {
            let unit = self.unit;
            self.reset();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

/// Decodes the body of a JSON string literal, without its quotes.
///
/// Surrogate pairs are combined; a lone surrogate or a malformed escape
/// becomes U+FFFD, and invalid UTF-8 is replaced the same way. The tokenizer
/// has already rejected malformed escapes, so this never fails.
///
/// ```rust
/// use jsonstruct::escape::unescape;
///
/// assert_eq!(unescape(br"a\tb"), "a\tb");
/// assert_eq!(unescape(br"\uD83D\uDE00"), "\u{1F600}");
/// ```
#[must_use]
pub fn unescape(raw: &[u8]) -> String {
    let Some(first) = raw.find_byte(b'\\') else {
        return raw.to_str_lossy().into_owned();
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first].to_str_lossy());
    let mut rest = &raw[first..];
    let mut pending_high: Option<u16> = None;

    while let Some((&b, tail)) = rest.split_first() {
        if b != b'\\' {
            flush_high(&mut out, &mut pending_high);
            let end = tail.find_byte(b'\\').map_or(rest.len(), |i| i + 1);
            out.push_str(&rest[..end].to_str_lossy());
            rest = &rest[end..];
            continue;
        }

        let Some((&esc, tail)) = tail.split_first() else {
            flush_high(&mut out, &mut pending_high);
            out.push(char::REPLACEMENT_CHARACTER);
            break;
        };
        rest = tail;

        if esc == b'u' {
            let Some(unit) = decode_unit(rest) else {
                flush_high(&mut out, &mut pending_high);
                out.push(char::REPLACEMENT_CHARACTER);
                continue;
            };
            rest = &rest[4..];
            match (pending_high.take(), unit) {
                (Some(high), 0xDC00..=0xDFFF) => {
                    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                (high, 0xD800..=0xDBFF) => {
                    if high.is_some() {
                        out.push(char::REPLACEMENT_CHARACTER);
                    }
                    pending_high = Some(unit);
                }
                (high, unit) => {
                    if high.is_some() {
                        out.push(char::REPLACEMENT_CHARACTER);
                    }
                    out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
            }
            continue;
        }

        flush_high(&mut out, &mut pending_high);
        out.push(match esc {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            _ => char::REPLACEMENT_CHARACTER,
        });
    }
    flush_high(&mut out, &mut pending_high);
    out
}

fn decode_unit(hex: &[u8]) -> Option<u16> {
    let mut buf = UnicodeEscapeBuffer::new();
    let mut unit = None;
    for &b in hex.get(..4)? {
        unit = buf.feed(b).ok()?;
    }
    unit
}

fn flush_high(out: &mut String, pending: &mut Option<u16>) {
    if pending.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}

/// Writes `src` with JSON string escaping applied, without quotes.
///
/// Quotes, backslashes and control characters are escaped, as are the
/// U+2028/U+2029 separators older JavaScript parsers choke on.
pub(crate) fn write_escaped_string<W: fmt::Write + ?Sized>(src: &str, f: &mut W) -> fmt::Result {
    let mut start = 0;
    for (i, c) in src.char_indices() {
        let escaped = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{0008}' => "\\b",
            '\u{000C}' => "\\f",
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                f.write_str(&src[start..i])?;
                write!(f, "\\u{:04X}", c as u32)?;
                start = i + c.len_utf8();
                continue;
            }
            _ => continue,
        };
        f.write_str(&src[start..i])?;
        f.write_str(escaped)?;
        start = i + c.len_utf8();
    }
    f.write_str(&src[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(b'0'), Ok(None));
        assert_eq!(buf.feed(b'0'), Ok(None));
        assert_eq!(buf.feed(b'4'), Ok(None));
        assert_eq!(buf.feed(b'1'), Ok(Some(0x41)));
        assert!(buf.is_empty());
    }

    #[test]
    fn mixed_case_hex() {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut last = None;
        for b in *b"AbCd" {
            last = buf.feed(b).unwrap();
        }
        assert_eq!(last, Some(0xABCD));
    }

    #[test]
    fn reset_clears_buffer() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(b'F'), Ok(None));
        buf.reset();
        for b in *b"002" {
            assert_eq!(buf.feed(b), Ok(None));
        }
        assert_eq!(buf.feed(b'0'), Ok(Some(0x20)));
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(b'O'), Err(SyntaxError::InvalidHexNumber));
    }

    #[test]
    fn unescape_simple_and_escaped() {
        assert_eq!(unescape(b"plain"), "plain");
        assert_eq!(unescape(br#"q\"b\\s\/"#), "q\"b\\s/");
        assert_eq!(unescape(br"\b\f\n\r\t"), "\u{8}\u{c}\n\r\t");
        assert_eq!(unescape(br"\u2070x"), "\u{2070}x");
    }

    #[test]
    fn unescape_surrogates() {
        assert_eq!(unescape(br"\uD834\uDD1E"), "\u{1D11E}");
        assert_eq!(unescape(br"\uD834x"), "\u{FFFD}x");
        assert_eq!(unescape(br"\uDD1E"), "\u{FFFD}");
        assert_eq!(unescape(br"\uD834\uD834\uDD1E"), "\u{FFFD}\u{1D11E}");
    }

    #[test]
    fn unescape_invalid_utf8_is_lossy() {
        assert_eq!(unescape(b"a\xFFb"), "a\u{FFFD}b");
        assert_eq!(unescape(b"a\xFF\\nb"), "a\u{FFFD}\nb");
    }

    #[test]
    fn escape_roundtrip() {
        let src = "quote\" back\\ nl\n nul\u{0} sep\u{2028} ok é";
        let mut escaped = String::new();
        write_escaped_string(src, &mut escaped).unwrap();
        assert_eq!(
            escaped,
            "quote\\\" back\\\\ nl\\n nul\\u0000 sep\\u2028 ok é"
        );
        assert_eq!(unescape(escaped.as_bytes()), src);
    }
}
