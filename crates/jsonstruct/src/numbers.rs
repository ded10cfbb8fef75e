//! Saturating decimal conversions shared by the decoder and the value
//! coercions.
//!
//! The parsers accept exactly what a JSON integer lexeme (optionally followed
//! by a fraction) looks like: an optional `-`, then ASCII digits. Parsing
//! stops at the first `.` so `"3.14"` reads as `3`. Anything else, including
//! `+`, `_` and exponents, is rejected with `(0, false)`.

/// Largest integer an `f64` represents exactly, `2^53 - 1`.
pub const MAX_SAFE_INT: i64 = (1 << 53) - 1;

/// Smallest integer an `f64` represents exactly, `-(2^53 - 1)`.
pub const MIN_SAFE_INT: i64 = -MAX_SAFE_INT;

/// Rounds to the nearest integer, halves away from zero.
///
/// Out-of-range inputs saturate and NaN maps to zero, following `as`.
///
/// ```rust
/// use jsonstruct::numbers::float_to_int;
///
/// assert_eq!(float_to_int(0.49), 0);
/// assert_eq!(float_to_int(-0.5), -1);
/// assert_eq!(float_to_int(1.99), 2);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn float_to_int(val: f64) -> i64 {
    if val < 0.0 {
        (val - 0.5) as i64
    } else {
        (val + 0.5) as i64
    }
}

/// Parses a signed decimal integer.
///
/// Returns the value and `true` on success. On overflow the result saturates
/// to `i64::MAX` or `i64::MIN` and the flag is `false`; on malformed input the
/// result is `(0, false)`.
///
/// ```rust
/// use jsonstruct::numbers::string_to_int;
///
/// assert_eq!(string_to_int(b"-12345"), (-12345, true));
/// assert_eq!(string_to_int(b"3.1415"), (3, true));
/// assert_eq!(string_to_int(b"9223372036854775808"), (i64::MAX, false));
/// assert_eq!(string_to_int(b"1_000"), (0, false));
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn string_to_int(s: &[u8]) -> (i64, bool) {
    let (negative, digits) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, s),
    };
    let saturated = if negative { i64::MIN } else { i64::MAX };

    let n = match accumulate(digits) {
        Digits::Value(n) => n,
        Digits::Overflow => return (saturated, false),
        Digits::Invalid => return (0, false),
    };

    if negative {
        match n {
            n if n <= i64::MAX as u64 => (-(n as i64), true),
            n if n == i64::MIN.unsigned_abs() => (i64::MIN, true),
            _ => (i64::MIN, false),
        }
    } else if n > i64::MAX as u64 {
        (i64::MAX, false)
    } else {
        (n as i64, true)
    }
}

/// Parses an unsigned decimal integer.
///
/// Any sign, `-0` included, is rejected. Overflow saturates to `u64::MAX`
/// with the flag set to `false`.
///
/// ```rust
/// use jsonstruct::numbers::string_to_uint;
///
/// assert_eq!(string_to_uint(b"18446744073709551615"), (u64::MAX, true));
/// assert_eq!(string_to_uint(b"18446744073709551616"), (u64::MAX, false));
/// assert_eq!(string_to_uint(b"-1"), (0, false));
/// ```
#[must_use]
pub fn string_to_uint(s: &[u8]) -> (u64, bool) {
    match accumulate(s) {
        Digits::Value(n) => (n, true),
        Digits::Overflow => (u64::MAX, false),
        Digits::Invalid => (0, false),
    }
}

enum Digits {
    Value(u64),
    Overflow,
    Invalid,
}

fn accumulate(digits: &[u8]) -> Digits {
    match digits.first() {
        None | Some(b'.') => return Digits::Invalid,
        Some(_) => {}
    }
    let mut n: u64 = 0;
    for &b in digits {
        match b {
            b'0'..=b'9' => {
                n = match n.checked_mul(10).and_then(|n| n.checked_add(u64::from(b - b'0'))) {
                    Some(n) => n,
                    None => return Digits::Overflow,
                };
            }
            b'.' => break,
            _ => return Digits::Invalid,
        }
    }
    Digits::Value(n)
}
