//! Byte-exact recognition of quoted RFC 3339 timestamps.

/// Shortest accepted span: `"YYYY-MM-DDTHH:MM:SSZ"`.
pub const MIN_TIME_FORMAT_LEN: usize = 22;

/// Longest accepted span, quotes included.
pub const MAX_TIME_FORMAT_LEN: usize = 35;

const HEAD_LEN: usize = 20;

/// Reports whether a quoted span has the shape of an RFC 3339 date-time.
///
/// The span must include its surrounding quotes. Only the layout is checked:
/// `"YYYY-MM-DDTHH:MM:SS`, an optional `.` followed by at least one digit,
/// then `Z` or `±HH:MM`, then the closing quote. Field ranges are not
/// validated, so `"1990-12-31T23:59:60Z"` passes and so would month `13`.
///
/// ```rust
/// use jsonstruct::time_format::is_time_format;
///
/// assert!(is_time_format(br#""2015-05-14T12:34:56.379+02:00""#));
/// assert!(!is_time_format(br#""2022-07-12 21:55:16""#));
/// ```
#[must_use]
pub fn is_time_format(v: &[u8]) -> bool {
    let l = v.len();
    if !(MIN_TIME_FORMAT_LEN..=MAX_TIME_FORMAT_LEN).contains(&l) {
        return false;
    }
    if v[0] != b'"' || v[l - 1] != b'"' {
        return false;
    }
    if !head_matches(&v[1..HEAD_LEN]) {
        return false;
    }

    let Some(tail) = tail_start(v) else {
        return false;
    };
    if tail == HEAD_LEN {
        return true;
    }

    // time-secfrac
    v[HEAD_LEN] == b'.' && tail > HEAD_LEN + 1 && all_digits(&v[HEAD_LEN + 1..tail])
}

/// `YYYY-MM-DDTHH:MM:SS`
fn head_matches(h: &[u8]) -> bool {
    const LAYOUT: &[u8; 19] = b"dddd-dd-ddTdd:dd:dd";
    LAYOUT.iter().zip(h).all(|(&want, &got)| match want {
        b'd' => got.is_ascii_digit(),
        sep => got == sep,
    })
}

/// Index of the first byte of the zone designator, `Z` or `±HH:MM`.
fn tail_start(v: &[u8]) -> Option<usize> {
    let last = v.len() - 2;
    if v[last] == b'Z' {
        return Some(last);
    }
    let start = last.checked_sub(5).filter(|&s| s >= HEAD_LEN)?;
    let zone = &v[start..=last];
    let matches = matches!(zone[0], b'+' | b'-')
        && zone[1].is_ascii_digit()
        && zone[2].is_ascii_digit()
        && zone[3] == b':'
        && zone[4].is_ascii_digit()
        && zone[5].is_ascii_digit();
    matches.then_some(start)
}

fn all_digits(b: &[u8]) -> bool {
    b.iter().all(u8::is_ascii_digit)
}
