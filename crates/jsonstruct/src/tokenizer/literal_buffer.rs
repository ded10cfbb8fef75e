use super::Kind;

/// What happened after feeding one more byte into the literal matcher?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the literal.
    Done(Kind),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// Matcher for the `null`, `true` and `false` keywords.
///
/// Holds the bytes still expected after the leading `n`, `t` or `f` and the
/// number already matched, so a mismatch can be reported at `start + offset`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    rest: &'static [u8],
    kind: Kind,
    offset: usize,
}

impl ExpectedLiteralBuffer {
    /// Starts matching after the first byte, if it opens a keyword.
    pub fn new(first: u8) -> Option<Self> {
        let (rest, kind): (&'static [u8], Kind) = match first {
            b'n' => (b"ull", Kind::Null),
            b't' => (b"rue", Kind::True),
            b'f' => (b"alse", Kind::False),
            _ => return None,
        };
        Some(Self {
            rest,
            kind,
            offset: 1,
        })
    }

    /// Offset, from the first byte of the keyword, of the byte expected next.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn step(&mut self, b: u8) -> Step {
        match self.rest.split_first() {
            Some((&want, rest)) if want == b => {
                self.rest = rest;
                self.offset += 1;
                if rest.is_empty() {
                    Step::Done(self.kind)
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(literal: &[u8]) -> (Step, usize) {
        let mut m = ExpectedLiteralBuffer::new(literal[0]).unwrap();
        let mut last = Step::NeedMore;
        for &b in &literal[1..] {
            last = m.step(b);
            if last != Step::NeedMore {
                break;
            }
        }
        (last, m.offset())
    }

    #[test]
    fn matches_keywords() {
        assert_eq!(feed(b"null"), (Step::Done(Kind::Null), 4));
        assert_eq!(feed(b"true"), (Step::Done(Kind::True), 4));
        assert_eq!(feed(b"false"), (Step::Done(Kind::False), 5));
    }

    #[test]
    fn reports_mismatch_offset() {
        assert_eq!(feed(b"nill"), (Step::Reject, 1));
        assert_eq!(feed(b"falze"), (Step::Reject, 3));
        assert_eq!(feed(b"tru"), (Step::NeedMore, 3));
    }

    #[test]
    fn rejects_other_starts() {
        assert!(ExpectedLiteralBuffer::new(b'x').is_none());
        assert!(ExpectedLiteralBuffer::new(b'N').is_none());
    }
}
