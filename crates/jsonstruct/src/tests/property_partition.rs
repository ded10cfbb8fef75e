use quickcheck::QuickCheck;

use crate::{ParserOptions, Scanner, Value, from_reader_with_options, from_str};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: the scanner returns every source byte exactly once, in order,
/// whatever the buffer size and the sequence of scan lengths.
#[test]
fn scanner_spans_reassemble_the_source() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(data: Vec<u8>, steps: Vec<usize>, size: u8) -> bool {
        let options = ParserOptions::with_buffer_size(usize::from(size % 32) + 1);
        let mut scanner = Scanner::with_options(&data[..], options);
        let mut steps = steps.into_iter().map(|n| n % 7 + 1);
        let mut out = Vec::with_capacity(data.len());
        loop {
            let res = scanner.scan(steps.next().unwrap_or(3));
            out.extend_from_slice(scanner.bytes());
            match res {
                Ok(()) => {}
                Err(e) if e.is_end_of_stream() => break,
                Err(_) => return false,
            }
        }
        let last = i64::try_from(data.len()).unwrap() - 1;
        out == data && scanner.index() == last
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<usize>, u8) -> bool);
}

/// Property: rendering a value and decoding the text gives back the same
/// value with the same tags, integral and negative-zero floats included.
#[test]
fn display_then_decode_is_stable() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let text = value.to_string();
        match from_str(&text) {
            Ok(decoded) => decoded == value && decoded.to_string() == text,
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value) -> bool);
}

/// Property: decoding does not depend on how the input is buffered.
#[test]
fn decoding_is_buffer_size_independent() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value, size: u8) -> bool {
        let text = value.to_string();
        let options = ParserOptions::with_buffer_size(usize::from(size % 16) + 1);
        let small = from_reader_with_options(text.as_bytes(), options).ok();
        let large = from_str(&text).ok();
        small.is_some() && small == large
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Value, u8) -> bool);
}
