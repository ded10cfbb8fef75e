use rstest::rstest;

use super::*;

fn tokenizer(input: &str) -> Tokenizer<&[u8]> {
    Tokenizer::new(input.as_bytes())
}

/// Reads tokens until the stream ends or fails; returns them with the
/// terminal error.
fn tokens(input: &str, buffer_size: usize) -> (Vec<(Kind, Level, Vec<u8>)>, Error) {
    let mut t = Tokenizer::with_options(input.as_bytes(), ParserOptions::with_buffer_size(buffer_size));
    let mut out = Vec::new();
    loop {
        match t.next() {
            Ok(()) => out.push((t.kind(), t.level(), t.value().to_vec())),
            Err(e) => return (out, e),
        }
    }
}

#[rstest]
#[case("null", Kind::Null, "null")]
#[case("  null\n", Kind::Null, "null")]
#[case("true", Kind::True, "true")]
#[case("\ttrue ", Kind::True, "true")]
#[case("false", Kind::False, "false")]
#[case("123", Kind::Number, "123")]
#[case("0", Kind::Number, "0")]
#[case("-0", Kind::Number, "-0")]
#[case("-1", Kind::Number, "-1")]
#[case("9223372036854775807", Kind::Number, "9223372036854775807")]
#[case("-9223372036854775808", Kind::Number, "-9223372036854775808")]
#[case("9223372036854775808", Kind::Number, "9223372036854775808")]
#[case("-9223372036854775809", Kind::Number, "-9223372036854775809")]
#[case("18446744073709551615", Kind::Number, "18446744073709551615")]
#[case("-18446744073709551615", Kind::Number, "-18446744073709551615")]
#[case(
    "340282366920938463463374607431768211455",
    Kind::Number,
    "340282366920938463463374607431768211455"
)]
#[case("123.45", Kind::FloatNumber, "123.45")]
#[case("0.0", Kind::FloatNumber, "0.0")]
#[case("-0.0", Kind::FloatNumber, "-0.0")]
#[case("0.1e-1", Kind::FloatNumber, "0.1e-1")]
#[case(" 3.1415E5 ", Kind::FloatNumber, "3.1415E5")]
#[case("-3.1415E+5", Kind::FloatNumber, "-3.1415E+5")]
#[case("1E2", Kind::FloatNumber, "1E2")]
#[case(
    "1.618033988749894848204586834365638117720309179805762862135e999",
    Kind::FloatNumber,
    "1.618033988749894848204586834365638117720309179805762862135e999"
)]
#[case(r#""abc xyz""#, Kind::String, r#""abc xyz""#)]
#[case(r#""abc\"xyz""#, Kind::String, r#""abc\"xyz""#)]
#[case(r#""abc\\xyz""#, Kind::String, r#""abc\\xyz""#)]
#[case(r#""abc\/xyz""#, Kind::String, r#""abc\/xyz""#)]
#[case(r#""abc\bxyz""#, Kind::String, r#""abc\bxyz""#)]
#[case(r#""abc\fxyz""#, Kind::String, r#""abc\fxyz""#)]
#[case(r#""abc\nxyz""#, Kind::String, r#""abc\nxyz""#)]
#[case(r#""abc\rxyz""#, Kind::String, r#""abc\rxyz""#)]
#[case(r#""abc\txyz""#, Kind::String, r#""abc\txyz""#)]
#[case(r#""abc\u00A0xyz""#, Kind::String, r#""abc\u00A0xyz""#)]
#[case(r#""abc\u002Fxyz""#, Kind::String, r#""abc\u002Fxyz""#)]
#[case(r#""abc\u002fxyz""#, Kind::String, r#""abc\u002fxyz""#)]
#[case(r#""abc/xyz""#, Kind::String, r#""abc/xyz""#)]
#[case(r#""""#, Kind::String, r#""""#)]
#[case(r#"  "héllo"  "#, Kind::String, r#""héllo""#)]
fn scalar_tokens(#[case] input: &str, #[case] kind: Kind, #[case] value: &str) {
    let mut t = tokenizer(input);
    t.next().unwrap();
    assert_eq!(t.kind(), kind, "{input:?}");
    assert_eq!(t.level(), Level::Root);
    assert_eq!(t.value(), value.as_bytes(), "{input:?}");
    assert!(t.is_done());
    assert_eq!(t.next(), Err(Error::EndOfStream));
}

#[rstest]
#[case(r#""2015-05-14T12:34:56.379+02:00""#)]
#[case(r#""1970-01-01T00:00:00Z""#)]
#[case(r#""0001-01-01T00:00:00Z""#)]
#[case(r#""1985-04-12T23:20:50.52Z""#)]
#[case(r#""1996-12-19T16:39:57-08:00""#)]
#[case(r#""1990-12-31T23:59:60Z""#)]
#[case(r#""1990-12-31T15:59:60-08:00""#)]
#[case(r#""1937-01-01T12:00:27.87+00:20""#)]
#[case(r#""2015-05-14T12:34:56.3791589+02:00""#)]
fn time_tokens(#[case] input: &str) {
    let mut t = tokenizer(input);
    t.next().unwrap();
    assert_eq!(t.kind(), Kind::Time);
    assert_eq!(t.value(), input.as_bytes());
}

#[rstest]
#[case(r#""2015-05-14E12:34:56.379+02:00""#)]
#[case(r#""2O15-O5-14T12:34:56.379+02:00""#)]
#[case(r#""2022-07-12T21:55:52ZZZZ""#)]
#[case(r#""2022-07-12 21:55:16""#)]
#[case(r#""20220712T215516Z""#)]
#[case(r#""2022-07-12T21:55:50.Z""#)]
#[case(r#""not a Timestamp""#)]
fn near_time_tokens_are_strings(#[case] input: &str) {
    let mut t = tokenizer(input);
    t.next().unwrap();
    assert_eq!(t.kind(), Kind::String);
}

#[rstest]
#[case("n", 1, Some(SyntaxError::EndOfStream), "n")]
#[case("   nill", 4, None, "ni")]
#[case("nnn", 1, None, "nn")]
#[case("nulle", 4, None, "nulle")]
#[case("null\t\t\tnull", 7, None, "null\t\t\tn")]
#[case(" folse ", 2, None, "fo")]
#[case("falze", 3, None, "falz")]
#[case("fals", 4, Some(SyntaxError::EndOfStream), "fals")]
#[case("f ", 1, None, "f ")]
#[case("falsez", 5, None, "falsez")]
#[case("truae ", 3, None, "trua")]
#[case("trues", 4, None, "trues")]
#[case(" t ", 2, None, "t ")]
#[case("9 0 6 4", 2, None, "9 0")]
#[case("-e", 1, None, "-e")]
#[case("25$E1", 2, None, "25$")]
#[case("123l1", 3, None, "123l")]
#[case("1e", 1, Some(SyntaxError::EndOfStream), "1e")]
#[case("1234e  ", 5, None, "1234e ")]
#[case("11$!", 2, None, "11$")]
#[case("- 123", 1, None, "- ")]
#[case("01", 1, None, "01")]
#[case("-", 0, Some(SyntaxError::EndOfStream), "-")]
#[case("0.", 1, Some(SyntaxError::EndOfStream), "0.")]
#[case("0.e", 2, None, "0.e")]
#[case("0.1e", 3, Some(SyntaxError::EndOfStream), "0.1e")]
#[case("123.4l1", 5, None, "123.4l")]
#[case("-3.", 2, Some(SyntaxError::EndOfStream), "-3.")]
#[case("-3.e", 3, None, "-3.e")]
#[case("-3.1e", 4, Some(SyntaxError::EndOfStream), "-3.1e")]
#[case("3.1415926535.89793", 12, None, "3.1415926535.")]
#[case("3.14159265Ee589793", 11, None, "3.14159265Ee")]
#[case("3.14159265E+", 11, Some(SyntaxError::EndOfStream), "3.14159265E+")]
#[case("3.14159265E-", 11, Some(SyntaxError::EndOfStream), "3.14159265E-")]
#[case("161803398.874989opq", 16, None, "161803398.874989o")]
#[case("16180.3398.874989e", 10, None, "16180.3398.")]
#[case(r#""abc"#, 3, Some(SyntaxError::EndOfStream), r#""abc"#)]
#[case(r#""abc"xyz"#, 5, None, r#""abc"x"#)]
#[case(r#"""""#, 2, None, r#"""""#)]
#[case(r#"""\""#, 2, None, r#"""\"#)]
#[case(r#""\u2O70""#, 4, Some(SyntaxError::InvalidHexNumber), r#""\u2O"#)]
#[case(r#""\uD8Y4\uDD1E""#, 5, Some(SyntaxError::InvalidHexNumber), r#""\uD8Y"#)]
#[case(r#""\x15""#, 2, Some(SyntaxError::InvalidEscapeCharacter), r#""\x"#)]
#[case("\"a\nb\"", 2, Some(SyntaxError::InvalidCharacter), "\"a\n")]
#[case("\"a\rb\"", 2, Some(SyntaxError::InvalidCharacter), "\"a\r")]
#[case("\"a\tb\"", 2, Some(SyntaxError::InvalidCharacter), "\"a\t")]
#[case("\"a\u{1}b\"", 2, Some(SyntaxError::InvalidCharacter), "\"a\u{1}")]
fn positioned_errors(
    #[case] input: &str,
    #[case] pos: u64,
    #[case] cause: Option<SyntaxError>,
    #[case] value: &str,
) {
    let mut t = tokenizer(input);
    let err = t.next().unwrap_err();
    assert_eq!(err, Error::InvalidJsonAt { pos, cause }, "{input:?}");
    assert_eq!(err.position(), Some(pos));
    assert_eq!(t.value(), value.as_bytes(), "{input:?}");
    assert_eq!(t.kind(), Kind::Unknown);
}

#[rstest]
#[case("", Some(SyntaxError::EndOfStream))]
#[case(" \t\r\n ", Some(SyntaxError::EndOfStream))]
#[case(".01", None)]
#[case(r#"abc""#, None)]
#[case("+1", None)]
#[case("]", None)]
#[case("}", None)]
#[case("Null", None)]
fn unpositioned_errors(#[case] input: &str, #[case] cause: Option<SyntaxError>) {
    let mut t = tokenizer(input);
    let err = t.next().unwrap_err();
    assert_eq!(err, Error::InvalidJson { cause }, "{input:?}");
    assert_eq!(err.position(), None);
    assert_eq!(t.value(), b"", "{input:?}");
    assert_eq!(t.kind(), Kind::Unknown);
}

#[test]
fn failed_tokenizer_stays_failed() {
    let mut t = tokenizer("[1,x]");
    t.next().unwrap();
    t.next().unwrap();
    assert_eq!(t.next(), Err(Error::at(3, None)));
    assert_eq!(t.next(), Err(Error::invalid(None)));
    assert_eq!(t.next(), Err(Error::invalid(None)));
}

#[test]
fn array_levels() {
    let (toks, end) = tokens("[ null , [true,false] ,\"x\", [] ]", 4096);
    let shape: Vec<_> = toks.iter().map(|(k, l, _)| (*k, *l)).collect();
    assert_eq!(
        shape,
        vec![
            (Kind::Literal, Level::Array),
            (Kind::Null, Level::Value),
            (Kind::Literal, Level::Array),
            (Kind::True, Level::Value),
            (Kind::False, Level::ValueLast),
            (Kind::Literal, Level::ArrayEnd),
            (Kind::String, Level::Value),
            (Kind::Literal, Level::Array),
            (Kind::Literal, Level::ArrayEnd),
            (Kind::Literal, Level::ArrayEnd),
        ]
    );
    assert_eq!(toks[0].2, b"");
    assert_eq!(toks[5].2, b"]");
    assert_eq!(toks[6].2, br#""x""#);
    assert_eq!(end, Error::EndOfStream);
}

#[test]
fn object_levels() {
    let (toks, end) = tokens(
        r#"{"a": 1, "t": "2015-05-14T12:34:56Z", "2015-05-14T12:34:56Z": {}, "o": {"b": [1.5]}}"#,
        4096,
    );
    let shape: Vec<_> = toks.iter().map(|(k, l, v)| (*k, *l, String::from_utf8_lossy(v).into_owned())).collect();
    let expected: Vec<(Kind, Level, &str)> = vec![
        (Kind::Literal, Level::Object, ""),
        (Kind::String, Level::Key, r#""a""#),
        (Kind::Number, Level::Value, "1"),
        (Kind::String, Level::Key, r#""t""#),
        (Kind::Time, Level::Value, r#""2015-05-14T12:34:56Z""#),
        (Kind::String, Level::Key, r#""2015-05-14T12:34:56Z""#),
        (Kind::Literal, Level::Object, ""),
        (Kind::Literal, Level::ObjectEnd, "}"),
        (Kind::String, Level::Key, r#""o""#),
        (Kind::Literal, Level::Object, ""),
        (Kind::String, Level::Key, r#""b""#),
        (Kind::Literal, Level::Array, ""),
        (Kind::FloatNumber, Level::ValueLast, "1.5"),
        (Kind::Literal, Level::ArrayEnd, "]"),
        (Kind::Literal, Level::ObjectEnd, "}"),
        (Kind::Literal, Level::ObjectEnd, "}"),
    ];
    let expected: Vec<_> = expected
        .into_iter()
        .map(|(k, l, v)| (k, l, v.to_string()))
        .collect();
    assert_eq!(shape, expected);
    assert_eq!(end, Error::EndOfStream);
}

#[rstest]
#[case("[1,", 2)]
#[case("[1", 1)]
#[case("[1 ", 2)]
#[case("[true", 4)]
#[case(r#"{"a""#, 3)]
#[case(r#"{"a":"#, 4)]
#[case(r#"{"a":1"#, 5)]
#[case("[", 0)]
#[case("[[]", 2)]
fn unterminated_containers(#[case] input: &str, #[case] pos: u64) {
    let (_, end) = tokens(input, 4096);
    assert_eq!(end, Error::at(pos, Some(SyntaxError::EndOfStream)), "{input:?}");
}

#[rstest]
#[case("[1}", 2)]
#[case("[1,]", 3)]
#[case("[,1]", 1)]
#[case("[1 2]", 3)]
#[case(r#"{"a":1]"#, 6)]
#[case(r#"{"a" 1}"#, 5)]
#[case(r#"{"a":1,}"#, 7)]
#[case("{1:2}", 1)]
#[case("{,}", 1)]
#[case("[1]]", 3)]
#[case("{} {}", 3)]
#[case("[x]", 1)]
fn malformed_containers(#[case] input: &str, #[case] pos: u64) {
    let (_, end) = tokens(input, 4096);
    assert_eq!(end, Error::at(pos, None), "{input:?}");
}

#[test]
fn tokens_survive_buffer_growth() {
    let long = "x".repeat(300);
    let input = format!(r#"[ "{long}" , 123456789.25e3,"2015-05-14T12:34:56.379+02:00"]"#);
    for size in [1, 2, 3, 7, 16, 4096] {
        let (toks, end) = tokens(&input, size);
        assert_eq!(end, Error::EndOfStream, "size {size}");
        assert_eq!(toks.len(), 5, "size {size}");
        assert_eq!(toks[1].2, format!("\"{long}\"").as_bytes(), "size {size}");
        assert_eq!(toks[2].2, b"123456789.25e3", "size {size}");
        assert_eq!(toks[3].0, Kind::Time, "size {size}");
    }
}

#[test]
fn error_positions_are_absolute_across_refills() {
    let input = format!("[{}tru]", "1,".repeat(100));
    let (toks, end) = tokens(&input, 8);
    assert_eq!(toks.len(), 101);
    assert_eq!(end, Error::at(204, None));
}

#[test]
fn token_debug_uses_text() {
    let mut t = tokenizer(r#""a\nb""#);
    t.next().unwrap();
    assert_eq!(
        format!("{:?}", t.token()),
        r#"Token { kind: String, level: Root, value: "\"a\\nb\"" }"#
    );
}
