#![no_main]

use arbitrary::Arbitrary;
use jsonstruct::{Error, ParserOptions, Tokenizer, from_reader_with_options, from_slice};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    buffer_size: u8,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let options = ParserOptions::with_buffer_size(usize::from(input.buffer_size) + 1);

    // The token stream must end, and positions never point past the input.
    let mut tokens = Tokenizer::with_options(&input.data[..], options);
    loop {
        match tokens.next() {
            Ok(()) => {}
            Err(Error::EndOfStream) => break,
            Err(e) => {
                if let Some(pos) = e.position() {
                    assert!(pos <= input.data.len() as u64, "{e} for {:?}", input.data);
                }
                break;
            }
        }
    }

    let small = from_reader_with_options(&input.data[..], options);
    let large = from_slice(&input.data);
    assert_eq!(small, large, "buffer size changed the result");

    match large {
        Ok(value) => {
            let text = value.to_string();
            let again = jsonstruct::from_str(&text).expect("rendered text must decode");
            assert_eq!(again.to_string(), text);
        }
        Err(_) => {
            // Anything serde_json accepts within its nesting limit we accept too.
            assert!(serde_json::from_slice::<serde_json::Value>(&input.data).is_err());
        }
    }
});
