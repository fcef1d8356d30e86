#![no_main]
use huff7::HuffmanCode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, Vec<u8>)| {
    let (text, noise) = data;
    let text: Vec<u8> = text.into_iter().map(|b| b & 0x7F).collect();

    let code = match HuffmanCode::from_symbols(&text) {
        Ok(code) => code,
        Err(_) => return,
    };

    let packed = code.compress(&text).unwrap();
    assert_eq!(code.decompress(&packed).unwrap(), text);

    // Arbitrary bytes must decode or fail cleanly, never panic.
    let _ = code.decompress(&noise);
});
