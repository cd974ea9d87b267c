#![no_main]
use libfuzzer_sys::fuzz_target;
use rar_header::parsing::rar4::Rar4Parser;
use rar_header::parsing::ByteReader;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Engine straight on the block chain, no signature
    let mut cursor = Cursor::new(data);
    if let Ok(mut reader) = ByteReader::new(&mut cursor) {
        let _ = Rar4Parser::parse(&mut reader);
    }
});
