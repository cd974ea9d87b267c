#![no_main]
use libfuzzer_sys::fuzz_target;
use rar_header::RarFileReader;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let _ = RarFileReader::open(&mut Cursor::new(data));
});
