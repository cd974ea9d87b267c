//! Legacy 7-bit-sum vint.
//!
//! Each byte contributes its low 7 bits and bit 7 asks for another byte,
//! like the RAR5 vint, but the groups are summed without shifting. The two
//! encodings are not interchangeable.

use std::io::{Read, Seek};

use crate::error::Result;
use crate::parsing::ByteReader;

/// Read a legacy vint. Fails with `TruncatedStream` if the stream ends
/// before a byte with a clear continuation bit.
pub fn read_legacy_vint<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<u64> {
    let mut result = 0u64;
    loop {
        let byte = reader.read_u8()?;
        result = result.saturating_add(u64::from(byte & 0x7F));
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
}
