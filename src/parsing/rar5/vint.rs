//! Variable-length integer (vint) parsing for RAR5.
//!
//! RAR5 uses variable-length integers where each byte contributes 7 bits
//! of data, and the high bit indicates if more bytes follow.
//!
//! Format:
//! - Bits 0-6: Data bits, least significant group first
//! - Bit 7: Continuation flag (1 = more bytes follow)
//!
//! At most 10 bytes encode a `u64`; the tenth byte only contributes its
//! lowest bit.

use std::io::{Read, Seek};

use crate::error::{RarError, Result};
use crate::parsing::ByteReader;

/// Maximum encoded length of a RAR5 vint.
pub const MAX_VINT_LEN: usize = 10;

/// Read a RAR5 vint from the stream.
///
/// Fails with `TruncatedStream` if the stream ends mid-value and with
/// `MalformedHeader` if no terminating byte appears within
/// [`MAX_VINT_LEN`] bytes.
pub fn read_vint<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<u64> {
    let start = reader.position();
    let mut result = 0u64;

    for i in 0..MAX_VINT_LEN {
        let byte = reader.read_u8()?;
        result |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }

    Err(RarError::malformed(
        start,
        format!("vint longer than {} bytes", MAX_VINT_LEN),
    ))
}
