//! RAR format detection and signatures.

pub mod time;

use std::io::{Read, Seek};

use crate::error::{RarError, Result};
use crate::parsing::ByteReader;

/// RAR file signature detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    /// RAR 1.5 to 4.x
    Rar15,
    /// RAR 5.0+
    Rar50,
}

impl Signature {
    pub const RAR15: &[u8; 7] = b"Rar!\x1a\x07\x00";
    pub const RAR50: &[u8; 8] = b"Rar!\x1a\x07\x01\x00";

    /// Archive format generation: 4 or 5.
    pub fn version(&self) -> u8 {
        match self {
            Self::Rar15 => 4,
            Self::Rar50 => 5,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(Self::RAR15) {
            Some(Self::Rar15)
        } else if data.starts_with(Self::RAR50) {
            Some(Self::Rar50)
        } else {
            None
        }
    }

    /// Probe the signature at the start of the stream.
    ///
    /// Reads 7 bytes for the legacy marker; on mismatch rewinds to offset 0
    /// and reads 8 for the RAR5 marker. On success the cursor sits right
    /// after the matched signature. A stream too short to hold either marker
    /// is reported as unrecognized.
    pub fn detect<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<Self> {
        reader.seek_to(0)?;
        match reader.read_array::<7>() {
            Ok(head) if &head == Self::RAR15 => return Ok(Self::Rar15),
            Ok(_) | Err(RarError::TruncatedStream { .. }) => {}
            Err(e) => return Err(e),
        }

        reader.seek_to(0)?;
        match reader.read_array::<8>() {
            Ok(head) if &head == Self::RAR50 => Ok(Self::Rar50),
            Ok(_) | Err(RarError::TruncatedStream { .. }) => Err(RarError::UnrecognizedFormat),
            Err(e) => Err(e),
        }
    }
}
