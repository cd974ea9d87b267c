//! RAR5 compression information bitfield.
//!
//! Layout of the vint:
//! - bits 0-5: algorithm version (0 = RAR 5.0+, 1 = RAR 7.0+)
//! - bit 6: solid
//! - bits 7-9: method (0 = store, 1-5 = compression levels)
//! - bits 10-14: dictionary size class N, size = 128 KiB * 2^N
//! - bits 15-19: version 1 only, fractional dictionary multiplier (N/32)
//! - bit 20: version 1 only, data is actually version 0

use std::fmt;

const BASE_DICT_SIZE: u64 = 128 * 1024;

/// Decoded RAR5 compression information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionInfo {
    /// Compression algorithm version
    pub version: u8,
    /// Solid flag
    pub is_solid: bool,
    /// Compression method (0 = store, 1-5 = compression levels)
    pub method: u8,
    /// Dictionary size class N
    pub dict_size_class: u8,
    /// Dictionary size in bytes, including the version 1 fraction
    pub dict_size: u64,
    /// Version 1 fractional multiplier, if the algorithm version is 1
    pub dict_size_multiplier: Option<u8>,
    /// Version 1 dictionary flags wrapped around version 0 data
    pub forced_version0: bool,
}

impl From<u64> for CompressionInfo {
    fn from(raw: u64) -> Self {
        let version = (raw & 0x3F) as u8;
        let dict_size_class = ((raw >> 10) & 0x1F) as u8;
        let mut dict_size = BASE_DICT_SIZE << dict_size_class;

        let (dict_size_multiplier, forced_version0) = if version == 1 {
            let multiplier = ((raw >> 15) & 0x1F) as u8;
            if multiplier > 0 {
                dict_size += dict_size * u64::from(multiplier) / 32;
            }
            (Some(multiplier), raw & 0x10_0000 != 0)
        } else {
            (None, false)
        };

        Self {
            version,
            is_solid: raw & 0x40 != 0,
            method: ((raw >> 7) & 0x07) as u8,
            dict_size_class,
            dict_size,
            dict_size_multiplier,
            forced_version0,
        }
    }
}

impl CompressionInfo {
    /// Check if file is stored (not compressed).
    pub fn is_stored(&self) -> bool {
        self.method == 0
    }
}

/// Short method name in the `v0:m3:32m` form archivers print.
impl fmt::Display for CompressionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kib = self.dict_size / 1024;
        let (size, unit) = if kib >= 1024 { (kib / 1024, 'm') } else { (kib, 'k') };
        write!(f, "v{}:m{}:{}{}", self.version, self.method, size, unit)
    }
}
