//! RAR4 block header ("volume header").
//!
//! Every RAR4 block starts with the same 7 bytes:
//!
//! | Field    | Size | Notes                                        |
//! |----------|------|----------------------------------------------|
//! | HEAD_CRC | 2    | low 16 bits of the header CRC32              |
//! | HEAD_TYPE| 1    | 0x72-0x7B                                    |
//! | FLAGS    | 2    | bit 0x8000: ADD_SIZE follows                 |
//! | SIZE     | 2    | header size including these fields           |
//! | ADD_SIZE | 4    | only with 0x8000, payload size after header  |

use std::io::{Read, Seek};

use super::LONG_BLOCK;
use crate::error::{RarError, Result};
use crate::parsing::flags::is_flag_set;
use crate::parsing::ByteReader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeHeader {
    /// Offset of the block's first byte.
    pub offset: u64,
    /// Header CRC16, reversed uppercase hex.
    pub crc16: String,
    pub block_type: u8,
    pub flags: u16,
    /// SIZE field as stored.
    pub size: u16,
    /// Bytes consumed by this fixed header: 7, or 11 with ADD_SIZE.
    pub header_size: u8,
    /// SIZE minus the fixed header.
    pub body_size: u64,
    /// ADD_SIZE, zero when absent.
    pub add_size: u32,
    /// SIZE plus ADD_SIZE: distance from `offset` to the next block.
    pub block_size: u64,
}

impl VolumeHeader {
    pub const SHORT_SIZE: u8 = 7;
    pub const LONG_SIZE: u8 = 11;

    pub fn has_add_size(&self) -> bool {
        is_flag_set(self.flags, LONG_BLOCK)
    }
}

pub struct VolumeHeaderParser;

impl VolumeHeaderParser {
    pub fn parse<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<VolumeHeader> {
        let offset = reader.position();
        let crc16 = reader.read_crc16_hex()?;
        let block_type = reader.read_u8()?;
        let flags = reader.read_u16_le()?;
        let size = reader.read_u16_le()?;

        let (header_size, add_size) = if is_flag_set(flags, LONG_BLOCK) {
            (VolumeHeader::LONG_SIZE, reader.read_u32_le()?)
        } else {
            (VolumeHeader::SHORT_SIZE, 0)
        };

        // A block shorter than its own fixed header would never advance.
        if size < u16::from(header_size) {
            return Err(RarError::malformed(
                offset,
                format!(
                    "block 0x{:02x} size {} below header size {}",
                    block_type, size, header_size
                ),
            ));
        }

        Ok(VolumeHeader {
            offset,
            crc16,
            block_type,
            flags,
            size,
            header_size,
            body_size: u64::from(size - u16::from(header_size)),
            add_size,
            block_size: u64::from(size) + u64::from(add_size),
        })
    }
}
