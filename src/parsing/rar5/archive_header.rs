//! RAR5 main archive header parser.
//!
//! The main archive header appears once after the signature and contains
//! archive-level flags and an optional extra area (locator record).

use std::io::{Read, Seek};

use super::{read_vint, Rar5BlockHeader, Rar5HeaderFlags, Rar5HeaderType};
use crate::error::{RarError, Result};
use crate::parsing::ByteReader;

/// RAR5 archive flags (specific to main header).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rar5ArchiveFlags {
    /// Archive is part of multi-volume set
    pub is_volume: bool,
    /// Volume number field is present (every volume but the first)
    pub has_volume_number: bool,
    /// Solid archive
    pub is_solid: bool,
    /// Recovery record present
    pub has_recovery_record: bool,
    /// Archive is locked
    pub is_locked: bool,
}

impl From<u64> for Rar5ArchiveFlags {
    fn from(flags: u64) -> Self {
        Self {
            is_volume: flags & 0x0001 != 0,
            has_volume_number: flags & 0x0002 != 0,
            is_solid: flags & 0x0004 != 0,
            has_recovery_record: flags & 0x0008 != 0,
            is_locked: flags & 0x0010 != 0,
        }
    }
}

/// Parsed RAR5 main archive header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rar5MainHead {
    /// Header CRC32, reversed uppercase hex
    pub crc32: String,
    /// Bytes after the header size field
    pub header_size: u64,
    /// Common header flags
    pub header_flags: Rar5HeaderFlags,
    /// Archive-specific flags
    pub archive_flags: Rar5ArchiveFlags,
    /// Extra area size, zero when absent
    pub extra_area_size: u64,
}

pub struct Rar5MainHeaderParser;

impl Rar5MainHeaderParser {
    /// Parse the main archive header at the cursor, which must sit right
    /// after the 8-byte signature, and leave the cursor on the next header.
    pub fn parse<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<Rar5MainHead> {
        let block = Rar5BlockHeader::parse(reader)?;
        if Rar5HeaderType::try_from(block.header_type) != Ok(Rar5HeaderType::Main) {
            return Err(RarError::malformed(
                block.offset,
                format!("invalid main archive header type {}", block.header_type),
            ));
        }

        let header_flags = Rar5HeaderFlags::from(read_vint(reader)?);
        let extra_area_size = if header_flags.has_extra_area {
            read_vint(reader)?
        } else {
            0
        };

        let archive_flags = Rar5ArchiveFlags::from(read_vint(reader)?);
        if archive_flags.has_volume_number {
            return Err(RarError::UnsupportedFeature("multi-volume continuation"));
        }

        if extra_area_size > 0 {
            reader.skip(extra_area_size)?;
        }

        log::debug!(
            "rar5 main header crc {} flags {:?}",
            block.crc32,
            archive_flags
        );

        Ok(Rar5MainHead {
            crc32: block.crc32,
            header_size: block.header_size,
            header_flags,
            archive_flags,
            extra_area_size,
        })
    }
}
