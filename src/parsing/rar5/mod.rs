//! RAR5 header engine.
//!
//! RAR5 uses a completely different header format than RAR4:
//! - Variable-length integers (vint) for sizes
//! - CRC-32 instead of CRC-16
//! - Different header type codes
//! - Self-describing extra areas attached to headers
//!
//! Every header starts with `CRC32 (4) | HEADER_SIZE (vint) | TYPE (vint) |
//! FLAGS (vint)`, where HEADER_SIZE counts the bytes after itself.

pub mod archive_header;
pub mod compression_info;
pub mod extra_area;
pub mod file_header;
pub mod vint;

use std::io::{Read, Seek};

pub use archive_header::{Rar5ArchiveFlags, Rar5MainHead, Rar5MainHeaderParser};
pub use compression_info::CompressionInfo;
pub use extra_area::ExtraAreaParser;
pub use file_header::{Rar5FileFlags, Rar5FileHeaderParser};
pub use vint::read_vint;

use crate::error::{RarError, Result};
use crate::formats::Signature;
use crate::parsing::{ByteReader, ParsedArchive};

/// RAR5 header type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Rar5HeaderType {
    /// Main archive header
    Main = 1,
    /// File header
    File = 2,
    /// Service header (e.g., comments, NTFS streams, ACL, recovery)
    Service = 3,
    /// Archive encryption header
    Encryption = 4,
    /// End of archive header
    End = 5,
}

impl TryFrom<u64> for Rar5HeaderType {
    type Error = u64;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Main),
            2 => Ok(Self::File),
            3 => Ok(Self::Service),
            4 => Ok(Self::Encryption),
            5 => Ok(Self::End),
            other => Err(other),
        }
    }
}

/// RAR5 common header flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rar5HeaderFlags {
    /// Extra area is present after header
    pub has_extra_area: bool,
    /// Data area is present after header
    pub has_data_area: bool,
    /// Skip header if unknown type
    pub skip_if_unknown: bool,
    /// Data continues from previous volume
    pub split_before: bool,
    /// Data continues in next volume
    pub split_after: bool,
}

impl From<u64> for Rar5HeaderFlags {
    fn from(flags: u64) -> Self {
        Self {
            has_extra_area: flags & 0x0001 != 0,
            has_data_area: flags & 0x0002 != 0,
            skip_if_unknown: flags & 0x0004 != 0,
            split_before: flags & 0x0008 != 0,
            split_after: flags & 0x0010 != 0,
        }
    }
}

/// The prefix shared by every RAR5 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rar5BlockHeader {
    /// Offset of the CRC field.
    pub offset: u64,
    /// Header CRC32, reversed uppercase hex.
    pub crc32: String,
    /// Bytes after the size field.
    pub header_size: u64,
    /// Offset right after the size field; `content_start + header_size` is
    /// the header end.
    pub content_start: u64,
    pub header_type: u64,
}

impl Rar5BlockHeader {
    /// Read the CRC, size and type fields at the cursor.
    pub fn parse<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<Self> {
        let offset = reader.position();
        let crc32 = reader.read_crc32_hex()?;
        let header_size = read_vint(reader)?;
        let content_start = reader.position();
        let header_type = read_vint(reader)?;
        Ok(Self {
            offset,
            crc32,
            header_size,
            content_start,
            header_type,
        })
    }

    pub fn end(&self) -> u64 {
        self.content_start.saturating_add(self.header_size)
    }
}

pub struct Rar5Parser;

impl Rar5Parser {
    /// Walk the header chain. The cursor must sit right after the signature.
    pub fn parse<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<ParsedArchive> {
        let mut archive = ParsedArchive::new(Signature::Rar50);
        archive.rar5_main_head = Some(Rar5MainHeaderParser::parse(reader)?);

        while !reader.is_eof() {
            let block = Rar5BlockHeader::parse(reader)?;
            log::debug!(
                "rar5 header type {} at {} size {}",
                block.header_type,
                block.offset,
                block.header_size
            );

            match Rar5HeaderType::try_from(block.header_type) {
                Ok(kind @ (Rar5HeaderType::File | Rar5HeaderType::Service)) => {
                    let head = Rar5FileHeaderParser::parse(reader, &block)?;
                    if kind == Rar5HeaderType::File && !head.is_directory {
                        archive.files.push(head);
                    }
                }
                Ok(Rar5HeaderType::End) => {
                    reader.seek_to_end()?;
                    break;
                }
                Ok(Rar5HeaderType::Encryption) => {
                    return Err(RarError::UnsupportedFeature("encrypted archive headers"));
                }
                Ok(Rar5HeaderType::Main) | Err(0) => Self::skip_block(reader, &block)?,
                Err(other) => {
                    return Err(RarError::malformed(
                        block.offset,
                        format!("invalid header type {}", other),
                    ));
                }
            }
        }

        Ok(archive)
    }

    /// Skip a header the engine does not interpret, along with its data area.
    fn skip_block<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        block: &Rar5BlockHeader,
    ) -> Result<()> {
        let flags = Rar5HeaderFlags::from(read_vint(reader)?);
        if flags.has_extra_area {
            read_vint(reader)?;
        }
        let data_size = if flags.has_data_area {
            read_vint(reader)?
        } else {
            0
        };

        log::warn!(
            "skipping rar5 header type {} at {} ({} data bytes)",
            block.header_type,
            block.offset,
            data_size
        );
        reader.seek_to(block.end().saturating_add(data_size))
    }
}
