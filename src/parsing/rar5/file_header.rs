//! RAR5 file header parser.
//!
//! File (type 2) and service (type 3) headers share one layout after the
//! common prefix:
//!
//! ```text
//! FLAGS | [EXTRA_SIZE] | [DATA_SIZE] | FILE_FLAGS | UNP_SIZE | ATTRIBUTES |
//! [MTIME 4] | [DATA_CRC32 4] | COMP_INFO | HOST_OS | NAME_LEN | NAME |
//! [EXTRA AREA] | [DATA AREA]
//! ```

use std::io::{Read, Seek};

use super::{read_vint, CompressionInfo, ExtraAreaParser, Rar5BlockHeader, Rar5HeaderFlags};
use crate::error::{RarError, Result};
use crate::formats::time::unix_datetime;
use crate::parsing::{ByteReader, FileHead};

/// RAR5 file flags (specific to file and service headers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rar5FileFlags {
    /// File is a directory
    pub is_directory: bool,
    /// File modification time is present
    pub has_mtime: bool,
    /// File CRC32 is present
    pub has_crc32: bool,
    /// Unpacked size is unknown
    pub unpacked_size_unknown: bool,
}

impl From<u64> for Rar5FileFlags {
    fn from(flags: u64) -> Self {
        Self {
            is_directory: flags & 0x0001 != 0,
            has_mtime: flags & 0x0002 != 0,
            has_crc32: flags & 0x0004 != 0,
            unpacked_size_unknown: flags & 0x0008 != 0,
        }
    }
}

pub struct Rar5FileHeaderParser;

impl Rar5FileHeaderParser {
    /// Version reported for every RAR5 record.
    pub const UNPACK_VERSION: u8 = 5;

    /// Decode a file or service record whose common prefix was just read,
    /// then leave the cursor after its data area.
    pub fn parse<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        block: &Rar5BlockHeader,
    ) -> Result<FileHead> {
        let header_flags = Rar5HeaderFlags::from(read_vint(reader)?);
        let extra_area_size = if header_flags.has_extra_area {
            read_vint(reader)?
        } else {
            0
        };
        let packed_size = if header_flags.has_data_area {
            read_vint(reader)?
        } else {
            0
        };

        let file_flags = Rar5FileFlags::from(read_vint(reader)?);
        let unpacked_size = read_vint(reader)?;
        let attributes = read_vint(reader)?;

        let modification_time = if file_flags.has_mtime {
            unix_datetime(i64::from(reader.read_u32_le()?))
        } else {
            None
        };

        let crc32 = if file_flags.has_crc32 {
            reader.read_crc32_hex()?
        } else {
            String::new()
        };

        let compression = CompressionInfo::from(read_vint(reader)?);
        let host_os = read_vint(reader)?;
        let host_os = u8::try_from(host_os).map_err(|_| {
            RarError::malformed(block.offset, format!("host OS {} out of range", host_os))
        })?;
        let name_size = read_vint(reader)?;
        let name = reader.read_bytes(name_size)?;

        let mut head = FileHead {
            packed_size,
            unpacked_size,
            host_os,
            crc32,
            modification_time,
            unpack_version: Self::UNPACK_VERSION,
            method: compression.method,
            name,
            attributes,
            is_directory: file_flags.is_directory,
            compression: Some(compression),
            ..Default::default()
        };

        if header_flags.has_extra_area && extra_area_size > 0 {
            ExtraAreaParser::parse(reader, &mut head, extra_area_size)?;
        }

        log::debug!(
            "rar5 {} {:?}: packed {} unpacked {} {}",
            if block.header_type == 3 { "service" } else { "file" },
            head.display_name(),
            head.packed_size,
            head.unpacked_size,
            compression
        );

        if header_flags.has_data_area && packed_size > 0 {
            reader.skip(packed_size)?;
        }

        Ok(head)
    }
}
