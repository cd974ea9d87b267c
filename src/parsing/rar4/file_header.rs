//! RAR4 file header parser.
//!
//! Each file in a RAR archive has a file header that describes
//! the file's name, size, compression method, etc. The packed size lives
//! in the enclosing block's ADD_SIZE.
//!
//! Field order after the 11-byte block header:
//!
//! ```text
//! UNP_SIZE 4 | HOST_OS 1 | FILE_CRC 4 | FTIME 2+2 | UNP_VER 1 | METHOD 1 |
//! NAME_SIZE 2 | ATTR 4 | [HIGH_PACK 4 | HIGH_UNP 4] | NAME | [SALT 8] |
//! [EXT_TIME]
//! ```

use std::io::{Read, Seek};

use super::{
    BlockType, ExtendedTimeParser, VolumeHeader, FILE_DIRECTORY, FILE_DIRECTORY_MASK,
    FILE_ENCRYPTED, FILE_EXT_TIME, FILE_HIGH_SIZE, FILE_SALT,
};
use crate::error::Result;
use crate::formats::time::dos_datetime;
use crate::parsing::flags::{compose_u64, is_flag_set};
use crate::parsing::{ByteReader, FileHead};

pub struct FileHeaderParser;

impl FileHeaderParser {
    /// Decode a file record whose volume header was just read, then leave
    /// the cursor on the next block.
    pub fn parse<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        header: &VolumeHeader,
    ) -> Result<FileHead> {
        let flags = header.flags;

        let low_unpacked = reader.read_u32_le()?;
        let host_os = reader.read_u8()?;
        let crc32 = reader.read_crc32_hex()?;
        let time = reader.read_u16_le()?;
        let date = reader.read_u16_le()?;
        let modification_time = dos_datetime(time, date);
        let unpack_version = reader.read_u8()?;
        let method = reader.read_u8()?;
        let name_size = reader.read_u16_le()?;
        let attributes = reader.read_u32_le()?;

        let (high_packed, high_unpacked) = if is_flag_set(flags, FILE_HIGH_SIZE) {
            (reader.read_u32_le()?, reader.read_u32_le()?)
        } else {
            (0, 0)
        };

        let name = reader.read_bytes(u64::from(name_size))?;

        let salt = if is_flag_set(flags, FILE_SALT) {
            Some(reader.read_array::<8>()?)
        } else {
            None
        };

        let extended_time = if is_flag_set(flags, FILE_EXT_TIME) {
            Some(ExtendedTimeParser::parse(reader, modification_time)?)
        } else {
            None
        };

        let head = FileHead {
            packed_size: compose_u64(high_packed, header.add_size),
            unpacked_size: compose_u64(high_unpacked, low_unpacked),
            host_os,
            crc32,
            modification_time: Some(modification_time),
            creation_time: extended_time.and_then(|t| t.creation),
            access_time: extended_time.and_then(|t| t.access),
            unpack_version,
            method,
            name,
            attributes: u64::from(attributes),
            is_directory: flags & FILE_DIRECTORY_MASK == FILE_DIRECTORY,
            is_encrypted: is_flag_set(flags, FILE_ENCRYPTED),
            salt,
            extended_time,
            compression: None,
        };

        log::debug!(
            "rar4 file {:?}: packed {} unpacked {} method 0x{:02x}",
            head.display_name(),
            head.packed_size,
            head.unpacked_size,
            head.method
        );

        Self::skip_payload(reader, head.packed_size)?;
        Ok(head)
    }

    /// Move past the packed data to the next block.
    ///
    /// Some producers write the final block two bytes short, so the end
    /// marker's type byte lands on the last payload byte. When that byte is
    /// the end-marker type, a whole end block fits from three bytes back and
    /// the regular position does not hold a block type, back up to where
    /// that end marker starts.
    fn skip_payload<R: Read + Seek>(reader: &mut ByteReader<'_, R>, packed_size: u64) -> Result<()> {
        let data_start = reader.position();
        let end = data_start.saturating_add(packed_size);

        if end < 3 || end.saturating_add(4) > reader.len() {
            return reader.seek_to(end);
        }

        reader.seek_to(end - 1)?;
        let last = reader.read_u8()?;
        if last == BlockType::End as u8 && !Self::block_type_at(reader, end + 2)? {
            log::warn!("end marker overlaps payload ending at {}, backing up", end);
            return reader.seek_to(end - 3);
        }

        reader.seek_to(end)
    }

    /// True if the byte at `offset` is a known block type.
    fn block_type_at<R: Read + Seek>(reader: &mut ByteReader<'_, R>, offset: u64) -> Result<bool> {
        if offset >= reader.len() {
            return Ok(false);
        }
        reader.seek_to(offset)?;
        Ok(BlockType::try_from(reader.read_u8()?).is_ok())
    }
}
