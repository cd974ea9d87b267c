//! RAR4 extended time record.
//!
//! A 2-byte flag word holds one nibble per time kind: bits 12-15
//! modification, 8-11 creation, 4-7 access, 0-3 archive. In each nibble
//! bit 0x8 marks the time present, bit 0x4 is the DOS odd-second carry and
//! bits 0-1 count the precision bytes that follow.
//!
//! Every nibble is decoded from the same offset right after the flag word
//! and the record is taken to be 5 bytes long, so the cursor ends at
//! `flags_end + 3` whatever the nibbles said.

use std::io::{Read, Seek};

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::formats::time::{apply_extended_precision, dos_datetime};
use crate::parsing::ByteReader;

/// Bytes the record body occupies after the flag word.
const BODY_SIZE: u64 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtendedTime {
    pub flags: u16,
    pub modification: Option<NaiveDateTime>,
    pub creation: Option<NaiveDateTime>,
    pub access: Option<NaiveDateTime>,
    pub archive: Option<NaiveDateTime>,
    pub is_unix_format: bool,
}

pub struct ExtendedTimeParser;

impl ExtendedTimeParser {
    /// Parse the record at the cursor. `modification` is the DOS time from
    /// the file header, used as the base for the modification nibble.
    pub fn parse<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        modification: NaiveDateTime,
    ) -> Result<ExtendedTime> {
        // Flags and the rest of the record can be missing at the very end.
        if reader.position() + 2 >= reader.len() {
            log::trace!("extended time record missing at {}", reader.position());
            return Ok(ExtendedTime::default());
        }

        let flags = reader.read_u16_le()?;
        let start = reader.position();
        log::trace!("extended time flags 0x{:04x} at {}", flags, start);

        let modification = Self::parse_nibble(reader, (flags >> 12) as u8, Some(modification))?;
        reader.seek_to(start)?;
        let creation = Self::parse_nibble(reader, (flags >> 8) as u8, None)?;
        reader.seek_to(start)?;
        let access = Self::parse_nibble(reader, (flags >> 4) as u8, None)?;
        reader.seek_to(start)?;
        let archive = Self::parse_nibble(reader, flags as u8, None)?;

        reader.seek_to(start + BODY_SIZE)?;

        Ok(ExtendedTime {
            flags,
            modification,
            creation,
            access,
            archive,
            is_unix_format: flags & 0x0001 != 0,
        })
    }

    fn parse_nibble<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        nibble: u8,
        base: Option<NaiveDateTime>,
    ) -> Result<Option<NaiveDateTime>> {
        let nibble = nibble & 0x0F;
        if nibble & 0x8 == 0 {
            return Ok(None);
        }

        let base = match base {
            Some(base) => base,
            None => {
                let time = reader.read_u16_le()?;
                let date = reader.read_u16_le()?;
                dos_datetime(time, date)
            }
        };

        let mut remainder = 0u32;
        for _ in 0..(nibble & 0x3) {
            let byte = u32::from(reader.read_u8()?);
            remainder = (byte << 16) | (remainder >> 8);
        }

        Ok(Some(apply_extended_precision(base, nibble, remainder)))
    }
}
