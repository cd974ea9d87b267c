//! RAR4 main archive header.
//!
//! The archive header follows the marker and carries archive-level flags.
//! Its body is HIGH_POS_AV (2), POS_AV (4) and, only with flag 0x0200,
//! ENCRYPT_VER (1). An archive comment may follow inside the block; the
//! engine skips it by block size.

use std::io::{Read, Seek};

use super::VolumeHeader;
use crate::error::Result;
use crate::parsing::flags::is_flag_set;
use crate::parsing::ByteReader;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainHead {
    pub high_pos_av: u16,
    pub pos_av: u32,
    pub encryption_version: Option<u8>,
    // Parsed flags
    pub is_volume: bool,
    pub has_comment: bool,
    pub is_locked: bool,
    pub is_solid: bool,
    pub is_new_name_scheme: bool,
    pub has_auth_info: bool,
    pub has_recovery: bool,
    pub is_block_encoded: bool,
    pub is_first_volume: bool,
}

pub struct MainHeaderParser;

impl MainHeaderParser {
    const ENCRYPT_VER: u16 = 0x0200;

    /// Parse the body of a MAIN_HEAD block; the cursor must sit right after
    /// its volume header.
    pub fn parse<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        header: &VolumeHeader,
    ) -> Result<MainHead> {
        let flags = header.flags;
        let high_pos_av = reader.read_u16_le()?;
        let pos_av = reader.read_u32_le()?;
        let encryption_version = if is_flag_set(flags, Self::ENCRYPT_VER) {
            Some(reader.read_u8()?)
        } else {
            None
        };

        Ok(MainHead {
            high_pos_av,
            pos_av,
            encryption_version,
            is_volume: is_flag_set(flags, 0x0001),
            has_comment: is_flag_set(flags, 0x0002),
            is_locked: is_flag_set(flags, 0x0004),
            is_solid: is_flag_set(flags, 0x0008),
            is_new_name_scheme: is_flag_set(flags, 0x0010),
            has_auth_info: is_flag_set(flags, 0x0020),
            has_recovery: is_flag_set(flags, 0x0040),
            is_block_encoded: is_flag_set(flags, 0x0080),
            is_first_volume: is_flag_set(flags, 0x0100),
        })
    }
}
