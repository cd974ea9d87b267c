//! RAR 1.5-4.x header engine.
//!
//! The legacy format is a flat chain of blocks, each opened by the same
//! fixed [`VolumeHeader`]. The engine walks the chain from just after the
//! 7-byte signature, decodes MAIN_HEAD and FILE_HEAD blocks and skips every
//! other block by its declared size until ENDARC_HEAD or end of stream.

pub mod extended_time;
pub mod file_header;
pub mod main_header;
pub mod vint;
pub mod volume_header;

use std::io::{Read, Seek};

pub use extended_time::{ExtendedTime, ExtendedTimeParser};
pub use file_header::FileHeaderParser;
pub use main_header::{MainHead, MainHeaderParser};
pub use vint::read_legacy_vint;
pub use volume_header::{VolumeHeader, VolumeHeaderParser};

use crate::error::Result;
use crate::formats::Signature;
use crate::parsing::{ByteReader, ParsedArchive};

/// Block flag: a 4-byte ADD_SIZE follows the fixed header.
pub const LONG_BLOCK: u16 = 0x8000;

/// File flags (FILE_HEAD block flags).
pub const FILE_ENCRYPTED: u16 = 0x0004;
pub const FILE_DIRECTORY_MASK: u16 = 0x00E0;
pub const FILE_DIRECTORY: u16 = 0x00E0;
pub const FILE_HIGH_SIZE: u16 = 0x0100;
pub const FILE_SALT: u16 = 0x0400;
pub const FILE_EXT_TIME: u16 = 0x1000;

/// RAR4 block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockType {
    Mark = 0x72,
    Main = 0x73,
    File = 0x74,
    Comment = 0x75,
    Av = 0x76,
    Sub = 0x77,
    Protect = 0x78,
    Sign = 0x79,
    NewSub = 0x7A,
    End = 0x7B,
}

impl TryFrom<u8> for BlockType {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0x72 => Ok(Self::Mark),
            0x73 => Ok(Self::Main),
            0x74 => Ok(Self::File),
            0x75 => Ok(Self::Comment),
            0x76 => Ok(Self::Av),
            0x77 => Ok(Self::Sub),
            0x78 => Ok(Self::Protect),
            0x79 => Ok(Self::Sign),
            0x7A => Ok(Self::NewSub),
            0x7B => Ok(Self::End),
            other => Err(other),
        }
    }
}

pub struct Rar4Parser;

impl Rar4Parser {
    /// Walk the block chain. The cursor must sit right after the signature.
    pub fn parse<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<ParsedArchive> {
        let mut archive = ParsedArchive::new(Signature::Rar15);

        while !reader.is_eof() {
            let header = VolumeHeaderParser::parse(reader)?;
            log::debug!(
                "rar4 block 0x{:02x} at {} size {} add {}",
                header.block_type,
                header.offset,
                header.size,
                header.add_size
            );

            match BlockType::try_from(header.block_type) {
                Ok(BlockType::Main) => {
                    archive.main_head = Some(MainHeaderParser::parse(reader, &header)?);
                    // Skips the archive comment, if any.
                    reader.seek_to(header.offset + header.block_size)?;
                }
                Ok(BlockType::File) => {
                    archive.files.push(FileHeaderParser::parse(reader, &header)?);
                }
                Ok(BlockType::End) => break,
                other => {
                    log::debug!("skipping rar4 block {:?} at {}", other, header.offset);
                    reader.seek_to(header.offset + header.block_size)?;
                }
            }
        }

        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RarError;
    use std::io::Cursor;

    const MAIN: [u8; 13] = [
        0xCF, 0x90, 0x73, 0x00, 0x00, 0x0D, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    const END: [u8; 7] = [0xC4, 0x3D, 0x7B, 0x00, 0x40, 0x07, 0x00];

    fn file_block(name: &[u8], payload: &[u8]) -> Vec<u8> {
        let size = (32 + name.len()) as u16;
        let mut out = vec![0x00, 0x00, 0x74, 0x00, 0x80];
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.push(2);
        out.extend_from_slice(&[0x00; 4]);
        out.extend_from_slice(&[0x00, 0x00, 0x21, 0x00]);
        out.push(29);
        out.push(0x30);
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0x20u32.to_le_bytes());
        out.extend_from_slice(name);
        out.extend_from_slice(payload);
        out
    }

    fn parse(body: &[u8]) -> Result<ParsedArchive> {
        let mut bytes = Signature::RAR15.to_vec();
        bytes.extend_from_slice(body);
        let mut cursor = Cursor::new(bytes);
        let mut reader = ByteReader::new(&mut cursor)?;
        reader.seek_to(7)?;
        Rar4Parser::parse(&mut reader)
    }

    #[test]
    fn test_block_type_roundtrip() {
        assert_eq!(BlockType::try_from(0x74), Ok(BlockType::File));
        assert_eq!(BlockType::End as u8, 0x7B);
        assert_eq!(BlockType::try_from(0x71), Err(0x71));
        assert_eq!(BlockType::try_from(0x7C), Err(0x7C));
    }

    #[test]
    fn test_walks_main_files_and_end() {
        let mut body = MAIN.to_vec();
        body.extend(file_block(b"a.txt", b"hello"));
        body.extend(file_block(b"b.txt", b"world!"));
        body.extend_from_slice(&END);
        let archive = parse(&body).unwrap();
        assert_eq!(archive.signature, Signature::Rar15);
        assert!(archive.main_head.is_some());
        let names: Vec<_> = archive.files.iter().map(|f| f.display_name().into_owned()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        assert_eq!(archive.files[1].packed_size, 6);
    }

    #[test]
    fn test_skips_unknown_blocks_by_size() {
        let mut body = MAIN.to_vec();
        // NEWSUB block with a 3-byte payload
        body.extend_from_slice(&[0x00, 0x00, 0x7A, 0x00, 0x80, 0x0E, 0x00, 0x03, 0x00, 0x00, 0x00]);
        body.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
        body.extend_from_slice(&[0x11, 0x22, 0x33]);
        body.extend(file_block(b"after.txt", b""));
        body.extend_from_slice(&END);
        let archive = parse(&body).unwrap();
        assert_eq!(archive.files.len(), 1);
        assert_eq!(archive.files[0].display_name(), "after.txt");
    }

    #[test]
    fn test_stops_at_end_marker() {
        let mut body = MAIN.to_vec();
        body.extend_from_slice(&END);
        body.extend(file_block(b"ignored.txt", b""));
        let archive = parse(&body).unwrap();
        assert!(archive.files.is_empty());
    }

    #[test]
    fn test_main_comment_is_skipped() {
        // MAIN_HEAD with size 20: 7 bytes of comment after the fixed fields.
        let mut body = vec![0x00, 0x00, 0x73, 0x02, 0x00, 0x14, 0x00, 0, 0, 0, 0, 0, 0];
        body.extend_from_slice(b"comment");
        body.extend(file_block(b"x", b"1"));
        body.extend_from_slice(&END);
        let archive = parse(&body).unwrap();
        assert!(archive.main_head.unwrap().has_comment);
        assert_eq!(archive.files.len(), 1);
    }

    #[test]
    fn test_keeps_directories() {
        let mut body = MAIN.to_vec();
        let mut dir = file_block(b"docs", b"");
        dir[3] = 0xE0;
        body.extend(dir);
        body.extend_from_slice(&END);
        let archive = parse(&body).unwrap();
        assert_eq!(archive.files.len(), 1);
        assert!(archive.files[0].is_directory);
    }

    #[test]
    fn test_truncated_block_fails() {
        let mut body = MAIN.to_vec();
        body.extend_from_slice(&[0x00, 0x00, 0x74]);
        assert!(matches!(parse(&body), Err(RarError::TruncatedStream { .. })));
    }
}
