//! Normalized file record produced by both header engines.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use super::rar4::ExtendedTime;
use super::rar5::CompressionInfo;

/// One file (or RAR5 service) record, decoded in wire order.
///
/// Every field has an explicit default so a record that omits optional
/// fields still compares and clones totally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHead {
    /// Compressed payload size
    pub packed_size: u64,
    /// Uncompressed size, composed from split halves in RAR4
    pub unpacked_size: u64,
    /// Host OS that created the entry
    pub host_os: u8,
    /// File CRC32 as 8 uppercase hex digits, empty if the record has none
    pub crc32: String,
    /// Base modification time
    pub modification_time: Option<NaiveDateTime>,
    pub creation_time: Option<NaiveDateTime>,
    pub access_time: Option<NaiveDateTime>,
    /// Version needed to unpack (RAR4 byte, always 5 for RAR5)
    pub unpack_version: u8,
    /// Compression method (RAR4 0x30-0x35, RAR5 0-5)
    pub method: u8,
    /// Raw name bytes as stored
    pub name: Vec<u8>,
    pub attributes: u64,
    pub is_directory: bool,
    pub is_encrypted: bool,
    /// RAR4 encryption salt
    pub salt: Option<[u8; 8]>,
    /// RAR4 high-precision time record
    pub extended_time: Option<ExtendedTime>,
    /// RAR5 compression bitfield
    pub compression: Option<CompressionInfo>,
}

impl FileHead {
    /// Display name: the bytes before the first NUL, decoded as UTF-8.
    ///
    /// RAR4 headers with the Unicode flag store `legacy\0encoded`; the part
    /// after the NUL is not decoded.
    pub fn display_name(&self) -> Cow<'_, str> {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.name.len());
        String::from_utf8_lossy(&self.name[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_utf8() {
        let head = FileHead {
            name: "test2/很好。.txt".as_bytes().to_vec(),
            ..Default::default()
        };
        assert_eq!(head.display_name(), "test2/很好。.txt");
    }

    #[test]
    fn test_display_name_stops_at_nul() {
        let head = FileHead {
            name: b"readme.txt\0\x01\x02\x03".to_vec(),
            ..Default::default()
        };
        assert_eq!(head.display_name(), "readme.txt");
    }

    #[test]
    fn test_defaults_are_empty() {
        let head = FileHead::default();
        assert!(head.crc32.is_empty());
        assert_eq!(head.unpacked_size, 0);
        assert!(head.modification_time.is_none());
        assert!(!head.is_directory);
    }
}
