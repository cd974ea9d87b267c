//! Archive and Entry - the public model built from a header scan.
//!
//! An [`Archive`] is immutable once built. Entries keep on-disk header
//! order; RAR5 directories never appear, RAR4 directories do (callers can
//! filter on [`Entry::is_directory`]).

use chrono::NaiveDateTime;

use crate::parsing::rar4::{ExtendedTime, MainHead};
use crate::parsing::rar5::{CompressionInfo, Rar5MainHead};
use crate::parsing::{FileHead, ParsedArchive};
use crate::rar_file_reader::ParseOptions;

/// One file inside a RAR archive, as described by its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    raw_name: Vec<u8>,
    attributes: u64,
    crc: String,
    file_time: Option<NaiveDateTime>,
    creation_time: Option<NaiveDateTime>,
    access_time: Option<NaiveDateTime>,
    host_os: u8,
    method: u8,
    packed_size: u64,
    unpacked_size: u64,
    /// Version needed to unpack
    version: u8,
    is_directory: bool,
    is_encrypted: bool,
    salt: Option<[u8; 8]>,
    compression_info: Option<CompressionInfo>,
    extended_time: Option<ExtendedTime>,
}

impl From<FileHead> for Entry {
    fn from(head: FileHead) -> Self {
        Self {
            name: head.display_name().into_owned(),
            raw_name: head.name,
            attributes: head.attributes,
            crc: head.crc32,
            file_time: head.modification_time,
            creation_time: head.creation_time,
            access_time: head.access_time,
            host_os: head.host_os,
            method: head.method,
            packed_size: head.packed_size,
            unpacked_size: head.unpacked_size,
            version: head.unpack_version,
            is_directory: head.is_directory,
            is_encrypted: head.is_encrypted,
            salt: head.salt,
            compression_info: head.compression,
            extended_time: head.extended_time,
        }
    }
}

impl Entry {
    /// Display name. RAR4 names are cut at the first NUL.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name bytes exactly as stored in the header.
    pub fn raw_name(&self) -> &[u8] {
        &self.raw_name
    }

    /// Host-specific file attributes.
    pub fn attributes(&self) -> u64 {
        self.attributes
    }

    /// CRC32 of the unpacked data as 8 uppercase hex digits; empty when the
    /// RAR5 header carries none.
    pub fn crc(&self) -> &str {
        &self.crc
    }

    /// Modification time.
    pub fn file_time(&self) -> Option<NaiveDateTime> {
        self.file_time
    }

    pub fn creation_time(&self) -> Option<NaiveDateTime> {
        self.creation_time
    }

    pub fn access_time(&self) -> Option<NaiveDateTime> {
        self.access_time
    }

    /// Host OS code. RAR4: 0 MS-DOS, 1 OS/2, 2 Windows, 3 Unix, 4 Mac OS,
    /// 5 BeOS. RAR5: 0 Windows, 1 Unix.
    pub fn host_os(&self) -> u8 {
        self.host_os
    }

    /// Compression method: 0x30-0x35 for RAR4, 0-5 for RAR5.
    pub fn method(&self) -> u8 {
        self.method
    }

    pub fn packed_size(&self) -> u64 {
        self.packed_size
    }

    pub fn unpacked_size(&self) -> u64 {
        self.unpacked_size
    }

    /// Version needed to unpack. Always 5 for RAR5 entries.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// True if the header marks the data as encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.is_encrypted
    }

    /// RAR4 encryption salt.
    pub fn salt(&self) -> Option<&[u8; 8]> {
        self.salt.as_ref()
    }

    /// Decoded RAR5 compression information.
    pub fn compression_info(&self) -> Option<&CompressionInfo> {
        self.compression_info.as_ref()
    }

    /// RAR4 high precision time record.
    pub fn extended_time(&self) -> Option<&ExtendedTime> {
        self.extended_time.as_ref()
    }
}

/// The entries of one RAR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    version: u8,
    entries: Vec<Entry>,
    main_head: Option<MainHead>,
    rar5_main_head: Option<Rar5MainHead>,
}

impl Archive {
    /// Build the public model from an engine run, applying `opts`.
    ///
    /// The filter sees every record's name and its ordinal among all
    /// records; `max_files` caps the number of accepted entries.
    pub(crate) fn build(parsed: ParsedArchive, opts: &ParseOptions) -> Self {
        let mut entries = Vec::with_capacity(parsed.files.len());

        for (index, head) in parsed.files.into_iter().enumerate() {
            if opts.max_files.is_some_and(|max| entries.len() >= max) {
                break;
            }

            let entry = Entry::from(head);
            let include = match &opts.filter {
                Some(filter) => filter(entry.name(), index),
                None => true,
            };
            if include {
                entries.push(entry);
            }
        }

        log::debug!(
            "built RAR{} archive with {} entries",
            parsed.signature.version(),
            entries.len()
        );

        Self {
            version: parsed.signature.version(),
            entries,
            main_head: parsed.main_head,
            rar5_main_head: parsed.rar5_main_head,
        }
    }

    /// Archive format generation: 4 for RAR 1.5-4.x, 5 for RAR 5.0+.
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// A new archive with `entry` appended. `self` is left unchanged.
    #[must_use]
    pub fn with_entry(&self, entry: Entry) -> Self {
        let mut archive = self.clone();
        archive.entries.push(entry);
        archive
    }

    /// RAR4 main archive header.
    pub fn main_head(&self) -> Option<&MainHead> {
        self.main_head.as_ref()
    }

    /// RAR5 main archive header.
    pub fn rar5_main_head(&self) -> Option<&Rar5MainHead> {
        self.rar5_main_head.as_ref()
    }
}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Archive {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
