//! RarFileReader - entry point that turns a byte stream into an [`Archive`].

use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::archive::Archive;
use crate::error::Result;
use crate::file_media::LocalFileMedia;
use crate::parsing::{self, ByteReader};

/// Filter options for parsing.
#[derive(Default)]
pub struct ParseOptions {
    /// Filter function over the entry name and its ordinal among all
    /// records: return true to include the entry.
    pub filter: Option<Box<dyn Fn(&str, usize) -> bool + Send + Sync>>,
    /// Maximum number of entries to return.
    pub max_files: Option<usize>,
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("max_files", &self.max_files)
            .finish()
    }
}

/// Reads the entry list of a RAR archive.
///
/// The reader never decompresses: payloads are skipped by seeking. Each call
/// owns its cursor for the duration of the scan, so independent streams can
/// be parsed from different threads.
pub struct RarFileReader;

impl RarFileReader {
    /// Parse the archive in `stream`, rewinding it to offset 0 first.
    ///
    /// The stream is borrowed, never closed; its position afterwards is
    /// unspecified.
    pub fn open<R: Read + Seek>(stream: &mut R) -> Result<Archive> {
        Self::open_with_options(stream, &ParseOptions::default())
    }

    /// Like [`open`](Self::open), applying `opts` to the entry list.
    pub fn open_with_options<R: Read + Seek>(
        stream: &mut R,
        opts: &ParseOptions,
    ) -> Result<Archive> {
        stream.seek(SeekFrom::Start(0))?;
        let mut reader = ByteReader::new(stream)?;
        let parsed = parsing::parse(&mut reader)?;
        Ok(Archive::build(parsed, opts))
    }

    /// Open and parse a local `.rar` file.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Archive> {
        Self::open_path_with_options(path, &ParseOptions::default())
    }

    pub fn open_path_with_options(path: impl AsRef<Path>, opts: &ParseOptions) -> Result<Archive> {
        let media = LocalFileMedia::new(path)?;
        log::debug!("opening {} ({} bytes)", media.name(), media.length());
        let mut stream = media.open()?;
        Self::open_with_options(&mut stream, opts)
    }

    /// Parse a local `.rar` file on tokio's blocking pool.
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn open_path_async(path: impl AsRef<Path>) -> Result<Archive> {
        Self::open_path_async_with_options(path, ParseOptions::default()).await
    }

    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    pub async fn open_path_async_with_options(
        path: impl AsRef<Path>,
        opts: ParseOptions,
    ) -> Result<Archive> {
        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || Self::open_path_with_options(&path, &opts))
            .await
            .map_err(std::io::Error::other)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RarError;
    use std::io::Cursor;

    #[test]
    fn test_rejects_unknown_signature() {
        let mut cursor = Cursor::new(b"PK\x03\x04 not a rar file".to_vec());
        assert!(matches!(
            RarFileReader::open(&mut cursor),
            Err(RarError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn test_rewinds_before_parsing() {
        let mut bytes = b"Rar!\x1a\x07\x00".to_vec();
        bytes.extend_from_slice(&[0xC4, 0x3D, 0x7B, 0x00, 0x40, 0x07, 0x00]);
        let mut cursor = Cursor::new(bytes);
        cursor.set_position(9);
        let archive = RarFileReader::open(&mut cursor).unwrap();
        assert_eq!(archive.version(), 4);
        assert!(archive.is_empty());
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let result = RarFileReader::open_path("/nonexistent/archive.rar");
        assert!(matches!(result, Err(RarError::Io(_))));
    }

    #[test]
    fn test_options_debug() {
        let opts = ParseOptions {
            filter: Some(Box::new(|_: &str, _: usize| true)),
            max_files: Some(3),
        };
        let text = format!("{:?}", opts);
        assert!(text.contains("max_files: Some(3)"));
    }
}
