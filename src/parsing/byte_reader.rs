//! Cursor-tracking reader over a seekable byte source.
//!
//! All multi-byte integers in both RAR generations are little-endian. Every
//! fixed-width read consumes exactly its width or fails with
//! [`RarError::TruncatedStream`]; the reader never returns short data.
//!
//! The two variable-length integer encodings live next to the engine that
//! uses them: [`crate::parsing::rar4::vint`] and [`crate::parsing::rar5::vint`].

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::{RarError, Result};

/// Reader over a caller-owned `Read + Seek` stream.
///
/// The stream length is sampled once at construction. The reader keeps its
/// own copy of the cursor so that `position()` and `is_eof()` never touch the
/// underlying stream.
pub struct ByteReader<'a, R: Read + Seek> {
    inner: &'a mut R,
    pos: u64,
    len: u64,
}

impl<'a, R: Read + Seek> ByteReader<'a, R> {
    /// Wrap `inner`, keeping its current position.
    pub fn new(inner: &'a mut R) -> Result<Self> {
        let pos = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;
        Ok(Self { inner, pos, len })
    }

    /// Current offset from the start of the stream.
    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total stream length.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes between the cursor and the end of the stream.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// True once the cursor is at or past the end of the stream.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.len
    }

    /// Seek to an absolute offset. Seeking past the end is allowed; the next
    /// read fails and `is_eof()` reports true.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.pos = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Seek relative to the cursor.
    pub fn seek_relative(&mut self, delta: i64) -> Result<()> {
        let target = self
            .pos
            .checked_add_signed(delta)
            .ok_or_else(|| RarError::malformed(self.pos, format!("seek by {} out of range", delta)))?;
        self.seek_to(target)
    }

    /// Skip `count` bytes forward without reading them.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let target = self
            .pos
            .checked_add(count)
            .ok_or_else(|| RarError::malformed(self.pos, format!("skip of {} bytes overflows", count)))?;
        self.seek_to(target)
    }

    /// Seek to the end of the stream.
    pub fn seek_to_end(&mut self) -> Result<()> {
        self.pos = self.inner.seek(SeekFrom::End(0))?;
        Ok(())
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let needed = buf.len() as u64;
        if self.remaining() < needed {
            return Err(RarError::TruncatedStream {
                offset: self.pos,
                needed,
            });
        }
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.pos += needed;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(RarError::TruncatedStream {
                offset: self.pos,
                needed,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Read exactly `N` bytes.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read exactly `count` bytes. The length is checked against the stream
    /// before anything is allocated.
    pub fn read_bytes(&mut self, count: u64) -> Result<Vec<u8>> {
        if self.remaining() < count {
            return Err(RarError::TruncatedStream {
                offset: self.pos,
                needed: count,
            });
        }
        let size = usize::try_from(count)
            .map_err(|_| RarError::malformed(self.pos, format!("length {} exceeds host", count)))?;
        let mut buf = vec![0u8; size];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    #[inline]
    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a 4-byte CRC field and render it the way archivers print it:
    /// reversed from wire order, uppercase hex.
    pub fn read_crc32_hex(&mut self) -> Result<String> {
        Ok(crc_hex(&self.read_array::<4>()?))
    }

    /// Same as [`read_crc32_hex`](Self::read_crc32_hex) for 2-byte header CRCs.
    pub fn read_crc16_hex(&mut self) -> Result<String> {
        Ok(crc_hex(&self.read_array::<2>()?))
    }
}

/// Uppercase hex of `wire` in reversed byte order.
pub fn crc_hex(wire: &[u8]) -> String {
    wire.iter().rev().map(|b| format!("{:02X}", b)).collect()
}
