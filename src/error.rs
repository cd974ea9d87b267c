//! Error types for RAR header parsing.
//!
//! This module provides the [`RarError`] type which covers every way a header
//! scan can fail. All of them are terminal for the current parse call: the
//! engines never retry and never return partial results.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Format | [`UnrecognizedFormat`], [`MalformedHeader`] | File is not a valid RAR archive |
//! | Features | [`UnsupportedFeature`] | Valid archive using something this crate does not read |
//! | I/O | [`TruncatedStream`], [`Io`] | Stream ended early or failed |
//!
//! ## Example
//!
//! ```rust,no_run
//! use rar_header::{RarError, RarFileReader};
//!
//! match RarFileReader::open_path("archive.rar") {
//!     Ok(archive) => println!("Found {} entries", archive.len()),
//!     Err(RarError::UnrecognizedFormat) => eprintln!("Not a RAR file"),
//!     Err(RarError::UnsupportedFeature(what)) => eprintln!("Unsupported: {}", what),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`UnrecognizedFormat`]: RarError::UnrecognizedFormat
//! [`MalformedHeader`]: RarError::MalformedHeader
//! [`UnsupportedFeature`]: RarError::UnsupportedFeature
//! [`TruncatedStream`]: RarError::TruncatedStream
//! [`Io`]: RarError::Io

use std::io;

use thiserror::Error;

/// Error type for RAR header parsing.
#[derive(Debug, Error)]
pub enum RarError {
    /// The stream starts with neither known signature.
    ///
    /// RAR files must start with either:
    /// - RAR4: `Rar!\x1a\x07\x00` (7 bytes)
    /// - RAR5: `Rar!\x1a\x07\x01\x00` (8 bytes)
    #[error("Unrecognized archive format")]
    UnrecognizedFormat,

    /// A header field violates a format invariant.
    ///
    /// Examples: a RAR5 main header whose type is not 1, a RAR5 vint that
    /// runs past 10 bytes, a size that does not fit the host.
    #[error("Malformed header at offset {offset}: {reason}")]
    MalformedHeader {
        /// Stream offset where the offending field starts.
        offset: u64,
        /// What was wrong with it.
        reason: String,
    },

    /// The archive uses a feature this crate does not read.
    ///
    /// Raised for RAR5 continuation volumes and RAR5 archives with
    /// encrypted headers.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(&'static str),

    /// A fixed-width or length-prefixed read ran past the end of the stream.
    #[error("Truncated stream: need {needed} bytes at offset {offset}")]
    TruncatedStream {
        /// Offset the read started at.
        offset: u64,
        /// Number of bytes the read required.
        needed: u64,
    },

    /// An I/O error occurred on the underlying stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl RarError {
    pub(crate) fn malformed(offset: u64, reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            offset,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RarError>;
