//! RAR archive header reader.
//!
//! Lists the entries of a `.rar` file (name, sizes, CRC, timestamps,
//! compression method, attributes) by walking its header chain. Payloads
//! are skipped by seeking; nothing is decompressed or decrypted.
//!
//! Supports RAR15 (RAR 1.5-4.x) and RAR50 (RAR 5.0+) formats.
//!
//! ## Features
//! - `async` - parse local files on tokio's blocking pool
//!
//! ## Example
//!
//! ```rust,no_run
//! use rar_header::RarFileReader;
//!
//! let archive = RarFileReader::open_path("archive.rar")?;
//! for entry in &archive {
//!     println!("{} {} {}", entry.name(), entry.unpacked_size(), entry.crc());
//! }
//! # Ok::<(), rar_header::RarError>(())
//! ```

mod archive;
pub mod error;
mod file_media;
pub mod formats;
pub mod parsing;
mod rar_file_reader;

#[cfg(test)]
mod fixtures;

pub use archive::{Archive, Entry};
pub use error::{RarError, Result};
pub use file_media::LocalFileMedia;
pub use formats::Signature;
pub use parsing::rar4::{ExtendedTime, MainHead};
pub use parsing::rar5::{CompressionInfo, Rar5MainHead};
pub use rar_file_reader::{ParseOptions, RarFileReader};
