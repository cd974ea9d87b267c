//! RAR header parsing modules.
//!
//! [`parse`] detects the signature and hands the stream to the matching
//! engine; both engines produce the same [`ParsedArchive`].

pub mod byte_reader;
pub mod file_head;
pub mod flags;
pub mod rar4;
pub mod rar5;

use std::io::{Read, Seek};

pub use byte_reader::ByteReader;
pub use file_head::FileHead;
pub use rar4::{MainHead, Rar4Parser};
pub use rar5::{Rar5MainHead, Rar5Parser};

use crate::error::Result;
use crate::formats::Signature;

/// Raw output of one engine run, in on-disk header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArchive {
    pub signature: Signature,
    /// RAR4 MAIN_HEAD, if the archive has one
    pub main_head: Option<MainHead>,
    /// RAR5 main archive header
    pub rar5_main_head: Option<Rar5MainHead>,
    pub files: Vec<FileHead>,
}

impl ParsedArchive {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            main_head: None,
            rar5_main_head: None,
            files: Vec::new(),
        }
    }
}

/// Detect the format at the start of the stream and run its engine.
pub fn parse<R: Read + Seek>(reader: &mut ByteReader<'_, R>) -> Result<ParsedArchive> {
    let signature = Signature::detect(reader)?;
    log::debug!("detected {:?} signature", signature);
    match signature {
        Signature::Rar15 => Rar4Parser::parse(reader),
        Signature::Rar50 => Rar5Parser::parse(reader),
    }
}
