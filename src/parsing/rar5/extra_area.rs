//! RAR5 extra area.
//!
//! A header's extra area is a sequence of records, each `SIZE (vint) |
//! TYPE (vint) | DATA`, where SIZE counts TYPE and DATA. File and service
//! headers use:
//!
//! | Type | Record                               |
//! |------|--------------------------------------|
//! | 1    | File encryption                      |
//! | 2    | File hash                            |
//! | 3    | High precision file time             |
//! | 4    | File version                         |
//! | 5    | Redirection (links)                  |
//! | 6    | Unix owner                           |
//! | 7    | Service data                         |

use std::io::{Read, Seek};

use chrono::{NaiveDateTime, TimeDelta};

use super::read_vint;
use crate::error::{RarError, Result};
use crate::formats::time::{filetime_datetime, unix_datetime};
use crate::parsing::{ByteReader, FileHead};

const RECORD_ENCRYPTION: u64 = 1;
const RECORD_FILE_TIME: u64 = 3;

/// Time record flags.
const TIME_UNIX: u64 = 0x0001;
const TIME_MODIFICATION: u64 = 0x0002;
const TIME_CREATION: u64 = 0x0004;
const TIME_ACCESS: u64 = 0x0008;
const TIME_UNIX_NANOS: u64 = 0x0010;

pub struct ExtraAreaParser;

impl ExtraAreaParser {
    /// Walk the `size`-byte extra area at the cursor, updating `head` with
    /// what the known records carry. The cursor always ends at the area end.
    pub fn parse<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        head: &mut FileHead,
        size: u64,
    ) -> Result<()> {
        let area_end = reader.position().saturating_add(size);

        while reader.position() < area_end {
            let record_start = reader.position();
            let record_size = read_vint(reader)?;
            let record_end = reader.position().saturating_add(record_size);
            if record_size == 0 || record_end > area_end {
                return Err(RarError::malformed(
                    record_start,
                    format!(
                        "extra record of {} bytes overruns area ending at {}",
                        record_size, area_end
                    ),
                ));
            }

            let record_type = read_vint(reader)?;
            log::trace!("extra record type {} size {}", record_type, record_size);
            match record_type {
                RECORD_ENCRYPTION => head.is_encrypted = true,
                RECORD_FILE_TIME => Self::parse_file_time(reader, head)?,
                _ => {}
            }
            reader.seek_to(record_end)?;
        }

        reader.seek_to(area_end)
    }

    /// High precision time record. Present times follow the flags in
    /// mtime, ctime, atime order, each as a 4-byte Unix time or an 8-byte
    /// FILETIME. Unix times may be followed by one nanosecond field each.
    fn parse_file_time<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        head: &mut FileHead,
    ) -> Result<()> {
        let flags = read_vint(reader)?;
        let is_unix = flags & TIME_UNIX != 0;

        let mut times = [None; 3];
        for (slot, bit) in times
            .iter_mut()
            .zip([TIME_MODIFICATION, TIME_CREATION, TIME_ACCESS])
        {
            if flags & bit != 0 {
                *slot = Some(Self::read_time(reader, is_unix)?);
            }
        }

        if is_unix && flags & TIME_UNIX_NANOS != 0 {
            for slot in times.iter_mut().filter(|t| t.is_some()) {
                let nanos = reader.read_u32_le()?;
                *slot = slot.map(|t| t.map(|t| t + TimeDelta::nanoseconds(i64::from(nanos))));
            }
        }

        let [modification, creation, access] = times;
        if let Some(time) = modification.flatten() {
            head.modification_time = Some(time);
        }
        if let Some(time) = creation.flatten() {
            head.creation_time = Some(time);
        }
        if let Some(time) = access.flatten() {
            head.access_time = Some(time);
        }
        Ok(())
    }

    fn read_time<R: Read + Seek>(
        reader: &mut ByteReader<'_, R>,
        is_unix: bool,
    ) -> Result<Option<NaiveDateTime>> {
        if is_unix {
            Ok(unix_datetime(i64::from(reader.read_u32_le()?)))
        } else {
            Ok(filetime_datetime(reader.read_u64_le()?))
        }
    }
}
