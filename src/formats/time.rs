//! Timestamp conversions for the three on-disk representations.
//!
//! - MS-DOS packed date/time (RAR4 file headers), 2-second resolution
//! - Unix `time_t` seconds (RAR5 `mtime` field and time records)
//! - Windows FILETIME, 100 ns ticks since 1601-01-01 (RAR5 time records)
//!
//! DOS values carry no timezone and are kept naive. Unix and FILETIME values
//! are UTC instants, stored as their naive UTC reading.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

/// FILETIME tick count at 1970-01-01T00:00:00Z.
pub const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;

const FILETIME_TICKS_PER_SECOND: i128 = 10_000_000;

/// Largest sub-second value an extended time record may add, in microseconds.
pub const MAX_EXTENDED_MICROS: u32 = 999_999;

/// Convert a DOS time/date pair to a calendar timestamp.
///
/// Zero month/day fields (seen in `0x0000/0x0000`) clamp to 1, days past the
/// end of the month clamp to the last day, and the 2-second field's
/// out-of-range values (60, 62) clamp to 59.
pub fn dos_datetime(time: u16, date: u16) -> NaiveDateTime {
    let second = u32::from(time & 0x1F) * 2;
    let minute = u32::from((time >> 5) & 0x3F);
    let hour = u32::from((time >> 11) & 0x1F);

    let day = u32::from(date & 0x1F);
    let month = u32::from((date >> 5) & 0x0F);
    let year = 1980 + i32::from(date >> 9);

    let month = month.clamp(1, 12);
    let date = (1..=day.max(1))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .unwrap_or_default();
    let time = NaiveTime::from_hms_opt(hour.min(23), minute.min(59), second.min(59))
        .unwrap_or_default();

    NaiveDateTime::new(date, time)
}

/// Convert Unix seconds to a calendar timestamp.
pub fn unix_datetime(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

/// Convert a raw Windows FILETIME to a calendar timestamp, keeping the
/// sub-second part.
pub fn filetime_datetime(raw: u64) -> Option<NaiveDateTime> {
    let ticks = i128::from(raw) - i128::from(FILETIME_UNIX_EPOCH);
    let seconds = i64::try_from(ticks.div_euclid(FILETIME_TICKS_PER_SECOND)).ok()?;
    let nanos = (ticks.rem_euclid(FILETIME_TICKS_PER_SECOND) * 100) as u32;
    DateTime::from_timestamp(seconds, nanos).map(|dt| dt.naive_utc())
}

/// Apply one extended-time nibble's precision data to a base time.
///
/// Bit 0x4 is the DOS "odd second" carry: when set and the base second is
/// below 59 exactly one second is added and `remainder` is ignored.
/// Otherwise `remainder`, clamped to [`MAX_EXTENDED_MICROS`], is added as
/// microseconds.
pub fn apply_extended_precision(base: NaiveDateTime, nibble: u8, remainder: u32) -> NaiveDateTime {
    if nibble & 0x4 != 0 && base.second() < 59 {
        return base + TimeDelta::seconds(1);
    }
    let micros = remainder.min(MAX_EXTENDED_MICROS);
    base + TimeDelta::microseconds(i64::from(micros))
}
