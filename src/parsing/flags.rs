//! Bit-flag helpers shared by both header engines.

/// True if any bit of `flag` is set in `flags`.
#[inline]
pub fn is_flag_set<T: Into<u64>>(flags: T, flag: T) -> bool {
    flags.into() & flag.into() != 0
}

/// Compose a 64-bit value from the split halves RAR4 stores for large files.
#[inline]
pub fn compose_u64(high: u32, low: u32) -> u64 {
    (u64::from(high) << 32) | u64::from(low)
}
