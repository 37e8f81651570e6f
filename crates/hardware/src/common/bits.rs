//! Bit-Field Codec.
//!
//! Every immediate and register field the decoder produces goes through these two
//! primitives, so they are kept branch-light and total over their documented domain.

/// Extracts the inclusive bit range `[high:low]` from `word`, right-aligned.
///
/// # Arguments
///
/// * `word` - Source value (instruction words are passed zero-extended).
/// * `high` - Index of the most significant bit to keep (`< 64`).
/// * `low` - Index of the least significant bit to keep (`<= high`).
///
/// # Returns
///
/// The unsigned value of the selected field.
///
/// # Examples
///
/// ```
/// use rvpipe_core::common::extract_bits;
///
/// assert_eq!(extract_bits(0xFEED_FEED, 31, 16), 0xFEED);
/// assert_eq!(extract_bits(0b1011_0000, 7, 4), 0b1011);
/// ```
#[inline]
pub const fn extract_bits(word: u64, high: u32, low: u32) -> u64 {
    debug_assert!(high < 64 && high >= low);
    let width = high - low + 1;
    let mask = if width == 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    (word >> low) & mask
}

/// Sign-extends a 32-bit value from bit `sign_bit`.
///
/// Bits above `sign_bit` are filled with copies of it; when the sign bit is clear
/// they are cleared instead.
#[inline]
pub const fn sign_extend32(value: u32, sign_bit: u32) -> u32 {
    debug_assert!(sign_bit < 32);
    let shift = 31 - sign_bit;
    (((value << shift) as i32) >> shift) as u32
}

/// Sign-extends a 64-bit value from bit `sign_bit`.
///
/// # Arguments
///
/// * `value` - Raw field, only bits `[sign_bit:0]` are significant.
/// * `sign_bit` - Position of the sign bit (`< 64`).
///
/// # Examples
///
/// ```
/// use rvpipe_core::common::sign_extend64;
///
/// assert_eq!(sign_extend64(0x800, 11), 0xFFFF_FFFF_FFFF_F800);
/// assert_eq!(sign_extend64(0x7FF, 11), 0x7FF);
/// assert_eq!(sign_extend64(0xFFFF_F800, 11), 0xFFFF_FFFF_FFFF_F800);
/// ```
#[inline]
pub const fn sign_extend64(value: u64, sign_bit: u32) -> u64 {
    debug_assert!(sign_bit < 64);
    let shift = 63 - sign_bit;
    (((value << shift) as i64) >> shift) as u64
}
