//! RISC-V ABI register names.
//!
//! Used only by reporting: the register dump and the disassembler print ABI names,
//! and `index_of` lets tests and tools refer to registers symbolically.

/// ABI names for `x0`-`x31`, indexed by register number.
pub const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Register x0 (hardwired zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer).
pub const REG_SP: usize = 2;
/// Register x10 (first argument / return value).
pub const REG_A0: usize = 10;

/// Returns the ABI name of register `idx`, or `"x??"` when out of range.
#[inline]
pub fn name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Looks up a register by ABI name (`"a0"`), numeric name (`"x10"`), or the
/// frame-pointer alias `"fp"`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::abi::index_of;
///
/// assert_eq!(index_of("a0"), Some(10));
/// assert_eq!(index_of("x31"), Some(31));
/// assert_eq!(index_of("fp"), Some(8));
/// assert_eq!(index_of("x32"), None);
/// ```
pub fn index_of(reg: &str) -> Option<usize> {
    if reg == "fp" {
        return Some(8);
    }
    if let Some(idx) = REG_NAMES.iter().position(|n| *n == reg) {
        return Some(idx);
    }
    reg.strip_prefix('x')
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|idx| *idx < REG_NAMES.len())
}
