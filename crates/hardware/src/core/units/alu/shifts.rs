//! ALU shift operations.
//!
//! Shift amounts are masked to 6 bits for 64-bit shifts and to 5 bits for the
//! word forms. Word results are sign-extended from bit 31.

use super::AluOp;

/// Shift-amount mask for 64-bit shifts.
const SHAMT_MASK_64: u64 = 0x3F;

/// Shift-amount mask for word shifts.
const SHAMT_MASK_32: u64 = 0x1F;

/// Executes a shift.
///
/// # Arguments
///
/// * `op` - `Sll`, `Srl` or `Sra`; any other operation returns 0.
/// * `a` - Value to shift.
/// * `b` - Shift amount; only the low 6 (or 5) bits are used.
/// * `is32` - Word form.
pub fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        let sh = (b & SHAMT_MASK_32) as u32;
        let word = a as u32;
        let out = match op {
            AluOp::Sll => word << sh,
            AluOp::Srl => word >> sh,
            AluOp::Sra => ((word as i32) >> sh) as u32,
            _ => return 0,
        };
        out as i32 as i64 as u64
    } else {
        let sh = (b & SHAMT_MASK_64) as u32;
        match op {
            AluOp::Sll => a << sh,
            AluOp::Srl => a >> sh,
            AluOp::Sra => ((a as i64) >> sh) as u64,
            _ => 0,
        }
    }
}
