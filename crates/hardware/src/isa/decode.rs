//! RV64I Instruction Decoder.
//!
//! Turns a raw 32-bit word into an [`Instruction`] record. It performs:
//! 1. **Field Extraction:** opcode, funct3, funct7, and register indices.
//! 2. **Legality:** A fixed table of accepted (opcode, funct3, funct7) combinations.
//! 3. **Classification:** The `ControlSignals` every later stage keys off.
//! 4. **Immediates:** Reassembly and sign extension for the I, S, B, U and J formats.
//!
//! Decoding never fails. An encoding outside the table yields a record with
//! `ctrl.legal == false` and every other flag cleared.

use crate::common::bits::{extract_bits, sign_extend64};
use crate::common::constants::{HALT_WORD, NOP_WORD};
use crate::isa::instruction::{ControlSignals, Instruction, InstructionBits, StageStatus};
use crate::isa::rv64i::{funct3, funct7, opcodes};

/// Sign bit of the 12-bit I and S immediates.
const IMM12_SIGN_BIT: u32 = 11;
/// Sign bit of the 13-bit branch offset.
const BRANCH_SIGN_BIT: u32 = 12;
/// Sign bit of the 21-bit jump offset.
const JUMP_SIGN_BIT: u32 = 20;
/// Sign bit of a U-type immediate once shifted into place.
const UPPER_SIGN_BIT: u32 = 31;

/// I-type immediate: `inst[31:20]`, sign-extended.
#[inline]
pub const fn i_imm(raw: u32) -> u64 {
    sign_extend64(extract_bits(raw as u64, 31, 20), IMM12_SIGN_BIT)
}

/// S-type immediate: `inst[31:25] | inst[11:7]`, sign-extended.
#[inline]
pub const fn s_imm(raw: u32) -> u64 {
    let word = raw as u64;
    let imm = (extract_bits(word, 31, 25) << 5) | extract_bits(word, 11, 7);
    sign_extend64(imm, IMM12_SIGN_BIT)
}

/// B-type immediate: `inst[31] | inst[7] | inst[30:25] | inst[11:8] | 0`, sign-extended.
#[inline]
pub const fn b_imm(raw: u32) -> u64 {
    let word = raw as u64;
    let imm = (extract_bits(word, 31, 31) << 12)
        | (extract_bits(word, 7, 7) << 11)
        | (extract_bits(word, 30, 25) << 5)
        | (extract_bits(word, 11, 8) << 1);
    sign_extend64(imm, BRANCH_SIGN_BIT)
}

/// U-type immediate: `inst[31:12] << 12`, sign-extended from bit 31.
#[inline]
pub const fn u_imm(raw: u32) -> u64 {
    sign_extend64(extract_bits(raw as u64, 31, 12) << 12, UPPER_SIGN_BIT)
}

/// J-type immediate: `inst[31] | inst[19:12] | inst[20] | inst[30:21] | 0`, sign-extended.
#[inline]
pub const fn j_imm(raw: u32) -> u64 {
    let word = raw as u64;
    let imm = (extract_bits(word, 31, 31) << 20)
        | (extract_bits(word, 19, 12) << 12)
        | (extract_bits(word, 20, 20) << 11)
        | (extract_bits(word, 30, 21) << 1);
    sign_extend64(imm, JUMP_SIGN_BIT)
}

/// Bits 31-26 of a word, the upper field of a 64-bit shift immediate.
#[inline]
const fn shift_upper(raw: u32) -> u32 {
    raw >> 26
}

/// Decodes one instruction word fetched from `pc`.
///
/// The returned record carries status [`StageStatus::Normal`], `next_pc` preset
/// to the fall-through address, and dynamic id 0 (callers number instructions).
///
/// # Arguments
///
/// * `pc` - Fetch address of the word.
/// * `raw` - The 32-bit encoding.
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::decode;
///
/// let inst = decode(0x100, 0x0050_0093); // addi ra, zero, 5
/// assert!(inst.ctrl.legal && inst.ctrl.writes_rd && inst.ctrl.reads_rs1);
/// assert_eq!((inst.rd, inst.rs1, inst.imm), (1, 0, 5));
///
/// let bad = decode(0x104, 0);
/// assert!(!bad.ctrl.legal);
/// ```
pub fn decode(pc: u64, raw: u32) -> Instruction {
    let opcode = raw.opcode();
    let f3 = raw.funct3();
    let f7 = raw.funct7();

    let mut inst = Instruction {
        pc,
        raw,
        opcode,
        funct3: f3,
        funct7: f7,
        rd: raw.rd(),
        rs1: raw.rs1(),
        rs2: raw.rs2(),
        status: StageStatus::Normal,
        ..Instruction::default()
    };
    inst.next_pc = inst.fall_through();

    if raw == HALT_WORD {
        inst.ctrl = ControlSignals {
            legal: true,
            halt: true,
            ..ControlSignals::default()
        };
        return inst;
    }
    if raw == NOP_WORD {
        inst.ctrl = ControlSignals {
            legal: true,
            nop: true,
            ..ControlSignals::default()
        };
        return inst;
    }

    inst.ctrl = classify(raw, opcode, f3, f7);
    if inst.ctrl.legal {
        inst.imm = immediate(raw, opcode);
    }
    inst
}

/// Sign-extended immediate for the format implied by `opcode`.
const fn immediate(raw: u32, opcode: u32) -> u64 {
    match opcode {
        opcodes::OP_IMM | opcodes::OP_IMM_32 | opcodes::OP_LOAD | opcodes::OP_JALR => i_imm(raw),
        opcodes::OP_STORE => s_imm(raw),
        opcodes::OP_BRANCH => b_imm(raw),
        opcodes::OP_LUI | opcodes::OP_AUIPC => u_imm(raw),
        opcodes::OP_JAL => j_imm(raw),
        _ => 0,
    }
}

/// Applies the legality table and derives the classification flags.
fn classify(raw: u32, opcode: u32, f3: u32, f7: u32) -> ControlSignals {
    let alu_rr = ControlSignals {
        legal: true,
        arith_logic: true,
        writes_rd: true,
        reads_rs1: true,
        reads_rs2: true,
        ..ControlSignals::default()
    };
    let alu_ri = ControlSignals {
        legal: true,
        arith_logic: true,
        writes_rd: true,
        reads_rs1: true,
        ..ControlSignals::default()
    };
    let base_or_alt = f7 == funct7::BASE || f7 == funct7::ALT;

    let (legal, signals) = match opcode {
        opcodes::OP_REG => {
            let ok = match f3 {
                funct3::ADD_SUB | funct3::SRL_SRA => base_or_alt,
                _ => f7 == funct7::BASE,
            };
            (ok, alu_rr)
        }
        opcodes::OP_REG_32 => {
            let ok = match f3 {
                funct3::ADD_SUB | funct3::SRL_SRA => base_or_alt,
                funct3::SLL => f7 == funct7::BASE,
                _ => false,
            };
            (ok, alu_rr)
        }
        opcodes::OP_IMM => {
            let upper = shift_upper(raw);
            let ok = match f3 {
                funct3::SLL => upper == funct7::SHIFT_LOGICAL,
                funct3::SRL_SRA => {
                    upper == funct7::SHIFT_LOGICAL || upper == funct7::SHIFT_ARITH
                }
                _ => true,
            };
            (ok, alu_ri)
        }
        opcodes::OP_IMM_32 => {
            let ok = match f3 {
                funct3::ADD_SUB => true,
                funct3::SLL => f7 == funct7::BASE,
                funct3::SRL_SRA => base_or_alt,
                _ => false,
            };
            (ok, alu_ri)
        }
        opcodes::OP_LOAD => (
            f3 <= funct3::LWU,
            ControlSignals {
                legal: true,
                reads_mem: true,
                writes_rd: true,
                reads_rs1: true,
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_STORE => (
            f3 <= funct3::SD,
            ControlSignals {
                legal: true,
                writes_mem: true,
                reads_rs1: true,
                reads_rs2: true,
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_BRANCH => (
            !matches!(f3, 0b010 | 0b011),
            ControlSignals {
                legal: true,
                reads_rs1: true,
                reads_rs2: true,
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_JALR => (f3 == funct3::JALR, alu_ri),
        opcodes::OP_JAL | opcodes::OP_LUI | opcodes::OP_AUIPC => (
            true,
            ControlSignals {
                legal: true,
                arith_logic: true,
                writes_rd: true,
                ..ControlSignals::default()
            },
        ),
        _ => (false, ControlSignals::default()),
    };

    if legal {
        signals
    } else {
        ControlSignals::default()
    }
}
