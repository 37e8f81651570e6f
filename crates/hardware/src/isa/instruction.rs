//! Instruction Fields and the Instruction Record.
//!
//! This module defines what travels down the pipeline. It provides:
//! 1. **Field Extraction:** The `InstructionBits` trait over raw 32-bit words.
//! 2. **Classification:** `ControlSignals`, the flags fixed at decode time.
//! 3. **Slot State:** `StageStatus`, telling real work apart from bubbles and squashed slots.
//! 4. **The Record:** `Instruction`, the per-slot value every stage function consumes and returns.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::isa::rv64i::opcodes::{OP_BRANCH, OP_JAL, OP_JALR};

/// Bit position of the destination register field.
pub const RD_SHIFT: u32 = 7;
/// Bit position of the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;
/// Bit position of the first source register field.
pub const RS1_SHIFT: u32 = 15;
/// Bit position of the second source register field.
pub const RS2_SHIFT: u32 = 20;
/// Bit position of the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

const OPCODE_MASK: u32 = 0x7F;
const REG_MASK: u32 = 0x1F;
const FUNCT3_MASK: u32 = 0x7;
const FUNCT7_MASK: u32 = 0x7F;

/// Field accessors for raw RV64I instruction words.
pub trait InstructionBits {
    /// Major opcode, bits 6-0.
    fn opcode(&self) -> u32;
    /// Destination register, bits 11-7.
    fn rd(&self) -> usize;
    /// First source register, bits 19-15.
    fn rs1(&self) -> usize;
    /// Second source register, bits 24-20.
    fn rs2(&self) -> usize;
    /// Minor opcode, bits 14-12.
    fn funct3(&self) -> u32;
    /// Upper function bits, 31-25.
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> RS1_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> RS2_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }
}

/// Classification flags produced by decode.
///
/// Once an instruction is decoded these never change; later stages only fill in
/// the value fields of the [`Instruction`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Encoding is in the legality table (or is the halt/nop sentinel).
    pub legal: bool,
    /// Halt sentinel.
    pub halt: bool,
    /// Canonical no-op.
    pub nop: bool,
    /// Load.
    pub reads_mem: bool,
    /// Store.
    pub writes_mem: bool,
    /// Produces an ALU result (ALU classes, jumps, LUI, AUIPC).
    pub arith_logic: bool,
    /// Writes `rd` on commit.
    pub writes_rd: bool,
    /// Reads `rs1`.
    pub reads_rs1: bool,
    /// Reads `rs2`.
    pub reads_rs2: bool,
}

/// Occupancy state of a pipeline slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StageStatus {
    /// Real, architecturally visible work.
    Normal,
    /// Inserted by a stall.
    Bubble,
    /// Never filled since reset.
    #[default]
    Idle,
    /// Fetched behind an unresolved or redirecting control-flow instruction.
    Speculative,
    /// Fetched on a wrong path and discarded.
    Squashed,
}

impl StageStatus {
    /// Suffix printed after a slot in the pipeline-state report.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => " ",
            Self::Bubble => " (bubble) ",
            Self::Idle => " (idle) ",
            Self::Speculative => " (spcu) ",
            Self::Squashed => " (squashed) ",
        }
    }
}

/// One instruction as it occupies a pipeline slot.
///
/// Stage functions take the record by value and hand it back with more value
/// fields filled in. Records whose status is not [`StageStatus::Normal`] pass
/// through every stage untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Address the word was fetched from.
    pub pc: u64,
    /// Raw instruction word.
    pub raw: u32,
    /// Major opcode.
    pub opcode: u32,
    /// Minor opcode.
    pub funct3: u32,
    /// Upper function bits.
    pub funct7: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Sign-extended immediate of the instruction's format (zero for R-type).
    pub imm: u64,
    /// Classification flags.
    pub ctrl: ControlSignals,
    /// First operand (value of `rs1`).
    pub op1: u64,
    /// Second operand (value of `rs2`).
    pub op2: u64,
    /// ALU output, link address for jumps.
    pub arith_result: u64,
    /// Effective address of a load or store.
    pub mem_address: u64,
    /// Value read by a load.
    pub mem_result: u64,
    /// Address of the next instruction on the architectural path.
    pub next_pc: u64,
    /// The load or store touched memory outside the store.
    pub mem_fault: bool,
    /// Dynamic instruction number, assigned at decode.
    pub id: u64,
    /// Slot occupancy state.
    pub status: StageStatus,
}

impl Instruction {
    /// A freshly fetched, not yet decoded word.
    pub fn fetched(pc: u64, raw: u32, status: StageStatus) -> Self {
        Self {
            pc,
            raw,
            status,
            ..Self::default()
        }
    }

    /// A stall bubble.
    pub fn bubble() -> Self {
        Self {
            status: StageStatus::Bubble,
            ..Self::default()
        }
    }

    /// An empty slot that has never held work.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Replaces a wrong-path record with a squashed no-op that keeps its address.
    pub fn squash(self) -> Self {
        Self {
            pc: self.pc,
            raw: self.raw,
            status: StageStatus::Squashed,
            ..Self::default()
        }
    }

    /// `true` for real work that has not been squashed.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.status == StageStatus::Normal
    }

    /// `true` when decode accepted the encoding.
    #[inline]
    pub const fn is_legal(&self) -> bool {
        self.ctrl.legal
    }

    /// `true` for a legal load.
    #[inline]
    pub const fn is_load(&self) -> bool {
        self.ctrl.legal && self.ctrl.reads_mem
    }

    /// `true` for a legal store.
    #[inline]
    pub const fn is_store(&self) -> bool {
        self.ctrl.legal && self.ctrl.writes_mem
    }

    /// `true` for a legal branch, JAL, or JALR.
    #[inline]
    pub const fn is_control(&self) -> bool {
        self.ctrl.legal && matches!(self.opcode, OP_BRANCH | OP_JAL | OP_JALR)
    }

    /// `true` for control-flow instructions whose target depends on registers.
    #[inline]
    pub const fn needs_operands_to_resolve(&self) -> bool {
        self.ctrl.legal && matches!(self.opcode, OP_BRANCH | OP_JALR)
    }

    /// Address of the next sequential instruction.
    #[inline]
    pub const fn fall_through(&self) -> u64 {
        self.pc.wrapping_add(INSTRUCTION_SIZE)
    }

    /// Register this record will write on commit, if any.
    ///
    /// Bubbles, squashed records, illegal encodings, writes to `x0`, and faulted
    /// loads produce nothing.
    pub fn dest(&self) -> Option<usize> {
        (self.is_live()
            && self.ctrl.legal
            && self.ctrl.writes_rd
            && self.rd != 0
            && !self.mem_fault)
            .then_some(self.rd)
    }

    /// Value committed to `rd`: the loaded value for loads, the ALU result otherwise.
    #[inline]
    pub const fn result(&self) -> u64 {
        if self.ctrl.reads_mem {
            self.mem_result
        } else {
            self.arith_result
        }
    }

    /// `true` when this record reads register `reg` as `rs1` or `rs2`.
    pub const fn reads(&self, reg: usize) -> bool {
        (self.ctrl.reads_rs1 && self.rs1 == reg) || (self.ctrl.reads_rs2 && self.rs2 == reg)
    }
}
