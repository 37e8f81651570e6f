//! RV64I major opcodes (bits 6-0).
//!
//! Only the classes the simulator executes are listed; every other major opcode
//! decodes as illegal.

/// Loads: LB, LH, LW, LD, LBU, LHU, LWU.
pub const OP_LOAD: u32 = 0b000_0011;

/// Register-immediate ALU: ADDI, SLTI, SLTIU, XORI, ORI, ANDI, SLLI, SRLI, SRAI.
pub const OP_IMM: u32 = 0b001_0011;

/// Add upper immediate to PC.
pub const OP_AUIPC: u32 = 0b001_0111;

/// Word register-immediate ALU: ADDIW, SLLIW, SRLIW, SRAIW.
pub const OP_IMM_32: u32 = 0b001_1011;

/// Stores: SB, SH, SW, SD.
pub const OP_STORE: u32 = 0b010_0011;

/// Register-register ALU: ADD, SUB, SLL, SLT, SLTU, XOR, SRL, SRA, OR, AND.
pub const OP_REG: u32 = 0b011_0011;

/// Load upper immediate.
pub const OP_LUI: u32 = 0b011_0111;

/// Word register-register ALU: ADDW, SUBW, SLLW, SRLW, SRAW.
pub const OP_REG_32: u32 = 0b011_1011;

/// Conditional branches.
pub const OP_BRANCH: u32 = 0b110_0011;

/// Jump and link register.
pub const OP_JALR: u32 = 0b110_0111;

/// Jump and link.
pub const OP_JAL: u32 = 0b110_1111;
