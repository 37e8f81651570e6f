//! Instruction Disassembler.
//!
//! Renders a raw word as assembly text for the pipeline-state report and for
//! trace output. Operands use ABI register names and decimal immediates:
//!
//! ```
//! use rvpipe_core::isa::disasm::disassemble;
//!
//! assert_eq!(disassemble(0x0020_81b3), "add gp, ra, sp");
//! assert_eq!(disassemble(0xFEED_FEED), "HALT");
//! assert_eq!(disassemble(0x0000_0000), "ILLEGAL");
//! ```

use crate::common::constants::{HALT_WORD, NOP_WORD};
use crate::isa::abi::name;
use crate::isa::decode::{b_imm, i_imm, j_imm, s_imm};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv64i::{funct3, funct7, opcodes};

/// Returns the mnemonic for an encoding, or `None` when it is illegal.
///
/// The legality rules mirror the decoder's table so that the report never
/// names an instruction the pipeline treats as illegal.
pub fn mnemonic(raw: u32) -> Option<&'static str> {
    let f3 = raw.funct3();
    let f7 = raw.funct7();
    let alt = f7 == funct7::ALT;
    let base_or_alt = f7 == funct7::BASE || alt;

    let m = match raw.opcode() {
        opcodes::OP_REG => match f3 {
            funct3::ADD_SUB if base_or_alt => {
                if alt {
                    "sub"
                } else {
                    "add"
                }
            }
            funct3::SRL_SRA if base_or_alt => {
                if alt {
                    "sra"
                } else {
                    "srl"
                }
            }
            funct3::SLL if f7 == funct7::BASE => "sll",
            funct3::SLT if f7 == funct7::BASE => "slt",
            funct3::SLTU if f7 == funct7::BASE => "sltu",
            funct3::XOR if f7 == funct7::BASE => "xor",
            funct3::OR if f7 == funct7::BASE => "or",
            funct3::AND if f7 == funct7::BASE => "and",
            _ => return None,
        },
        opcodes::OP_REG_32 => match f3 {
            funct3::ADD_SUB if base_or_alt => {
                if alt {
                    "subw"
                } else {
                    "addw"
                }
            }
            funct3::SRL_SRA if base_or_alt => {
                if alt {
                    "sraw"
                } else {
                    "srlw"
                }
            }
            funct3::SLL if f7 == funct7::BASE => "sllw",
            _ => return None,
        },
        opcodes::OP_IMM => {
            let upper = raw >> 26;
            match f3 {
                funct3::ADD_SUB => "addi",
                funct3::SLT => "slti",
                funct3::SLTU => "sltiu",
                funct3::XOR => "xori",
                funct3::OR => "ori",
                funct3::AND => "andi",
                funct3::SLL if upper == funct7::SHIFT_LOGICAL => "slli",
                funct3::SRL_SRA if upper == funct7::SHIFT_LOGICAL => "srli",
                funct3::SRL_SRA if upper == funct7::SHIFT_ARITH => "srai",
                _ => return None,
            }
        }
        opcodes::OP_IMM_32 => match f3 {
            funct3::ADD_SUB => "addiw",
            funct3::SLL if f7 == funct7::BASE => "slliw",
            funct3::SRL_SRA if f7 == funct7::BASE => "srliw",
            funct3::SRL_SRA if alt => "sraiw",
            _ => return None,
        },
        opcodes::OP_LOAD => match f3 {
            funct3::LB => "lb",
            funct3::LH => "lh",
            funct3::LW => "lw",
            funct3::LD => "ld",
            funct3::LBU => "lbu",
            funct3::LHU => "lhu",
            funct3::LWU => "lwu",
            _ => return None,
        },
        opcodes::OP_STORE => match f3 {
            funct3::SB => "sb",
            funct3::SH => "sh",
            funct3::SW => "sw",
            funct3::SD => "sd",
            _ => return None,
        },
        opcodes::OP_BRANCH => match f3 {
            funct3::BEQ => "beq",
            funct3::BNE => "bne",
            funct3::BLT => "blt",
            funct3::BGE => "bge",
            funct3::BLTU => "bltu",
            funct3::BGEU => "bgeu",
            _ => return None,
        },
        opcodes::OP_JALR if f3 == funct3::JALR => "jalr",
        opcodes::OP_JAL => "jal",
        opcodes::OP_LUI => "lui",
        opcodes::OP_AUIPC => "auipc",
        _ => return None,
    };
    Some(m)
}

/// Disassembles a raw instruction word.
///
/// Sentinels print as `HALT` and `NOP`; anything the decoder rejects prints as
/// `ILLEGAL`.
pub fn disassemble(raw: u32) -> String {
    if raw == HALT_WORD {
        return "HALT".to_string();
    }
    if raw == NOP_WORD {
        return "NOP".to_string();
    }
    let Some(op) = mnemonic(raw) else {
        return "ILLEGAL".to_string();
    };

    let rd = name(raw.rd());
    let rs1 = name(raw.rs1());
    let rs2 = name(raw.rs2());
    let simm = |v: u64| v as i64;

    match raw.opcode() {
        opcodes::OP_REG | opcodes::OP_REG_32 => format!("{op} {rd}, {rs1}, {rs2}"),
        opcodes::OP_IMM | opcodes::OP_IMM_32 => {
            let f3 = raw.funct3();
            if f3 == funct3::SLL || f3 == funct3::SRL_SRA {
                format!("{op} {rd}, {rs1}, {}", i_imm(raw) & 0x3F)
            } else {
                format!("{op} {rd}, {rs1}, {}", simm(i_imm(raw)))
            }
        }
        opcodes::OP_LOAD => format!("{op} {rd}, {}({rs1})", simm(i_imm(raw))),
        opcodes::OP_STORE => format!("{op} {rs2}, {}({rs1})", simm(s_imm(raw))),
        opcodes::OP_BRANCH => format!("{op} {rs1}, {rs2}, {}", simm(b_imm(raw))),
        opcodes::OP_JALR => format!("{op} {rd}, {}({rs1})", simm(i_imm(raw))),
        opcodes::OP_JAL => format!("{op} {rd}, {}", simm(j_imm(raw))),
        _ => format!("{op} {rd}, {:#x}", raw >> 12),
    }
}
