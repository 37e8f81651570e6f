use rvpipe_core::common::constants::HALT_WORD;
use rvpipe_core::isa::rv64i::funct3::*;
use rvpipe_core::isa::rv64i::funct7::{ALT, BASE};
use rvpipe_core::isa::rv64i::opcodes::*;

/// The halt sentinel, for terminating test programs.
pub const HALT: u32 = HALT_WORD;

#[derive(Clone, Copy, Debug, Default)]
pub struct InstructionBuilder {
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
    imm: i32,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opcode(mut self, op: u32) -> Self {
        self.opcode = op;
        self
    }

    pub fn rd(mut self, rd: u32) -> Self {
        self.rd = rd;
        self
    }

    pub fn rs1(mut self, rs1: u32) -> Self {
        self.rs1 = rs1;
        self
    }

    pub fn rs2(mut self, rs2: u32) -> Self {
        self.rs2 = rs2;
        self
    }

    pub fn funct3(mut self, funct3: u32) -> Self {
        self.funct3 = funct3;
        self
    }

    pub fn funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    pub fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    // --- Format helpers ---

    fn r_type(mut self, opcode: u32, f3: u32, f7: u32, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = opcode;
        self.funct3 = f3;
        self.funct7 = f7;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self
    }

    fn i_type(mut self, opcode: u32, f3: u32, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = opcode;
        self.funct3 = f3;
        self.rd = rd;
        self.rs1 = rs1;
        self.imm = imm;
        self
    }

    fn s_type(mut self, f3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_STORE;
        self.funct3 = f3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    fn b_type(mut self, f3: u32, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_BRANCH;
        self.funct3 = f3;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.imm = imm;
        self
    }

    // --- Register-register ---

    pub fn add(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, ADD_SUB, BASE, rd, rs1, rs2)
    }

    pub fn sub(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, ADD_SUB, ALT, rd, rs1, rs2)
    }

    pub fn sll(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, SLL, BASE, rd, rs1, rs2)
    }

    pub fn slt(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, SLT, BASE, rd, rs1, rs2)
    }

    pub fn sltu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, SLTU, BASE, rd, rs1, rs2)
    }

    pub fn xor(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, XOR, BASE, rd, rs1, rs2)
    }

    pub fn srl(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, SRL_SRA, BASE, rd, rs1, rs2)
    }

    pub fn sra(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, SRL_SRA, ALT, rd, rs1, rs2)
    }

    pub fn or(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, OR, BASE, rd, rs1, rs2)
    }

    pub fn and(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG, AND, BASE, rd, rs1, rs2)
    }

    pub fn addw(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG_32, ADD_SUB, BASE, rd, rs1, rs2)
    }

    pub fn subw(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG_32, ADD_SUB, ALT, rd, rs1, rs2)
    }

    pub fn sllw(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG_32, SLL, BASE, rd, rs1, rs2)
    }

    pub fn sraw(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.r_type(OP_REG_32, SRL_SRA, ALT, rd, rs1, rs2)
    }

    // --- Register-immediate ---

    pub fn addi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, ADD_SUB, rd, rs1, imm)
    }

    pub fn slti(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, SLT, rd, rs1, imm)
    }

    pub fn sltiu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, SLTU, rd, rs1, imm)
    }

    pub fn xori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, XOR, rd, rs1, imm)
    }

    pub fn ori(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, OR, rd, rs1, imm)
    }

    pub fn andi(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM, AND, rd, rs1, imm)
    }

    pub fn slli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM, SLL, rd, rs1, (shamt & 0x3F) as i32)
    }

    pub fn srli(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM, SRL_SRA, rd, rs1, (shamt & 0x3F) as i32)
    }

    /// Bit 10 of the immediate selects the arithmetic shift.
    pub fn srai(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM, SRL_SRA, rd, rs1, 0x400 | (shamt & 0x3F) as i32)
    }

    pub fn addiw(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_IMM_32, ADD_SUB, rd, rs1, imm)
    }

    pub fn slliw(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM_32, SLL, rd, rs1, (shamt & 0x1F) as i32)
    }

    pub fn sraiw(self, rd: u32, rs1: u32, shamt: u32) -> Self {
        self.i_type(OP_IMM_32, SRL_SRA, rd, rs1, 0x400 | (shamt & 0x1F) as i32)
    }

    // --- Loads and stores ---

    pub fn lb(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, LB, rd, rs1, imm)
    }

    pub fn lh(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, LH, rd, rs1, imm)
    }

    pub fn lw(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, LW, rd, rs1, imm)
    }

    pub fn ld(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, LD, rd, rs1, imm)
    }

    pub fn lbu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, LBU, rd, rs1, imm)
    }

    pub fn lhu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, LHU, rd, rs1, imm)
    }

    pub fn lwu(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_LOAD, LWU, rd, rs1, imm)
    }

    pub fn sb(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s_type(SB, rs1, rs2, imm)
    }

    pub fn sh(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s_type(SH, rs1, rs2, imm)
    }

    pub fn sw(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s_type(SW, rs1, rs2, imm)
    }

    pub fn sd(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.s_type(SD, rs1, rs2, imm)
    }

    // --- Control flow ---

    pub fn beq(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(BEQ, rs1, rs2, imm)
    }

    pub fn bne(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(BNE, rs1, rs2, imm)
    }

    pub fn blt(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(BLT, rs1, rs2, imm)
    }

    pub fn bge(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(BGE, rs1, rs2, imm)
    }

    pub fn bltu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(BLTU, rs1, rs2, imm)
    }

    pub fn bgeu(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.b_type(BGEU, rs1, rs2, imm)
    }

    pub fn jal(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_JAL;
        self.rd = rd;
        self.imm = imm;
        self
    }

    pub fn jalr(self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.i_type(OP_JALR, JALR, rd, rs1, imm)
    }

    /// `imm` is the 20-bit upper immediate, unshifted.
    pub fn lui(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_LUI;
        self.rd = rd;
        self.imm = imm;
        self
    }

    /// `imm` is the 20-bit upper immediate, unshifted.
    pub fn auipc(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_AUIPC;
        self.rd = rd;
        self.imm = imm;
        self
    }

    /// ADDI x0, x0, 0.
    pub fn nop(self) -> Self {
        self.addi(0, 0, 0)
    }

    pub fn build(self) -> u32 {
        let opcode = self.opcode & 0x7F;
        let rd = (self.rd & 0x1F) << 7;
        let funct3 = (self.funct3 & 0x7) << 12;
        let rs1 = (self.rs1 & 0x1F) << 15;
        let rs2 = (self.rs2 & 0x1F) << 20;
        let funct7 = (self.funct7 & 0x7F) << 25;
        let imm = self.imm as u32;

        match opcode {
            OP_REG | OP_REG_32 => funct7 | rs2 | rs1 | funct3 | rd | opcode,
            OP_IMM | OP_IMM_32 | OP_LOAD | OP_JALR => {
                ((imm & 0xFFF) << 20) | rs1 | funct3 | rd | opcode
            }
            OP_STORE => {
                let imm_11_5 = ((imm >> 5) & 0x7F) << 25;
                let imm_4_0 = (imm & 0x1F) << 7;
                imm_11_5 | rs2 | rs1 | funct3 | imm_4_0 | opcode
            }
            OP_BRANCH => {
                let bit_12 = ((imm >> 12) & 0x1) << 31;
                let bits_10_5 = ((imm >> 5) & 0x3F) << 25;
                let bits_4_1 = ((imm >> 1) & 0xF) << 8;
                let bit_11 = ((imm >> 11) & 0x1) << 7;
                bit_12 | bits_10_5 | rs2 | rs1 | funct3 | bits_4_1 | bit_11 | opcode
            }
            OP_LUI | OP_AUIPC => ((imm & 0xFFFFF) << 12) | rd | opcode,
            OP_JAL => {
                let bit_20 = ((imm >> 20) & 0x1) << 31;
                let bits_10_1 = ((imm >> 1) & 0x3FF) << 21;
                let bit_11 = ((imm >> 11) & 0x1) << 20;
                let bits_19_12 = ((imm >> 12) & 0xFF) << 12;
                bit_20 | bits_10_1 | bit_11 | bits_19_12 | rd | opcode
            }
            _ => panic!("Unsupported opcode: {opcode:#x}"),
        }
    }
}
