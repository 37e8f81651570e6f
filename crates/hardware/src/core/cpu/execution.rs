//! Functional Step Chain.
//!
//! This module executes one instruction at a time with no timing. It provides:
//! 1. **Operand Collection:** Register reads gated by the decode flags.
//! 2. **Commit:** The single register-file write an instruction performs.
//! 3. **Step:** fetch, decode, operands, next PC, ALU, address, memory, commit.
//! 4. **Run Loop:** `run_instructions`, bounded or until a terminal condition.
//!
//! The pipeline stages call the same helpers, so both models agree on the
//! architectural result of every instruction.

use super::Cpu;
use crate::common::data::AccessSize;
use crate::common::reg::RegisterFile;
use crate::core::RunStatus;
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::core::units::lsu::Lsu;
use crate::isa::decode;
use crate::isa::instruction::Instruction;

/// Reads `rs1`/`rs2` into `op1`/`op2` for the operands the instruction uses.
///
/// Unused operands are left at zero; `x0` reads as zero.
pub fn collect_operands(inst: &mut Instruction, regs: &RegisterFile) {
    if inst.ctrl.reads_rs1 {
        inst.op1 = regs.read(inst.rs1);
    }
    if inst.ctrl.reads_rs2 {
        inst.op2 = regs.read(inst.rs2);
    }
}

/// Writes the instruction's result to `rd`.
///
/// # Returns
///
/// `true` if a register was written. Non-live records, illegal encodings, and
/// faulted loads write nothing.
pub fn commit(inst: &Instruction, regs: &mut RegisterFile) -> bool {
    match inst.dest() {
        Some(rd) => {
            regs.write(rd, inst.result());
            tracing::trace!(id = inst.id, "commit x{rd} <- {:#x}", inst.result());
            true
        }
        None => false,
    }
}

impl Cpu {
    /// Reads the instruction word at `pc`.
    ///
    /// A fetch outside memory yields `0`, which decodes as an illegal instruction.
    pub fn fetch_word(&self, pc: u64) -> u32 {
        match self.memory.get(pc, AccessSize::Word) {
            Ok(word) => word as u32,
            Err(e) => {
                tracing::warn!(pc = format_args!("{pc:#x}"), "fetch fault: {e}");
                0
            }
        }
    }

    /// Executes the instruction at `pc` to completion.
    ///
    /// # Returns
    ///
    /// The executed record. `pc` is left at the next instruction, except after a
    /// halt, an illegal instruction, or a memory fault, where it stays on the
    /// offending instruction.
    pub fn step(&mut self) -> Instruction {
        let pc = self.pc;
        let raw = self.fetch_word(pc);
        let mut inst = decode(pc, raw);
        inst.id = self.take_id();
        self.stats.dynamic_instructions += 1;

        if !inst.ctrl.legal {
            tracing::warn!(pc = format_args!("{pc:#x}"), "illegal instruction {raw:#010x}");
            self.stats.exceptions += 1;
            return inst;
        }
        if inst.ctrl.halt {
            tracing::debug!(pc = format_args!("{pc:#x}"), "halt");
            return inst;
        }

        collect_operands(&mut inst, &self.regs);
        inst.next_pc = Bru::next_pc(&inst);
        if inst.ctrl.arith_logic {
            inst.arith_result = Alu::execute(&inst);
        }

        if inst.ctrl.reads_mem || inst.ctrl.writes_mem {
            inst.mem_address = Lsu::address(&inst);
            match Lsu::access(&mut self.memory, &inst) {
                Ok(value) => inst.mem_result = value,
                Err(e) => {
                    tracing::warn!(pc = format_args!("{pc:#x}"), "memory fault: {e}");
                    inst.mem_fault = true;
                    self.stats.exceptions += 1;
                    return inst;
                }
            }
        }

        let _ = commit(&inst, &mut self.regs);
        self.pc = inst.next_pc;
        inst
    }

    /// Runs the functional model.
    ///
    /// # Arguments
    ///
    /// * `n` - Instructions to execute; `0` runs until halt or exception.
    ///
    /// # Returns
    ///
    /// `Halt` or `Exception` when a terminal instruction executed, otherwise
    /// `Success` with the budget used up.
    pub fn run_instructions(&mut self, n: u64) -> RunStatus {
        let mut executed = 0;
        while n == 0 || executed < n {
            let inst = self.step();
            executed += 1;
            if !inst.ctrl.legal || inst.mem_fault {
                return RunStatus::Exception;
            }
            if inst.ctrl.halt {
                return RunStatus::Halt;
            }
        }
        RunStatus::Success
    }
}
