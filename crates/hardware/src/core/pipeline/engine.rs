//! Five-Stage Pipeline Engine.
//!
//! This module drives the cycle-by-cycle pipeline. Each tick:
//! 1. **Freeze:** An outstanding data-cache miss stops every stage; WB shows a bubble.
//! 2. **WB, MEM, EX, ID, IF:** Stages run in reverse order so every stage reads its
//!    downstream neighbour's previous record before it is overwritten.
//! 3. **Hazards:** Load-use and unresolved control flow hold ID and bubble EX.
//! 4. **Redirects:** Jumps, taken branches, and exceptions squash the wrong-path
//!    record and steer fetch.
//!
//! The engine owns the slots and stall counters; architectural state lives in the
//! [`Cpu`] borrowed for each tick.

use crate::common::constants::EXCEPTION_HANDLER;
use crate::core::pipeline::hazards::{
    ForwardSource, control_ready, forward_operands, forward_store_data, load_use_hazard,
};
use crate::core::pipeline::latches::{PipeSnapshot, PipeState};
use crate::core::pipeline::signals::PipelineControl;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::units::bru::Bru;
use crate::core::{Cpu, RunStatus};
use crate::isa::instruction::{Instruction, StageStatus};

/// The five-stage in-order pipeline.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    /// Stage slots.
    pub state: PipeState,
    /// Stall counters and cross-stage flags.
    pub control: PipelineControl,
    status: RunStatus,
}

/// Replaces a wrong-path record with a squashed slot.
fn squash(inst: Instruction, cpu: &mut Cpu) -> Instruction {
    if matches!(inst.status, StageStatus::Normal | StageStatus::Speculative) {
        cpu.stats.squashed += 1;
        tracing::trace!(pc = format_args!("{:#x}", inst.pc), "squash");
        inst.squash()
    } else {
        inst
    }
}

impl Pipeline {
    /// Creates a pipeline with every slot idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Status after the most recent tick.
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns every slot to idle and clears stalls, flags, and the status.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pipeline contents labelled with the number of the cycle just simulated.
    pub fn snapshot(&self, cpu: &Cpu) -> PipeSnapshot {
        PipeSnapshot {
            cycle: cpu.stats.cycles.saturating_sub(1),
            state: self.state.clone(),
        }
    }

    /// Raises the sticky exception and steers fetch to the handler.
    ///
    /// # Returns
    ///
    /// `false` if an exception had already been raised; the run must end.
    fn raise_exception(&mut self, cpu: &mut Cpu, pc: u64) -> bool {
        cpu.stats.exceptions += 1;
        if self.control.exception_raised {
            tracing::warn!(pc = format_args!("{pc:#x}"), "second exception, stopping");
            self.status = RunStatus::Exception;
            return false;
        }
        tracing::warn!(
            pc = format_args!("{pc:#x}"),
            "exception, redirecting to {EXCEPTION_HANDLER:#x}"
        );
        self.control.exception_raised = true;
        self.control.redirect = Some(EXCEPTION_HANDLER);
        true
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// Does nothing once a terminal status has been reached.
    ///
    /// # Returns
    ///
    /// The status after the cycle.
    pub fn tick(&mut self, cpu: &mut Cpu) -> RunStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        cpu.stats.cycles += 1;

        if self.control.mem_stall > 0 {
            self.control.mem_stall -= 1;
            self.control.fetch_stall = self.control.fetch_stall.saturating_sub(1);
            self.state.wb = Instruction::bubble();
            cpu.stats.dcache_stall_cycles += 1;
            return self.status;
        }

        // WB
        let retired = wb_stage(cpu, std::mem::take(&mut self.state.mem));
        if retired.is_live() && retired.ctrl.halt {
            self.status = if self.control.exception_raised {
                RunStatus::Exception
            } else {
                RunStatus::Halt
            };
            tracing::info!(cycle = cpu.stats.cycles, "halt retired ({})", self.status);
        }
        self.state.wb = retired;

        // MEM
        let mut inst = std::mem::take(&mut self.state.ex);
        let _ = forward_store_data(&mut inst, &self.state.wb);
        let (inst, hit) = mem_stage(cpu, inst);
        if !hit {
            self.control.mem_stall = cpu.l1_d_cache.miss_latency();
        }
        if inst.mem_fault && self.raise_exception(cpu, inst.pc) {
            let younger = std::mem::take(&mut self.state.id);
            self.state.id = squash(younger, cpu);
            self.control.control_pending = false;
        }
        self.state.mem = inst;

        // EX
        let control_wait = self.control.control_pending;
        let load_use = !control_wait && load_use_hazard(&self.state.mem, &self.state.id);
        let id_advanced = if control_wait || load_use {
            if load_use {
                cpu.stats.load_use_stalls += 1;
                tracing::trace!(id = self.state.id.id, "load-use stall");
            } else {
                cpu.stats.control_stalls += 1;
                tracing::trace!(id = self.state.id.id, "control stall");
            }
            let _ = forward_operands(&mut self.state.id, &self.state.wb, ForwardSource::Writeback);
            self.state.ex = Instruction::bubble();
            false
        } else {
            let mut inst = std::mem::take(&mut self.state.id);
            let _ = forward_operands(&mut inst, &self.state.wb, ForwardSource::Writeback);
            let _ = forward_operands(&mut inst, &self.state.mem, ForwardSource::Memory);
            self.state.ex = execute_stage(inst);
            true
        };

        // ID
        let fetch_now = id_advanced && self.decode(cpu);

        // Branch / JALR resolution
        if self.control.control_pending {
            self.resolve_control(cpu);
        }

        // IF
        if fetch_now {
            if self.control.fetch_halted {
                self.state.if_ = Instruction::idle();
            } else {
                let status = if self.control.control_pending || self.control.redirect.is_some() {
                    StageStatus::Speculative
                } else {
                    StageStatus::Normal
                };
                let (fetched, hit) = fetch_stage(cpu, status);
                if !hit {
                    self.control.fetch_stall = cpu.l1_i_cache.miss_latency();
                }
                self.state.if_ = fetched;
            }
        } else if self.control.fetch_stall > 0 {
            self.control.fetch_stall -= 1;
        }

        self.status
    }

    /// Runs the decode stage once ID has handed its previous record to EX.
    ///
    /// # Returns
    ///
    /// `true` when the IF slot was consumed and fetch may proceed this cycle.
    fn decode(&mut self, cpu: &mut Cpu) -> bool {
        if let Some(target) = self.control.redirect.take() {
            let wrong_path = std::mem::take(&mut self.state.if_);
            self.state.id = squash(wrong_path, cpu);
            self.control.fetch_stall = 0;
            self.control.fetch_halted = false;
            tracing::debug!(target = format_args!("{target:#x}"), "fetch redirect");
            cpu.pc = target;
            return true;
        }
        if self.control.fetch_stall > 0 {
            cpu.stats.icache_stall_cycles += 1;
            self.state.id = Instruction::bubble();
            return false;
        }
        if self.state.if_.status == StageStatus::Idle {
            self.state.id = Instruction::idle();
            return true;
        }

        let fetched = std::mem::take(&mut self.state.if_);
        let inst = decode_stage(cpu, fetched);
        if !inst.is_legal() {
            let _ = self.raise_exception(cpu, inst.pc);
        } else if inst.ctrl.halt {
            self.control.fetch_halted = true;
        } else if inst.needs_operands_to_resolve() {
            self.control.control_pending = true;
        } else if inst.next_pc != inst.fall_through() {
            self.control.redirect = Some(inst.next_pc);
        }
        self.state.id = inst;
        true
    }

    /// Resolves the branch or JALR held in ID if its operands are available.
    fn resolve_control(&mut self, cpu: &Cpu) {
        let state = &mut self.state;
        if !control_ready(&state.id, &state.ex, &state.mem) {
            return;
        }
        let _ = forward_operands(&mut state.id, &state.wb, ForwardSource::Writeback);
        let _ = forward_operands(&mut state.id, &state.mem, ForwardSource::Memory);
        state.id.next_pc = Bru::next_pc(&state.id);
        self.control.control_pending = false;
        if state.id.next_pc != state.id.fall_through() {
            self.control.redirect = Some(state.id.next_pc);
        }
        tracing::trace!(
            id = state.id.id,
            cycle = cpu.stats.cycles,
            "resolved, next pc {:#x}",
            state.id.next_pc
        );
    }

    /// Runs the pipeline for a cycle budget.
    ///
    /// # Arguments
    ///
    /// * `cpu` - CPU context to run on.
    /// * `n` - Cycles to simulate; `0` runs until halt or exception.
    ///
    /// # Returns
    ///
    /// `Halt` or `Exception` on a terminal condition, `Success` when the budget
    /// ran out first. A `Success` run can be resumed by calling again.
    pub fn run_cycles(&mut self, cpu: &mut Cpu, n: u64) -> RunStatus {
        self.run_cycles_with(cpu, n, |_, _| {})
    }

    /// Like [`Pipeline::run_cycles`], calling `on_cycle` after every tick.
    pub fn run_cycles_with<F>(&mut self, cpu: &mut Cpu, n: u64, mut on_cycle: F) -> RunStatus
    where
        F: FnMut(&Self, &Cpu),
    {
        let mut elapsed = 0;
        while !self.status.is_terminal() && (n == 0 || elapsed < n) {
            let _ = self.tick(cpu);
            elapsed += 1;
            on_cycle(self, cpu);
        }
        self.status
    }
}
