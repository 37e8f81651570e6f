//! Simulator: owns the CPU context and the pipeline side-by-side.
//!
//! Keeping the two apart lets the pipeline borrow the CPU mutably for each tick
//! without any borrow splitting. The simulator also selects the execution model,
//! remembers the last run status, and feeds the pipeline-state log, either into
//! memory or straight to its report file.

use std::path::{Path, PathBuf};

use crate::common::error::SimError;
use crate::config::{Config, RunMode};
use crate::core::pipeline::Pipeline;
use crate::core::{Cpu, RunStatus};
use crate::sim::report::{PipeLog, ReportSet, pipe_state_line};
use crate::soc::memory::MemoryStore;
use crate::stats::SimStats;

/// Top-level simulator: CPU context + pipeline.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, memory, caches, stats).
    pub cpu: Cpu,
    /// Five-stage pipeline (slots and stall state).
    pub pipeline: Pipeline,
    mode: RunMode,
    status: RunStatus,
    dump_range: (u64, u64),
    pipe_log: Option<PipeLog>,
    pipe_error: Option<SimError>,
}

impl Simulator {
    /// Creates a simulator over a loaded memory store.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated before any state is built.
    /// * `memory` - Memory holding the program image.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] when the configuration is rejected.
    pub fn new(config: &Config, memory: MemoryStore) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            cpu: Cpu::new(config, memory)?,
            pipeline: Pipeline::new(),
            mode: config.general.mode,
            status: RunStatus::Success,
            dump_range: (config.memory.dump_start, config.memory.dump_end),
            pipe_log: None,
            pipe_error: None,
        })
    }

    /// Starts recording one pipeline-state line per simulated cycle in memory.
    pub fn enable_pipe_log(&mut self) {
        if self.pipe_log.is_none() {
            self.pipe_log = Some(PipeLog::Buffer(String::new()));
        }
    }

    /// Streams one pipeline-state line per simulated cycle to `path`.
    ///
    /// Memory use stays constant however long the run is. Call
    /// [`Simulator::finish_pipe_log`] once the run is over.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be created.
    pub fn stream_pipe_log(&mut self, path: &Path) -> Result<(), SimError> {
        self.pipe_log = Some(PipeLog::create(path)?);
        Ok(())
    }

    /// Pipeline-state lines recorded in memory so far; `None` when the log is
    /// off or streamed to a file.
    pub fn pipe_log(&self) -> Option<&str> {
        self.pipe_log.as_ref().and_then(PipeLog::as_str)
    }

    /// Flushes a streamed pipeline-state log.
    ///
    /// # Errors
    ///
    /// The write error that stopped the log during the run, if any, or
    /// [`SimError::Io`] if the final flush fails.
    pub fn finish_pipe_log(&mut self) -> Result<(), SimError> {
        if let Some(e) = self.pipe_error.take() {
            return Err(e);
        }
        self.pipe_log.as_mut().map_or(Ok(()), PipeLog::flush)
    }

    /// Overrides the memory range written to the memory report.
    pub const fn set_dump_range(&mut self, start: u64, end: u64) {
        self.dump_range = (start, end);
    }

    /// Execution model selected by the configuration.
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    /// Status of the most recent run.
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Statistics including cache counters.
    pub fn stats(&self) -> SimStats {
        self.cpu.stats()
    }

    /// Advances the pipeline by `n` cycles (`0`: until halt or exception).
    pub fn run_cycles(&mut self, n: u64) -> RunStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        let pipe_log = &mut self.pipe_log;
        let pipe_error = &mut self.pipe_error;
        let status = self.pipeline.run_cycles_with(&mut self.cpu, n, |p, c| {
            let Some(log) = pipe_log.as_mut() else { return };
            if let Err(e) = log.push_line(&pipe_state_line(&p.snapshot(c))) {
                tracing::warn!(error = %e, "pipeline-state log stopped");
                *pipe_log = None;
                *pipe_error = Some(e);
            }
        });
        self.status = status;
        status
    }

    /// Executes `n` instructions functionally (`0`: until halt or exception).
    pub fn run_instructions(&mut self, n: u64) -> RunStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        self.status = self.cpu.run_instructions(n);
        self.status
    }

    /// Runs the configured model for `budget` cycles or instructions.
    pub fn run(&mut self, budget: u64) -> RunStatus {
        tracing::info!(mode = ?self.mode, budget, "run start");
        let status = match self.mode {
            RunMode::Functional => self.run_instructions(budget),
            RunMode::Pipelined => self.run_cycles(budget),
        };
        tracing::info!(
            %status,
            cycles = self.cpu.stats.cycles,
            instructions = self.cpu.stats.dynamic_instructions,
            "run end"
        );
        status
    }

    /// Runs the configured model until halt or exception.
    pub fn run_till_halt(&mut self) -> RunStatus {
        self.run(0)
    }

    /// Writes the report files next to `base`.
    ///
    /// A streamed pipeline-state log is already on disk and is not rewritten.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if a file cannot be written.
    pub fn write_reports(&self, base: &Path) -> Result<Vec<PathBuf>, SimError> {
        let stats = self.stats();
        ReportSet {
            pipe_log: self.pipe_log(),
            regs: &self.cpu.regs,
            memory: &self.cpu.memory,
            dump_range: self.dump_range,
            caches: [&self.cpu.l1_i_cache, &self.cpu.l1_d_cache],
            stats: &stats,
        }
        .write(base)
    }
}
