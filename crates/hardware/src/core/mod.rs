//! Core processor implementation.
//!
//! This module contains the processor context, the five-stage pipeline, and the
//! execution units both execution models share.

/// CPU context (registers, memory, caches, statistics) and the functional step chain.
pub mod cpu;

/// Five-stage pipeline (slots, hazards, stages, engine).
pub mod pipeline;

/// Execution units (ALU, BRU, LSU, cache).
pub mod units;

pub use self::cpu::Cpu;

/// Outcome of a bounded or unbounded run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The budget was used up without reaching a terminal condition; the run can be resumed.
    #[default]
    Success,
    /// The halt sentinel completed and no exception had been raised.
    Halt,
    /// An illegal instruction or memory fault ended the run.
    Exception,
}

impl RunStatus {
    /// `true` for `Halt` and `Exception`; such a run cannot make further progress.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Success)
    }

    /// Process exit code reported by the command-line front end.
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success | Self::Halt => 0,
            Self::Exception => 1,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Halt => "HALT",
            Self::Exception => "EXCEPTION",
        })
    }
}
