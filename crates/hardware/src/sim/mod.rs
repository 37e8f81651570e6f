//! Simulation driver, program loading, and reports.
//!
//! Provides the top-level [`Simulator`] that owns the CPU context and the
//! pipeline, the loader that builds the initial memory image, and the text
//! reports written at the end of a run.

pub mod loader;
pub mod report;
pub mod simulator;

pub use simulator::Simulator;
