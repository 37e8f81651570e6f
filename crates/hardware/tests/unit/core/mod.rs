//! # Core Tests


/// Five-stage pipeline: hazards, timing, exceptions.
pub mod pipeline;
