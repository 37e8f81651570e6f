//! System Components Outside the Core.
//!
//! The simulated system is a single core attached to one flat memory store;
//! there is no bus or device model.

/// Main memory store.
pub mod memory;

pub use memory::MemoryStore;
