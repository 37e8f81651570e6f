//! Pipeline tests.


/// Illegal instructions, memory faults, and the handler redirect.
pub mod exceptions;
