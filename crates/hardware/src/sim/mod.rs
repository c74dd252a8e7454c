//! Simulation utilities and program loading.
//!
//! Provides the assembler, the loader that gets programs from disk into
//! memory, and the top-level simulator that runs them.

/// Line-oriented assembler.
pub mod assembler;

/// Program file reading and writing.
pub mod loader;

/// Top-level run loop.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
