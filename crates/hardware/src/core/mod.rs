//! Core processor implementation.
//!
//! This module contains the processor proper: the architectural register
//! components, the instruction pipeline and the functional units it
//! dispatches to.

/// Architectural components (GP register array, status flags).
pub mod arch;

/// Instruction pipeline implementation (context, driver, stages, latches, forwarding).
pub mod pipeline;

/// Execution units (ALU, LSU, branch unit and predictor).
pub mod units;

pub use self::pipeline::{Pipeline, SimContext};
