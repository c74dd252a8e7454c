//! Issue-Stage Interfaces.
//!
//! This module defines the seam between the Issue stage and whatever decides
//! when an instruction's operands are safe to read. The shipped pipeline
//! resolves hazards by forwarding at Execute, so its checker never holds an
//! instruction back; a scoreboarding checker can be dropped in without
//! touching the stage.

use crate::common::RegisterFile;
use crate::isa::Instruction;

/// Decides whether an instruction may leave the Issue stage this cycle.
pub trait DependencyCheck {
    /// Returns `true` if `inst` can be issued with the current register state.
    ///
    /// # Arguments
    ///
    /// * `inst` - The oldest instruction waiting in Issue.
    /// * `regs` - Register file as seen by Issue this cycle.
    fn is_ready(&self, inst: &Instruction, regs: &RegisterFile) -> bool;
}

/// Checker that never stalls: every operand hazard is left to forwarding.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDependencyCheck;

impl DependencyCheck for NoDependencyCheck {
    fn is_ready(&self, _inst: &Instruction, _regs: &RegisterFile) -> bool {
        true
    }
}
