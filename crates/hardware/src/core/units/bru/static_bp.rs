//! Static Branch Predictor.
//!
//! Implements a fixed "backward taken, forward not taken" policy. Unconditional
//! transfers (branch, call, return) are always predicted taken. A conditional
//! branch with a negative offset is presumed to close a loop and predicted
//! taken; a forward conditional branch is predicted not taken.

use crate::isa::Instruction;

/// Stateless static branch predictor.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Predicts whether `inst` transfers control.
    ///
    /// Pure: the same instruction always gets the same answer.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::bru::StaticPredictor;
    /// use pipesim_core::isa::{Instruction, Opcode};
    ///
    /// let backward = Instruction::new(Opcode::Bne, 1, 2, 0, -4);
    /// let forward = Instruction::new(Opcode::Bne, 1, 2, 0, 4);
    /// assert!(StaticPredictor::predict(&backward));
    /// assert!(!StaticPredictor::predict(&forward));
    /// ```
    pub fn predict(inst: &Instruction) -> bool {
        if inst.opcode.is_unconditional_branch() {
            true
        } else if inst.opcode.is_conditional_branch() {
            inst.imm < 0
        } else {
            false
        }
    }
}
