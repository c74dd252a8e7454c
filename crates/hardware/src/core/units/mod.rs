//! Execution units.
//!
//! This module contains the three functional units of the Execute stage
//! and the closed enumeration used to dispatch to them.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit and the static branch predictor.
pub mod bru;

/// Load/Store Unit for memory access and register moves.
pub mod lsu;

use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::isa::Instruction;

use self::alu::Alu;
use self::bru::BranchUnit;
use self::lsu::Lsu;

/// Functional unit an instruction is dispatched to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExecUnit {
    /// Arithmetic/logic unit.
    #[default]
    Alu,
    /// Load/store unit.
    LoadStore,
    /// Branch/control unit.
    Branch,
}

impl ExecUnit {
    /// Runs `inst` on this unit and returns its writeback value.
    ///
    /// # Errors
    ///
    /// Whatever fault the unit raises (arithmetic, memory or register).
    pub fn execute(
        self,
        inst: &Instruction,
        ctx: &mut SimContext,
        in_writeback: &mut Instruction,
    ) -> Result<i32> {
        match self {
            Self::Alu => Alu::run(inst),
            Self::LoadStore => Lsu::execute(inst, ctx),
            Self::Branch => BranchUnit::execute(inst, ctx, in_writeback),
        }
    }

    /// Short name for traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alu => "ALU",
            Self::LoadStore => "LSU",
            Self::Branch => "BU",
        }
    }
}
