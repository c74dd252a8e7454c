//! Load/Store Unit (LSU).
//!
//! This module provides the Load/Store Unit, responsible for every
//! instruction that moves a value into a register or memory without
//! computing it:
//! - Loads and stores, staged through the MAR/MDR registers.
//! - Register-immediate and register-register moves (pass-through).

use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::isa::{Instruction, Opcode};

/// Load/Store Unit (LSU) for memory operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lsu;

impl Lsu {
    /// Executes a load, store or move.
    ///
    /// # Arguments
    ///
    /// * `inst` - The instruction with forwarded operand values.
    /// * `ctx`  - Simulation context (memory and MAR/MDR).
    ///
    /// # Returns
    ///
    /// The writeback value: loaded word, immediate, or source register value.
    /// For stores the stored word is returned; Writeback does not commit it.
    ///
    /// # Errors
    ///
    /// `MemoryFault` if the effective address is outside memory.
    pub fn execute(inst: &Instruction, ctx: &mut SimContext) -> Result<i32> {
        match inst.opcode {
            Opcode::Ld => {
                let addr = inst.rv1.wrapping_add(inst.imm);
                ctx.regs.mar = addr;
                ctx.regs.mdr = ctx.mem.read(addr)?;
                Ok(ctx.regs.mdr)
            }
            Opcode::St => {
                // rv2 carries the addressing register (rd field), rv1 the value.
                let addr = inst.rv2.wrapping_add(inst.imm);
                ctx.regs.mar = addr;
                ctx.regs.mdr = inst.rv1;
                ctx.mem.write(ctx.regs.mar, ctx.regs.mdr)?;
                Ok(ctx.regs.mdr)
            }
            Opcode::Movi => Ok(inst.imm),
            Opcode::Movr => Ok(inst.rv1),
            _ => Ok(0),
        }
    }
}
