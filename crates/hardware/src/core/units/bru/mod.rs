//! Branch resolution unit (BRU).
//!
//! This module resolves control-flow instructions in the Execute stage and
//! holds the static branch predictor consulted at Decode. It performs:
//! 1. **Resolution:** Evaluates conditional branches on forwarded operands.
//! 2. **Recovery:** Asserts branch-taken on the context when the prediction
//!    made at Decode was wrong, so the driver flushes and redirects.
//! 3. **Linkage:** Branch-with-link saves the registers and the return
//!    address on the call stack; return restores them in mirror order.
//! 4. **Supervisor Calls:** End-of-program raises the halt request.

pub use self::static_bp::StaticPredictor;

/// Static branch predictor (backward taken, forward not taken).
pub mod static_bp;

use tracing::debug;

use crate::common::constants::{GP_REGISTER_COUNT, RESERVED_REGISTER, SVC_HALT};
use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::core::pipeline::hazards::bypass_value;
use crate::isa::{Instruction, Opcode};

/// Branch unit: executes every instruction assigned to [`ExecUnit::Branch`](crate::core::units::ExecUnit::Branch).
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchUnit;

impl BranchUnit {
    /// Resolves a control-flow instruction.
    ///
    /// # Arguments
    ///
    /// * `inst`         - The instruction with forwarded operand values.
    /// * `ctx`          - Simulation context; branch fields may be asserted.
    /// * `in_writeback` - The instruction sitting in the Writeback stage. Its
    ///   pending value is forwarded into saved registers, and a return cancels
    ///   its register commit because the restore supersedes it.
    ///
    /// # Returns
    ///
    /// The writeback value (the return address for branch-with-link, else 0).
    ///
    /// # Errors
    ///
    /// `MemoryFault` on call-stack overflow/underflow, `RegisterFault` if a
    /// restore targets an invalid register.
    pub fn execute(
        inst: &Instruction,
        ctx: &mut SimContext,
        in_writeback: &mut Instruction,
    ) -> Result<i32> {
        match inst.opcode {
            Opcode::Bu => {
                if !inst.pred_taken {
                    ctx.assert_branch(inst.relative_target(), false);
                }
                Ok(0)
            }
            Opcode::Bl => {
                let ret_addr = inst.fall_through();
                ctx.regs.lr = ret_addr;
                for reg in (RESERVED_REGISTER + 1)..GP_REGISTER_COUNT {
                    let val = bypass_value(reg, &ctx.regs, in_writeback)?;
                    ctx.mem.stack.push(val)?;
                }
                ctx.mem.stack.push(ctx.regs.lr)?;
                debug!(
                    pc = inst.fetch_location,
                    ret = ret_addr,
                    depth = ctx.mem.stack.len(),
                    "call: registers saved"
                );
                if !inst.pred_taken {
                    ctx.assert_branch(inst.relative_target(), false);
                }
                Ok(ret_addr)
            }
            Opcode::Ret => {
                ctx.regs.lr = ctx.mem.stack.pop()?;
                for reg in ((RESERVED_REGISTER + 1)..GP_REGISTER_COUNT).rev() {
                    let val = ctx.mem.stack.pop()?;
                    ctx.regs.write(reg, val)?;
                }
                in_writeback.wb_cancelled = true;
                debug!(
                    pc = inst.fetch_location,
                    ret = ctx.regs.lr,
                    depth = ctx.mem.stack.len(),
                    "return: registers restored"
                );
                // The return target is only known here, so fetch always ran ahead
                // on the fall-through path.
                ctx.assert_branch(ctx.regs.lr, false);
                Ok(0)
            }
            Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bgt => {
                let taken = Self::condition(inst.opcode, inst.rv1, inst.rv2);
                if taken != inst.pred_taken {
                    let target = if taken {
                        inst.relative_target()
                    } else {
                        inst.fall_through()
                    };
                    ctx.assert_branch(target, false);
                }
                Ok(0)
            }
            Opcode::Eop => {
                ctx.regs.write_svc(SVC_HALT);
                Ok(0)
            }
            _ => Ok(0),
        }
    }

    /// Evaluates a conditional branch's condition.
    pub const fn condition(op: Opcode, a: i32, b: i32) -> bool {
        match op {
            Opcode::Beq => a == b,
            Opcode::Bne => a != b,
            Opcode::Blt => a < b,
            Opcode::Bgt => a > b,
            _ => false,
        }
    }
}
