//! Execute (EX) Stage.
//!
//! Takes the oldest issued instruction, refreshes its operands through the
//! forwarding network and runs it on its functional unit. Branch resolution
//! happens here; a taken branch is reported to the driver through the
//! context, never acted on locally.

use tracing::{debug, trace};

use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::core::pipeline::hazards::forward_operands;
use crate::core::pipeline::latches::{ExecQueue, Latches};
use crate::core::units::ExecUnit;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `ctx` - Simulation context; branch signals are reset, then possibly asserted.
/// * `queue` - Executable queue to pop from.
/// * `in_writeback` - EX/WB latch committed last cycle, i.e. the instruction
///   Writeback retires this cycle. Source of the bypass; a return cancels it.
/// * `next` - Latches being built this cycle; writes `ex_wb`.
/// * `stats` - Statistics sink.
/// * `trace_on` - Emit a per-stage trace event.
///
/// # Errors
///
/// A deferred fetch fault carried by the instruction, or any fault raised by
/// forwarding or by the functional unit.
pub fn execute_stage(
    ctx: &mut SimContext,
    queue: &mut ExecQueue,
    in_writeback: &mut Instruction,
    next: &mut Latches,
    stats: &mut SimStats,
    trace_on: bool,
) -> Result<()> {
    ctx.reset_branch();

    let Some(mut inst) = queue.pop() else {
        next.ex_wb = Instruction::default();
        return Ok(());
    };

    if let Some(fault) = inst.fetch_fault {
        fault.raise(ctx, inst.fetch_location)?;
        next.ex_wb = Instruction::default();
        return Ok(());
    }

    let counts = forward_operands(&mut inst, &ctx.regs, in_writeback)?;
    stats.record_forwarding(counts);

    let value = inst.unit.execute(&inst, ctx, in_writeback)?;
    inst.wb_value = value;

    if inst.unit == ExecUnit::Branch {
        if inst.opcode.is_conditional_branch() {
            stats.branches_resolved += 1;
        }
        if ctx.branch_taken && !ctx.prediction_correct {
            stats.branch_mispredictions += 1;
            debug!(
                pc = inst.fetch_location,
                target = ctx.branch_target,
                "branch mispredicted"
            );
        }
    }

    if trace_on {
        trace!(
            "EX  pc={} {} [{}] a={} b={} -> {}",
            inst.fetch_location,
            inst,
            inst.unit.name(),
            inst.rv1,
            inst.rv2,
            inst.wb_value
        );
    }
    next.ex_wb = inst;
    Ok(())
}
