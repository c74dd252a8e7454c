//! Writeback (WB) Stage.
//!
//! Commits results to the register file and updates the status flags for
//! ALU results. This is the final stage of the pipeline.

use tracing::trace;

use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::core::units::ExecUnit;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `ctx` - Simulation context.
/// * `retiring` - EX/WB latch committed last cycle.
/// * `stats` - Statistics sink.
/// * `trace_on` - Emit a per-stage trace event.
///
/// # Behavior
///
/// - ALU and load/store results that target a register are written to `rd`
/// - ALU commits also set the Z and N flags
/// - Branch-unit instructions and cancelled writebacks leave the registers alone
///
/// # Errors
///
/// `RegisterFault` if the destination is the reserved register or out of range.
pub fn wb_stage(
    ctx: &mut SimContext,
    retiring: &Instruction,
    stats: &mut SimStats,
    trace_on: bool,
) -> Result<()> {
    if retiring.writes_register() && !retiring.wb_cancelled {
        ctx.regs.write(retiring.rd, retiring.wb_value)?;
        if retiring.unit == ExecUnit::Alu {
            ctx.regs.set_flags_from(retiring.wb_value);
        }
        if trace_on {
            trace!(
                "WB  pc={} R{} <- {}",
                retiring.fetch_location,
                retiring.rd,
                retiring.wb_value
            );
        }
    }

    stats.record_retire(retiring);
    Ok(())
}
