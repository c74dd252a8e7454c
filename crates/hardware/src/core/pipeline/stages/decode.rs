//! Instruction Decode (ID) Stage.
//!
//! Decodes the word latched by Fetch in the previous cycle, consults the
//! static predictor and, for a predicted-taken PC-relative branch, steers
//! Fetch to the target. A poisoned IF/ID entry passes through undecoded.

use tracing::trace;

use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::core::pipeline::latches::{FetchedWord, Latches};
use crate::core::units::bru::StaticPredictor;
use crate::isa::decode::decode_at;
use crate::isa::{Instruction, Opcode};
use crate::stats::SimStats;

/// Executes the instruction decode stage of the pipeline.
///
/// # Arguments
///
/// * `ctx` - Simulation context; `regs.pc_next` may be redirected.
/// * `fetched` - IF/ID latch committed last cycle.
/// * `next` - Latches being built this cycle; writes `id_is` and may squash `if_id`.
/// * `stats` - Statistics sink.
/// * `trace_on` - Emit a per-stage trace event.
///
/// # Errors
///
/// `DecodeFault` if the opcode field names no defined instruction.
pub fn decode_stage(
    ctx: &mut SimContext,
    fetched: FetchedWord,
    next: &mut Latches,
    stats: &mut SimStats,
    trace_on: bool,
) -> Result<()> {
    if let Some(fault) = fetched.fault {
        next.id_is = Instruction {
            fetch_location: fetched.location,
            fetch_fault: Some(fault),
            ..Instruction::default()
        };
        return Ok(());
    }

    let mut inst = decode_at(fetched.word, fetched.location)?;
    inst.pred_taken = StaticPredictor::predict(&inst);

    // Return targets come off the call stack, so only Execute can redirect them.
    if inst.pred_taken && inst.opcode != Opcode::Ret {
        ctx.regs.pc_next = inst.relative_target();
        next.if_id = FetchedWord::default();
        stats.decode_redirects += 1;
    }

    if trace_on && !inst.is_nop() {
        trace!(
            "ID  pc={} {} pred_taken={}",
            inst.fetch_location,
            inst,
            inst.pred_taken
        );
    }
    next.id_is = inst;
    Ok(())
}
