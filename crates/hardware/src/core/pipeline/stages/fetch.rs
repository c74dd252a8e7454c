//! Instruction Fetch (IF) Stage.
//!
//! Reads the word at the committed program counter, loads it into the
//! instruction register and latches it for Decode. The shadow PC is advanced
//! sequentially; Decode may redirect it in the same cycle.
//!
//! A word that cannot be fetched does not fault here. Fetch latches a
//! poisoned entry instead, and the fault is raised only if that entry reaches
//! Execute.

use tracing::trace;

use crate::core::pipeline::context::SimContext;
use crate::core::pipeline::latches::{FetchFault, FetchedWord, Latches};

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `ctx` - Simulation context.
/// * `next` - Latches being built this cycle; writes `if_id`.
/// * `trace_on` - Emit a per-stage trace event.
///
/// An address outside memory or an illegal opcode field latches a
/// [`FetchFault`] in place of the word.
pub fn fetch_stage(ctx: &mut SimContext, next: &mut Latches, trace_on: bool) {
    let pc = ctx.regs.pc;
    next.if_id = match ctx.mem.read(pc) {
        Ok(raw) => {
            let word = raw as u32;
            match ctx.regs.write_ir(word) {
                Ok(()) => FetchedWord::new(word, pc),
                Err(_) => FetchedWord::poisoned(pc, FetchFault::IllegalOpcode { word }),
            }
        }
        Err(_) => FetchedWord::poisoned(pc, FetchFault::OutOfRange),
    };
    ctx.regs.pc_next = pc.wrapping_add(1);

    if trace_on {
        match next.if_id.fault {
            None => trace!("IF  pc={pc} word={:#010x}", next.if_id.word),
            Some(fault) => trace!("IF  pc={pc} deferred {fault:?}"),
        }
    }
}
