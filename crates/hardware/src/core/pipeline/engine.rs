//! Pipeline driver.
//!
//! Owns the inter-stage state and advances the whole pipeline by one clock
//! cycle per [`Pipeline::tick`]:
//! 1. **Stages:** Fetch, Decode, Issue, Execute, Writeback, in that order.
//!    Each reads the latches committed last cycle and writes the next ones.
//! 2. **Flush:** If Execute took a branch, everything before Execute is
//!    discarded. Execute and Writeback are never flushed.
//! 3. **Commit:** The PC views are reconciled, the latches advance and the
//!    cycle counter increments.

use tracing::debug;

use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::core::pipeline::latches::{ExecQueue, FetchedWord, Latches};
use crate::core::pipeline::stages::{
    IssueStage, decode_stage, execute_stage, fetch_stage, wb_stage,
};
use crate::core::pipeline::traits::{DependencyCheck, NoDependencyCheck};
use crate::isa::Instruction;
use crate::stats::SimStats;

/// The five-stage in-order pipeline.
#[derive(Debug)]
pub struct Pipeline {
    latches: Latches,
    next: Latches,
    issue: IssueStage,
    queue: ExecQueue,
    /// Performance counters.
    pub stats: SimStats,
    /// Emit per-stage trace events.
    pub trace: bool,
}

impl Pipeline {
    /// Creates an empty pipeline with the stub dependency checker.
    pub fn new(issue_width: usize, trace: bool) -> Self {
        Self::with_checker(Box::new(NoDependencyCheck), issue_width, trace)
    }

    /// Creates an empty pipeline with a custom Issue-stage dependency checker.
    pub fn with_checker(
        checker: Box<dyn DependencyCheck>,
        issue_width: usize,
        trace: bool,
    ) -> Self {
        Self {
            latches: Latches::default(),
            next: Latches::default(),
            issue: IssueStage::new(checker, issue_width),
            queue: ExecQueue::default(),
            stats: SimStats::default(),
            trace,
        }
    }

    /// Latches committed at the end of the last cycle.
    pub const fn latches(&self) -> &Latches {
        &self.latches
    }

    /// The executable queue between Issue and Execute.
    pub const fn queue(&self) -> &ExecQueue {
        &self.queue
    }

    /// Issue-stage state.
    pub const fn issue(&self) -> &IssueStage {
        &self.issue
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Simulation context shared by all stages.
    ///
    /// # Errors
    ///
    /// The first fault raised by any stage. The cycle is abandoned at that
    /// point: latches do not advance and the cycle counter is not incremented.
    pub fn tick(&mut self, ctx: &mut SimContext) -> Result<()> {
        let trace = self.trace;
        self.next = Latches::default();

        fetch_stage(ctx, &mut self.next, trace);
        decode_stage(
            ctx,
            self.latches.if_id,
            &mut self.next,
            &mut self.stats,
            trace,
        )?;
        self.issue.tick(
            &ctx.regs,
            &self.latches.id_is,
            &mut self.queue,
            &mut self.stats,
            trace,
        )?;
        execute_stage(
            ctx,
            &mut self.queue,
            &mut self.latches.ex_wb,
            &mut self.next,
            &mut self.stats,
            trace,
        )?;
        wb_stage(ctx, &self.latches.ex_wb, &mut self.stats, trace)?;

        if ctx.branch_taken {
            self.flush();
            debug!(
                cycle = ctx.regs.cycles,
                target = ctx.branch_target,
                "flushed fetch, decode and issue"
            );
        }

        ctx.regs.reconcile_pc(ctx.branch_taken);
        self.queue.commit();
        self.latches = std::mem::take(&mut self.next);
        ctx.regs.cycles += 1;
        self.stats.cycles = ctx.regs.cycles;
        Ok(())
    }

    /// Resets Fetch, Decode and Issue to bubbles.
    fn flush(&mut self) {
        self.next.if_id = FetchedWord::default();
        self.next.id_is = Instruction::default();
        self.issue.flush();
        self.queue.clear();
        self.stats.flushes += 1;
    }
}
