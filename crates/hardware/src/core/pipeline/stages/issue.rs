//! Instruction Issue (IS) Stage.
//!
//! Buffers decoded instructions, asks the dependency checker whether the
//! oldest ones may proceed, reads their operands from the register file and
//! hands them to the executable queue.

use std::collections::VecDeque;

use tracing::trace;

use crate::common::RegisterFile;
use crate::common::error::Result;
use crate::core::pipeline::latches::ExecQueue;
use crate::core::pipeline::traits::DependencyCheck;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Issue-stage state carried across cycles.
pub struct IssueStage {
    pending: VecDeque<Instruction>,
    checker: Box<dyn DependencyCheck>,
    width: usize,
}

impl std::fmt::Debug for IssueStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueStage")
            .field("pending", &self.pending)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl IssueStage {
    /// Creates an Issue stage that moves at most `width` instructions per cycle.
    pub fn new(checker: Box<dyn DependencyCheck>, width: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            checker,
            width,
        }
    }

    /// Instructions decoded but not yet issued, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Instruction> {
        self.pending.iter()
    }

    /// Discards every pending instruction.
    pub fn flush(&mut self) {
        self.pending.clear();
    }

    /// Executes the issue stage of the pipeline.
    ///
    /// # Arguments
    ///
    /// * `regs` - Register file as of the start of this cycle.
    /// * `decoded` - ID/IS latch committed last cycle.
    /// * `queue` - Executable queue; issued instructions are staged into it.
    /// * `stats` - Statistics sink.
    /// * `trace_on` - Emit a per-stage trace event.
    ///
    /// # Errors
    ///
    /// `RegisterFault` if an operand names an invalid register.
    pub fn tick(
        &mut self,
        regs: &RegisterFile,
        decoded: &Instruction,
        queue: &mut ExecQueue,
        stats: &mut SimStats,
        trace_on: bool,
    ) -> Result<()> {
        if !decoded.is_bubble() {
            self.pending.push_back(decoded.clone());
        }

        for _ in 0..self.width {
            let Some(head) = self.pending.front_mut() else {
                break;
            };
            if !self.checker.is_ready(head, regs) {
                head.dependent = true;
                stats.issue_stalls += 1;
                break;
            }
            let Some(mut inst) = self.pending.pop_front() else {
                break;
            };

            let [src1, src2] = inst.sources();
            if let Some(loc) = src1 {
                inst.rv1 = regs.read(loc)?;
            }
            if let Some(loc) = src2 {
                inst.rv2 = regs.read(loc)?;
            }
            inst.dependent = false;

            if trace_on {
                trace!(
                    "IS  pc={} {} rv1={} rv2={}",
                    inst.fetch_location,
                    inst,
                    inst.rv1,
                    inst.rv2
                );
            }
            queue.push(inst);
        }
        Ok(())
    }
}
