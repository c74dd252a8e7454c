//! Simulation Context.
//!
//! The per-run state every pipeline stage operates on. It owns the register
//! file and memory for the whole run and carries the branch-outcome signals
//! through which the Execute stage talks to the pipeline driver.
//!
//! Field ownership within a cycle:
//!
//! | Field | Written by | Read by |
//! |-------|------------|---------|
//! | `branch_taken`, `branch_target`, `prediction_correct` | Execute (branch unit) | Driver |
//! | `regs.pc`, `regs.pc_next` | Fetch, Decode redirect, Driver | Fetch |
//! | GP registers | Writeback, branch unit on return | Issue, Execute |
//! | `mem`, `regs.mar`, `regs.mdr` | Load/store unit | Fetch, load/store unit |
//! | `mem.stack`, `regs.lr` | Branch unit | Branch unit |

use crate::common::RegisterFile;
use crate::soc::Memory;

/// Shared simulation state passed by `&mut` to each stage for one cycle.
#[derive(Clone, Debug)]
pub struct SimContext {
    /// Architectural and staging registers.
    pub regs: RegisterFile,
    /// Word memory and call stack.
    pub mem: Memory,
    /// A branch resolved this cycle redirects control flow.
    pub branch_taken: bool,
    /// Where control flow goes when `branch_taken` is set.
    pub branch_target: i32,
    /// Whether the last resolved branch matched its prediction.
    pub prediction_correct: bool,
}

impl SimContext {
    /// Creates a context around an initialized register file and memory.
    pub const fn new(regs: RegisterFile, mem: Memory) -> Self {
        Self {
            regs,
            mem,
            branch_taken: false,
            branch_target: 0,
            prediction_correct: true,
        }
    }

    /// Clears the branch-outcome signals: PC commits as non-branching.
    pub const fn reset_branch(&mut self) {
        self.branch_taken = false;
        self.branch_target = 0;
        self.prediction_correct = true;
    }

    /// Asserts a taken branch to `target`, recording whether it was predicted.
    pub const fn assert_branch(&mut self, target: i32, prediction_correct: bool) {
        self.branch_taken = true;
        self.branch_target = target;
        self.prediction_correct = prediction_correct;
        self.regs.pc_branch = target;
    }
}
