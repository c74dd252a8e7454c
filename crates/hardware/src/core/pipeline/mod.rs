//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Context:** Per-run state shared by every stage.
//! 2. **Engine:** The driver that clocks the stages and flushes on a taken branch.
//! 3. **Hazards:** Operand forwarding from the register file and Writeback.
//! 4. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 5. **Stages:** Implementation of Fetch, Decode, Issue, Execute, and Writeback.
//! 6. **Traits:** The Issue-stage dependency-check interface.

/// Simulation context shared by all stages.
pub mod context;

/// Pipeline driver.
pub mod engine;

/// Operand forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/IS, executable queue, EX/WB).
pub mod latches;

/// Pipeline stage implementations (fetch, decode, issue, execute, writeback).
pub mod stages;

/// Issue-stage dependency-check interface.
pub mod traits;

pub use context::SimContext;
pub use engine::Pipeline;
pub use traits::{DependencyCheck, NoDependencyCheck};
