//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Retrieves the word at the committed PC.
//! 2. **Decode:** Decodes it and applies the static branch prediction.
//! 3. **Issue:** Checks readiness and reads operands from the register file.
//! 4. **Execute:** Forwards operands and runs the instruction on its unit.
//! 5. **Writeback:** Commits results to the register file.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Instruction issue stage implementation.
pub mod issue;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Issue stage state (IS stage).
pub use issue::IssueStage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
