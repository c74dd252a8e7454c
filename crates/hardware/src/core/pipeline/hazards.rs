//! Data Hazard Resolution and Forwarding.
//!
//! Operand values are captured at Issue, which runs before Writeback in the
//! same cycle, so they can be stale by the time the instruction reaches
//! Execute. This module refreshes them. It provides:
//! 1. **Register-File Refresh:** Picks up values committed since Issue.
//! 2. **Writeback Bypass:** Takes the value of the instruction currently in
//!    Writeback, which has not reached the register file yet and is newer
//!    than anything the register file holds.

use tracing::debug;

use crate::common::RegisterFile;
use crate::common::error::Result;
use crate::isa::Instruction;

/// Where each forwarded operand came from, for statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardCounts {
    /// Operands replaced by a newer register-file value.
    pub from_regfile: u64,
    /// Operands taken from the instruction in Writeback.
    pub from_writeback: u64,
}

/// Returns `true` if `wb` will commit a value to register `loc`.
fn writes_to(wb: &Instruction, loc: usize) -> bool {
    wb.writes_register() && !wb.wb_cancelled && wb.rd == loc
}

/// Reads register `loc` as seen after the pending writeback commits.
///
/// # Arguments
///
/// * `loc` - Register index.
/// * `regs` - Current register file.
/// * `wb` - Instruction in the Writeback stage.
///
/// # Errors
///
/// `RegisterFault` on an invalid register index.
pub fn bypass_value(loc: usize, regs: &RegisterFile, wb: &Instruction) -> Result<i32> {
    if writes_to(wb, loc) {
        return Ok(wb.wb_value);
    }
    regs.read(loc)
}

/// Refreshes both operand values of `inst` before it executes.
///
/// For each operand location: if the register file now differs from the
/// captured value the register file wins; if the instruction in Writeback
/// targets the same location its value wins over both.
///
/// # Arguments
///
/// * `inst` - Instruction entering Execute; `rv1`/`rv2` are updated in place.
/// * `regs` - Current register file.
/// * `wb` - Instruction in the Writeback stage.
///
/// # Returns
///
/// How many operands were forwarded from each source.
///
/// # Errors
///
/// `RegisterFault` on an invalid source register index.
pub fn forward_operands(
    inst: &mut Instruction,
    regs: &RegisterFile,
    wb: &Instruction,
) -> Result<ForwardCounts> {
    let mut counts = ForwardCounts::default();
    let [src1, src2] = inst.sources();
    let pc = inst.fetch_location;

    for (slot, src) in [(&mut inst.rv1, src1), (&mut inst.rv2, src2)] {
        let Some(loc) = src else { continue };

        let current = regs.read(loc)?;
        if current != *slot {
            debug!(pc, reg = loc, stale = *slot, value = current, "forward from register file");
            *slot = current;
            counts.from_regfile += 1;
        }
        if writes_to(wb, loc) {
            debug!(pc, reg = loc, value = wb.wb_value, "forward from writeback");
            *slot = wb.wb_value;
            counts.from_writeback += 1;
        }
    }

    Ok(counts)
}
