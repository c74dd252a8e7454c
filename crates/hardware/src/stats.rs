//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, move, branch).
//! 3. **Control flow:** Resolved branches, mispredictions, Decode redirects and flushes.
//! 4. **Data hazards:** Operands forwarded from the register file and from Writeback,
//!    and Issue stalls.

use std::fmt;
use std::time::Instant;

use crate::core::pipeline::hazards::ForwardCounts;
use crate::core::units::ExecUnit;
use crate::isa::{Instruction, Opcode};

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of non-NOP instructions that left Writeback.
    pub instructions_retired: u64,

    /// Count of ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of register move and immediate load instructions retired.
    pub inst_move: u64,
    /// Count of control-flow instructions retired.
    pub inst_branch: u64,

    /// Conditional branches resolved in Execute.
    pub branches_resolved: u64,
    /// Branches whose resolution disagreed with the prediction, including returns.
    pub branch_mispredictions: u64,
    /// Predicted-taken branches redirected at Decode.
    pub decode_redirects: u64,
    /// Cycles that ended in a flush of the pre-Execute stages.
    pub flushes: u64,

    /// Operands refreshed from the register file at Execute.
    pub forwarded_regfile: u64,
    /// Operands bypassed from the instruction in Writeback.
    pub forwarded_writeback: u64,
    /// Cycles in which Issue held an instruction back.
    pub issue_stalls: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_move: 0,
            inst_branch: 0,
            branches_resolved: 0,
            branch_mispredictions: 0,
            decode_redirects: 0,
            flushes: 0,
            forwarded_regfile: 0,
            forwarded_writeback: 0,
            issue_stalls: 0,
        }
    }
}

impl SimStats {
    /// Counts an instruction leaving Writeback. Bubbles are not counted.
    pub fn record_retire(&mut self, inst: &Instruction) {
        if inst.is_nop() {
            return;
        }
        self.instructions_retired += 1;
        match (inst.unit, inst.opcode) {
            (ExecUnit::Alu, _) => self.inst_alu += 1,
            (ExecUnit::LoadStore, Opcode::Ld) => self.inst_load += 1,
            (ExecUnit::LoadStore, Opcode::St) => self.inst_store += 1,
            (ExecUnit::LoadStore, _) => self.inst_move += 1,
            (ExecUnit::Branch, _) => self.inst_branch += 1,
        }
    }

    /// Adds one Execute-stage forwarding result.
    pub const fn record_forwarding(&mut self, counts: ForwardCounts) {
        self.forwarded_regfile += counts.from_regfile;
        self.forwarded_writeback += counts.from_writeback;
    }

    /// Cycles per retired instruction, or 0 before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for SimStats {
    /// Renders the sectioned report; [`SimStats::print`] sends it to stdout.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let resolved = self.branches_resolved.max(1) as f64;

        writeln!(f, "\n==========================================================")?;
        writeln!(f, "PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_ipc                  {:.4}", self.instructions_retired as f64 / cyc)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        for (name, count) in [
            ("alu", self.inst_alu),
            ("load", self.inst_load),
            ("store", self.inst_store),
            ("move", self.inst_move),
            ("branch", self.inst_branch),
        ] {
            writeln!(
                f,
                "  {name:<22} {count} ({:.2}%)",
                (count as f64 / instr) * 100.0
            )?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CONTROL FLOW")?;
        writeln!(f, "  branches.resolved      {}", self.branches_resolved)?;
        writeln!(
            f,
            "  branches.mispredicted  {} ({:.2}%)",
            self.branch_mispredictions,
            (self.branch_mispredictions as f64 / resolved) * 100.0
        )?;
        writeln!(f, "  decode.redirects       {}", self.decode_redirects)?;
        writeln!(f, "  pipeline.flushes       {}", self.flushes)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "DATA HAZARDS")?;
        writeln!(f, "  forward.regfile        {}", self.forwarded_regfile)?;
        writeln!(f, "  forward.writeback      {}", self.forwarded_writeback)?;
        writeln!(f, "  issue.stalls           {}", self.issue_stalls)?;
        writeln!(f, "==========================================================")
    }
}
