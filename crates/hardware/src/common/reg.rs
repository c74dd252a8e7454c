//! Register File.
//!
//! This module provides the `RegisterFile` struct, the single owner of every
//! architectural and staging register. It provides:
//! 1. **GP Registers:** `R0`-`R15`, with `R0` reserved and read-only.
//! 2. **Program Counter Views:** Committed, shadow-incremented and branch-target
//!    values, reconciled once per cycle.
//! 3. **Special Registers:** Link, MAR/MDR, status flags, instruction register,
//!    supervisor-call register and the cycle counter.
//! 4. **Observability:** A hex and signed-decimal dump for fault reports.

use std::fmt;

use crate::common::constants::{GP_REGISTER_COUNT, SVC_NONE};
use crate::common::error::{Result, SimError};
use crate::core::arch::{Gpr, StatusFlags};
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::INSTRUCTION_COUNT;

/// Register file shared by all pipeline stages through the simulation context.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    gpr: Gpr,
    /// Committed program counter: the address Fetch reads next.
    pub pc: i32,
    /// Shadow-incremented PC, written by Fetch and redirected by Decode.
    pub pc_next: i32,
    /// Branch-target PC, written when Execute resolves a taken branch.
    pub pc_branch: i32,
    /// Link register holding the return address of the innermost call.
    pub lr: i32,
    /// Memory address register of the last load/store.
    pub mar: i32,
    /// Memory data register of the last load/store.
    pub mdr: i32,
    /// Elapsed clock cycles.
    pub cycles: u64,
    status: StatusFlags,
    ir: u32,
    svc: i32,
}

impl RegisterFile {
    /// Creates a register file with every register zeroed.
    pub fn new() -> Self {
        Self {
            svc: SVC_NONE,
            ..Self::default()
        }
    }

    /// Reads general-purpose register `idx`.
    ///
    /// # Errors
    ///
    /// `RegisterFault` on an invalid index.
    pub fn read(&self, idx: usize) -> Result<i32> {
        self.gpr.read(idx)
    }

    /// Writes general-purpose register `idx`.
    ///
    /// # Errors
    ///
    /// `RegisterFault` on an invalid index or the reserved register.
    pub fn write(&mut self, idx: usize, val: i32) -> Result<()> {
        self.gpr.write(idx, val)
    }

    /// Snapshot of all general-purpose registers.
    pub const fn gp_values(&self) -> [i32; GP_REGISTER_COUNT] {
        self.gpr.values()
    }

    /// Current status flags.
    pub const fn status(&self) -> StatusFlags {
        self.status
    }

    /// Writes the status register from raw bits.
    ///
    /// # Errors
    ///
    /// `RegisterFault` if `bits` is wider than the status register.
    pub fn write_status(&mut self, bits: u32) -> Result<()> {
        self.status = StatusFlags::from_bits(bits)?;
        Ok(())
    }

    /// Sets the flags from a committed ALU result.
    pub const fn set_flags_from(&mut self, value: i32) {
        self.status = StatusFlags::from_result(value);
    }

    /// Current instruction register contents.
    pub const fn ir(&self) -> u32 {
        self.ir
    }

    /// Loads a fetched word into the instruction register.
    ///
    /// # Errors
    ///
    /// `RegisterFault` if the word's opcode field names no known instruction.
    pub fn write_ir(&mut self, word: u32) -> Result<()> {
        let opcode = word.opcode();
        if opcode as usize >= INSTRUCTION_COUNT {
            return Err(SimError::register(
                "IR",
                format!(
                    "opcode {opcode} in word {word:#010x} exceeds instruction count {INSTRUCTION_COUNT}"
                ),
            ));
        }
        self.ir = word;
        Ok(())
    }

    /// Supervisor-call register contents.
    pub const fn svc(&self) -> i32 {
        self.svc
    }

    /// Writes the supervisor-call register.
    pub const fn write_svc(&mut self, val: i32) {
        self.svc = val;
    }

    /// Folds the PC views into the committed PC at the end of a cycle.
    pub const fn reconcile_pc(&mut self, branch_taken: bool) {
        self.pc = if branch_taken {
            self.pc_branch
        } else {
            self.pc_next
        };
    }
}

impl fmt::Display for RegisterFile {
    /// Formats every register as hex with its two's-complement decimal value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regs = self.gpr.values();
        for pair in (0..GP_REGISTER_COUNT).step_by(2) {
            writeln!(
                f,
                "R{:<2} = {:#010x} ({:>11})    R{:<2} = {:#010x} ({:>11})",
                pair,
                regs[pair],
                regs[pair],
                pair + 1,
                regs[pair + 1],
                regs[pair + 1]
            )?;
        }
        writeln!(f, "PC  = {:#010x} ({:>11})", self.pc, self.pc)?;
        writeln!(f, "NPC = {:#010x} ({:>11})", self.pc_next, self.pc_next)?;
        writeln!(f, "BPC = {:#010x} ({:>11})", self.pc_branch, self.pc_branch)?;
        writeln!(f, "LR  = {:#010x} ({:>11})", self.lr, self.lr)?;
        writeln!(f, "MAR = {:#010x} ({:>11})", self.mar, self.mar)?;
        writeln!(f, "MDR = {:#010x} ({:>11})", self.mdr, self.mdr)?;
        writeln!(f, "IR  = {:#010x}", self.ir)?;
        writeln!(
            f,
            "SR  = {:#04b} (Z={} N={})",
            self.status.bits(),
            u8::from(self.status.zero()),
            u8::from(self.status.negative())
        )?;
        writeln!(f, "SVC = {:#010x} ({:>11})", self.svc, self.svc)?;
        write!(f, "CYC = {}", self.cycles)
    }
}
