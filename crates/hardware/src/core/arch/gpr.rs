//! General-Purpose Register File.
//!
//! This module implements the programmer-visible integer registers. It performs the following:
//! 1. **Storage:** Maintains 16 word registers (`R0`-`R15`).
//! 2. **Invariant Enforcement:** `R0` reads as zero and rejects writes.
//! 3. **Validation:** Out-of-range indices raise a `RegisterFault`.

use crate::common::constants::{GP_REGISTER_COUNT, RESERVED_REGISTER};
use crate::common::error::{Result, SimError};

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; GP_REGISTER_COUNT],
}

impl Gpr {
    /// Creates a register file with every register set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`.
    ///
    /// # Errors
    ///
    /// `RegisterFault` if `idx` is not a valid register index.
    pub fn read(&self, idx: usize) -> Result<i32> {
        Self::check_index(idx)?;
        Ok(if idx == RESERVED_REGISTER {
            0
        } else {
            self.regs[idx]
        })
    }

    /// Writes `val` into register `idx`.
    ///
    /// # Errors
    ///
    /// `RegisterFault` if `idx` is out of range or names the reserved register.
    pub fn write(&mut self, idx: usize, val: i32) -> Result<()> {
        Self::check_index(idx)?;
        if idx == RESERVED_REGISTER {
            return Err(SimError::register(
                format!("R{idx}"),
                "reserved register is not writable",
            ));
        }
        self.regs[idx] = val;
        Ok(())
    }

    /// Snapshot of all registers, `R0` included (always zero).
    pub const fn values(&self) -> [i32; GP_REGISTER_COUNT] {
        self.regs
    }

    fn check_index(idx: usize) -> Result<()> {
        if idx >= GP_REGISTER_COUNT {
            return Err(SimError::register(
                format!("R{idx}"),
                format!("index outside R0-R{}", GP_REGISTER_COUNT - 1),
            ));
        }
        Ok(())
    }
}
