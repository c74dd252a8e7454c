//! Status flags register.

use crate::common::constants::STATUS_WIDTH;
use crate::common::error::{Result, SimError};

/// Zero flag bit.
pub const FLAG_Z: u32 = 1 << 0;
/// Negative flag bit.
pub const FLAG_N: u32 = 1 << 1;

/// Condition flags set by committed ALU results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusFlags {
    bits: u32,
}

impl StatusFlags {
    /// Raw flag bits.
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Whether the last committed ALU result was zero.
    pub const fn zero(self) -> bool {
        self.bits & FLAG_Z != 0
    }

    /// Whether the last committed ALU result was negative.
    pub const fn negative(self) -> bool {
        self.bits & FLAG_N != 0
    }

    /// Flags describing `value`.
    pub const fn from_result(value: i32) -> Self {
        let mut bits = 0;
        if value == 0 {
            bits |= FLAG_Z;
        }
        if value < 0 {
            bits |= FLAG_N;
        }
        Self { bits }
    }

    /// Builds flags from raw bits.
    ///
    /// # Errors
    ///
    /// `RegisterFault` if `bits` does not fit in [`STATUS_WIDTH`] bits.
    pub fn from_bits(bits: u32) -> Result<Self> {
        if bits >> STATUS_WIDTH != 0 {
            return Err(SimError::register(
                "STATUS",
                format!("value {bits:#x} wider than {STATUS_WIDTH} bits"),
            ));
        }
        Ok(Self { bits })
    }
}
