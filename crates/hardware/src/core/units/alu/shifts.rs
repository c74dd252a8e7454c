//! ALU shift operations.
//!
//! Implements shift-left logical (immediate and variable amount),
//! shift-right logical and shift-right arithmetic on 32-bit words.
//!
//! Shift amounts are masked to 5 bits (0-31).

use crate::isa::Opcode;

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - The operation (must be a shift opcode).
/// * `a`  - The value to be shifted.
/// * `b`  - The shift amount; only the low 5 bits are used.
///
/// # Returns
///
/// The shifted word. Returns `0` for non-shift opcodes.
pub const fn execute(op: Opcode, a: i32, b: i32) -> i32 {
    let sh = b as u32 & SHAMT_MASK;
    match op {
        Opcode::Shl | Opcode::Shlv => a.wrapping_shl(sh),
        Opcode::Shr => (a as u32).wrapping_shr(sh) as i32,
        Opcode::Sar => a.wrapping_shr(sh),
        _ => 0,
    }
}
