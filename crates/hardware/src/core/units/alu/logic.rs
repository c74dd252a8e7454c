//! ALU bitwise operations.
//!
//! AND, OR, XOR and NOT over the full 32-bit word.

use crate::isa::Opcode;

/// Executes a bitwise operation. `b` is ignored by `NOT`.
///
/// Returns `0` for non-logic opcodes.
pub const fn execute(op: Opcode, a: i32, b: i32) -> i32 {
    match op {
        Opcode::And => a & b,
        Opcode::Or => a | b,
        Opcode::Xor => a ^ b,
        Opcode::Not => !a,
        _ => 0,
    }
}
