//! ALU arithmetic operations.
//!
//! Implements addition, subtraction, multiplication and division on 32-bit
//! two's-complement words. Add, subtract and multiply wrap on overflow.
//! Division truncates toward zero; `i32::MIN / -1` wraps to `i32::MIN`.

use crate::isa::Opcode;

/// Executes an arithmetic operation.
///
/// # Arguments
///
/// * `op` - The operation (must be an arithmetic opcode).
/// * `a`  - First operand.
/// * `b`  - Second operand (register value or immediate).
///
/// # Returns
///
/// The wrapped result, `None` for division by zero, and `Some(0)` for
/// non-arithmetic opcodes.
pub fn execute(op: Opcode, a: i32, b: i32) -> Option<i32> {
    match op {
        Opcode::Add | Opcode::Addi => Some(a.wrapping_add(b)),
        Opcode::Sub | Opcode::Subi => Some(a.wrapping_sub(b)),
        Opcode::Mul => Some(a.wrapping_mul(b)),
        Opcode::Div => {
            if b == 0 {
                None
            } else {
                Some(a.wrapping_div(b))
            }
        }
        _ => Some(0),
    }
}
