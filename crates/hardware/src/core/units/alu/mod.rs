//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage.
//! It is a pure function of the opcode and two operands producing a
//! 32-bit writeback value; it has no side effects.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div (and the immediate forms)
//! - [`logic`]:      And, Or, Xor, Not
//! - [`shifts`]:     Shl, Shr, Sar, Shlv

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor, not).
pub mod logic;

/// Shift operations (shl, shr, sar, shlv).
pub mod shifts;

use crate::common::error::{Result, SimError};
use crate::isa::{InstType, Instruction, Opcode};

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand.
    /// * `b`  - Second operand, or the immediate for RRI forms.
    ///
    /// # Returns
    ///
    /// The 32-bit result, or `None` when the result is undefined
    /// (division by zero). Non-ALU opcodes yield `Some(0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, i32::MAX, 1), Some(i32::MIN));
    /// assert_eq!(Alu::execute(Opcode::Xor, 0b1010, 0b0110), Some(0b1100));
    /// assert_eq!(Alu::execute(Opcode::Shr, -1, 28), Some(0xF));
    /// assert_eq!(Alu::execute(Opcode::Div, 7, 0), None);
    /// ```
    pub fn execute(op: Opcode, a: i32, b: i32) -> Option<i32> {
        match op {
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Addi
            | Opcode::Subi => arithmetic::execute(op, a, b),

            Opcode::And | Opcode::Or | Opcode::Xor | Opcode::Not => {
                Some(logic::execute(op, a, b))
            }

            Opcode::Shl | Opcode::Shr | Opcode::Sar | Opcode::Shlv => {
                Some(shifts::execute(op, a, b))
            }

            // NOP and non-ALU opcodes.
            _ => Some(0),
        }
    }

    /// Runs an issued instruction through the ALU.
    ///
    /// RRI forms take the immediate as the second operand.
    ///
    /// # Errors
    ///
    /// `ArithmeticFault` on division by zero.
    pub fn run(inst: &Instruction) -> Result<i32> {
        let b = if inst.kind == InstType::Rri {
            inst.imm
        } else {
            inst.rv2
        };
        Self::execute(inst.opcode, inst.rv1, b).ok_or(SimError::ArithmeticFault {
            mnemonic: inst.opcode.mnemonic(),
            pc: inst.fetch_location,
        })
    }
}
