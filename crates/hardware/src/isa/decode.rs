//! Instruction Decoder.
//!
//! Decodes 32-bit instruction words into structured `Instruction` records.
//! The opcode is extracted first; its type then selects which of the
//! remaining fields are meaningful. Fields a type does not use are left at
//! zero so that decoding is the exact inverse of encoding.

use crate::common::error::{Result, SimError};
use crate::isa::instruction::{InstType, Instruction, InstructionBits};
use crate::isa::opcodes::{INSTRUCTION_COUNT, Opcode};

/// Decodes a raw instruction word.
///
/// # Arguments
///
/// * `word` - The 32-bit encoded instruction.
///
/// # Returns
///
/// A structurally complete `Instruction` (no operand values resolved).
///
/// # Errors
///
/// `DecodeFault` if the opcode field names no defined instruction.
///
/// # Examples
///
/// ```
/// use pipesim_core::isa::decode::decode;
/// use pipesim_core::isa::opcodes::Opcode;
///
/// // ADD R3, R1, R2
/// let word = (1 << 27) | (3 << 23) | (1 << 19) | (2 << 15);
/// let inst = decode(word).unwrap();
/// assert_eq!(inst.opcode, Opcode::Add);
/// assert_eq!((inst.rd, inst.rs1, inst.rs2), (3, 1, 2));
/// ```
pub fn decode(word: u32) -> Result<Instruction> {
    let code = word.opcode();
    let opcode = Opcode::from_code(code).ok_or_else(|| {
        SimError::decode(
            word,
            format!("opcode {code} is not one of the {INSTRUCTION_COUNT} defined instructions"),
        )
    })?;

    let inst = match opcode.inst_type() {
        InstType::Rrr => Instruction::new(opcode, word.rd(), word.rs1(), word.rs2(), 0),
        InstType::Rri => Instruction::new(opcode, word.rd(), word.rs1(), 0, word.imm()),
        InstType::Rr => Instruction::new(opcode, word.rd(), word.rs1(), 0, 0),
        InstType::Ri => Instruction::new(opcode, word.rd(), 0, 0, word.imm()),
        InstType::I => Instruction::new(opcode, 0, 0, 0, word.imm()),
    };
    Ok(inst)
}

/// Decodes a word fetched from `location`, recording the fetch address.
///
/// # Errors
///
/// `DecodeFault` if the opcode field names no defined instruction.
pub fn decode_at(word: u32, location: i32) -> Result<Instruction> {
    let mut inst = decode(word)?;
    inst.fetch_location = location;
    Ok(inst)
}
