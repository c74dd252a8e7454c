//! Instruction Encoder.
//!
//! The inverse of [`decode`](crate::isa::decode::decode): packs an
//! instruction's opcode and the fields its type uses into a 32-bit word.

use crate::common::error::{Result, SimError};
use crate::isa::instruction::{
    IMM_MASK, InstType, Instruction, OPCODE_SHIFT, REG_MASK, RD_SHIFT, RS1_SHIFT, RS2_SHIFT,
};

/// Encodes an instruction into its canonical word (unused bits zero).
///
/// # Errors
///
/// `DecodeFault` if a register field exceeds 4 bits or the immediate does
/// not fit in a signed 16-bit field.
///
/// # Examples
///
/// ```
/// use pipesim_core::isa::encode::encode;
/// use pipesim_core::isa::decode::decode;
/// use pipesim_core::isa::instruction::Instruction;
/// use pipesim_core::isa::opcodes::Opcode;
///
/// let inst = Instruction::new(Opcode::Addi, 4, 2, 0, -7);
/// let word = encode(&inst).unwrap();
/// assert_eq!(decode(word).unwrap(), inst);
/// ```
pub fn encode(inst: &Instruction) -> Result<u32> {
    let op = inst.opcode.code() << OPCODE_SHIFT;
    let word = match inst.opcode.inst_type() {
        InstType::Rrr => {
            op | reg(inst, inst.rd, RD_SHIFT)?
                | reg(inst, inst.rs1, RS1_SHIFT)?
                | reg(inst, inst.rs2, RS2_SHIFT)?
        }
        InstType::Rri => {
            op | reg(inst, inst.rd, RD_SHIFT)? | reg(inst, inst.rs1, RS1_SHIFT)? | imm(inst)?
        }
        InstType::Rr => op | reg(inst, inst.rd, RD_SHIFT)? | reg(inst, inst.rs1, RS1_SHIFT)?,
        InstType::Ri => op | reg(inst, inst.rd, RD_SHIFT)? | imm(inst)?,
        InstType::I => op | imm(inst)?,
    };
    Ok(word)
}

/// Encodes a sequence of instructions into a program image.
///
/// # Errors
///
/// The first encoding failure.
pub fn encode_program(program: &[Instruction]) -> Result<Vec<i32>> {
    program
        .iter()
        .map(|inst| encode(inst).map(|w| w as i32))
        .collect()
}

fn reg(inst: &Instruction, idx: usize, shift: u32) -> Result<u32> {
    if idx > REG_MASK as usize {
        return Err(SimError::decode(
            inst.opcode.code() << OPCODE_SHIFT,
            format!("{}: register R{idx} does not fit in 4 bits", inst.opcode.mnemonic()),
        ));
    }
    Ok((idx as u32) << shift)
}

fn imm(inst: &Instruction) -> Result<u32> {
    let narrow = i16::try_from(inst.imm).map_err(|_| {
        SimError::decode(
            inst.opcode.code() << OPCODE_SHIFT,
            format!(
                "{}: immediate {} outside signed 16-bit range",
                inst.opcode.mnemonic(),
                inst.imm
            ),
        )
    })?;
    Ok(u32::from(narrow as u16) & IMM_MASK)
}
