//! Instruction Disassembler.
//!
//! Renders instructions in assembler syntax for trace output, fault reports
//! and test diagnostics. The output parses back through the assembler.

use std::fmt;

use crate::isa::decode::decode;
use crate::isa::instruction::{InstType, Instruction};
use crate::isa::opcodes::Opcode;

/// Disassembles a raw word, or returns `"unknown"` for an illegal opcode.
pub fn disassemble(word: u32) -> String {
    decode(word).map_or_else(|_| "unknown".to_string(), |inst| inst.to_string())
}

fn imm(f: &mut fmt::Formatter<'_>, value: i32) -> fmt::Result {
    if value < 0 {
        write!(f, "-{:#x}", value.unsigned_abs())
    } else {
        write!(f, "{value:#x}")
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.opcode.mnemonic();
        match self.kind {
            InstType::Rrr => write!(f, "{m} R{} R{} R{}", self.rd, self.rs1, self.rs2),
            InstType::Rri => {
                write!(f, "{m} R{} R{} ", self.rd, self.rs1)?;
                imm(f, self.imm)
            }
            InstType::Rr => write!(f, "{m} R{} R{}", self.rd, self.rs1),
            InstType::Ri => {
                write!(f, "{m} R{} ", self.rd)?;
                imm(f, self.imm)
            }
            // Operand-less forms print bare; the assembler defaults their immediate to 0.
            InstType::I
                if self.imm == 0
                    && matches!(self.opcode, Opcode::Nop | Opcode::Ret | Opcode::Eop) =>
            {
                write!(f, "{m}")
            }
            InstType::I => {
                write!(f, "{m} ")?;
                imm(f, self.imm)
            }
        }
    }
}
