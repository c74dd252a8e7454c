//! Opcode Table.
//!
//! Defines the fixed opcode integers (bits 31-27), each opcode's instruction
//! type and the execution unit it is dispatched to.

use crate::core::units::ExecUnit;
use crate::isa::instruction::InstType;

/// Number of defined opcodes. Opcode fields at or above this value are illegal.
pub const INSTRUCTION_COUNT: usize = 27;

/// Operation selected by the 5-bit opcode field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// No operation; also the pipeline bubble.
    #[default]
    Nop = 0,
    /// `rd = rs1 + rs2`.
    Add = 1,
    /// `rd = rs1 - rs2`.
    Sub = 2,
    /// `rd = rs1 * rs2`.
    Mul = 3,
    /// `rd = rs1 / rs2`, truncating toward zero.
    Div = 4,
    /// `rd = rs1 & rs2`.
    And = 5,
    /// `rd = rs1 | rs2`.
    Or = 6,
    /// `rd = rs1 ^ rs2`.
    Xor = 7,
    /// `rd = !rs1`.
    Not = 8,
    /// `rd = rs1 << imm`.
    Shl = 9,
    /// `rd = rs1 >> imm`, logical.
    Shr = 10,
    /// `rd = rs1 >> imm`, arithmetic.
    Sar = 11,
    /// `rd = rs1 << rs2`.
    Shlv = 12,
    /// `rd = rs1 + imm`.
    Addi = 13,
    /// `rd = rs1 - imm`.
    Subi = 14,
    /// `rd = mem[rs1 + imm]`.
    Ld = 15,
    /// `mem[rd + imm] = rs1`.
    St = 16,
    /// `rd = imm`.
    Movi = 17,
    /// `rd = rs1`.
    Movr = 18,
    /// Unconditional PC-relative branch.
    Bu = 19,
    /// Branch-with-link: save registers and call.
    Bl = 20,
    /// Return from a branch-with-link.
    Ret = 21,
    /// Branch if equal.
    Beq = 22,
    /// Branch if not equal.
    Bne = 23,
    /// Branch if less than (signed).
    Blt = 24,
    /// Branch if greater than (signed).
    Bgt = 25,
    /// End of program: raise the halt supervisor call.
    Eop = 26,
}

/// Every opcode in encoding order.
pub const ALL_OPCODES: [Opcode; INSTRUCTION_COUNT] = [
    Opcode::Nop,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::And,
    Opcode::Or,
    Opcode::Xor,
    Opcode::Not,
    Opcode::Shl,
    Opcode::Shr,
    Opcode::Sar,
    Opcode::Shlv,
    Opcode::Addi,
    Opcode::Subi,
    Opcode::Ld,
    Opcode::St,
    Opcode::Movi,
    Opcode::Movr,
    Opcode::Bu,
    Opcode::Bl,
    Opcode::Ret,
    Opcode::Beq,
    Opcode::Bne,
    Opcode::Blt,
    Opcode::Bgt,
    Opcode::Eop,
];

impl Opcode {
    /// Looks up the opcode for a raw 5-bit field value.
    pub fn from_code(code: u32) -> Option<Self> {
        ALL_OPCODES.get(code as usize).copied()
    }

    /// Looks up an opcode by assembler mnemonic, case-insensitively.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        ALL_OPCODES
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    /// Raw opcode field value.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Sar => "SAR",
            Self::Shlv => "SHLV",
            Self::Addi => "ADDI",
            Self::Subi => "SUBI",
            Self::Ld => "LD",
            Self::St => "ST",
            Self::Movi => "MOVI",
            Self::Movr => "MOVR",
            Self::Bu => "BU",
            Self::Bl => "BL",
            Self::Ret => "RET",
            Self::Beq => "BEQ",
            Self::Bne => "BNE",
            Self::Blt => "BLT",
            Self::Bgt => "BGT",
            Self::Eop => "EOP",
        }
    }

    /// Encoding format of this opcode.
    pub const fn inst_type(self) -> InstType {
        match self {
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Div
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Shlv => InstType::Rrr,
            Self::Shl
            | Self::Shr
            | Self::Sar
            | Self::Addi
            | Self::Subi
            | Self::Ld
            | Self::St
            | Self::Beq
            | Self::Bne
            | Self::Blt
            | Self::Bgt => InstType::Rri,
            Self::Not | Self::Movr => InstType::Rr,
            Self::Movi => InstType::Ri,
            Self::Nop | Self::Bu | Self::Bl | Self::Ret | Self::Eop => InstType::I,
        }
    }

    /// Execution unit the opcode is dispatched to.
    pub const fn unit(self) -> ExecUnit {
        match self {
            Self::Ld | Self::St | Self::Movi | Self::Movr => ExecUnit::LoadStore,
            Self::Bu
            | Self::Bl
            | Self::Ret
            | Self::Beq
            | Self::Bne
            | Self::Blt
            | Self::Bgt
            | Self::Eop => ExecUnit::Branch,
            _ => ExecUnit::Alu,
        }
    }

    /// Whether this is a conditional branch.
    pub const fn is_conditional_branch(self) -> bool {
        matches!(self, Self::Beq | Self::Bne | Self::Blt | Self::Bgt)
    }

    /// Whether this is an unconditional control transfer (branch, call or return).
    pub const fn is_unconditional_branch(self) -> bool {
        matches!(self, Self::Bu | Self::Bl | Self::Ret)
    }
}
