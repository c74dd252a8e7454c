//! Instruction encoding structures and bit extraction utilities.
//!
//! Provides the field layout of a 32-bit instruction word, a trait for
//! extracting raw fields, and the `Instruction` record that carries one
//! instruction through the pipeline.
//!
//! Layout (MSB first, opcode always in bits 31-27):
//!
//! | Type | Fields |
//! |------|--------|
//! | RRR  | `opcode[31:27] rd[26:23] rs1[22:19] rs2[18:15]` |
//! | RRI  | `opcode[31:27] rd[26:23] rs1[22:19] imm[15:0]` |
//! | RR   | `opcode[31:27] rd[26:23] rs1[22:19]` |
//! | RI   | `opcode[31:27] rd[26:23] imm[15:0]` |
//! | I    | `opcode[31:27] imm[15:0]` |

use crate::core::pipeline::latches::FetchFault;
use crate::core::units::ExecUnit;
use crate::isa::opcodes::Opcode;

/// Bit shift of the opcode field.
pub const OPCODE_SHIFT: u32 = 27;
/// Mask of the opcode field after shifting (5 bits).
pub const OPCODE_MASK: u32 = 0x1F;
/// Bit shift of the destination register field.
pub const RD_SHIFT: u32 = 23;
/// Bit shift of the first source register field.
pub const RS1_SHIFT: u32 = 19;
/// Bit shift of the second source register field.
pub const RS2_SHIFT: u32 = 15;
/// Mask of a register field after shifting (4 bits).
pub const REG_MASK: u32 = 0xF;
/// Mask of the immediate field (16 bits, bits 15-0).
pub const IMM_MASK: u32 = 0xFFFF;

/// Instruction encoding format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstType {
    /// Register, register, register.
    Rrr,
    /// Register, register, 16-bit immediate.
    Rri,
    /// Register, register.
    Rr,
    /// Register, 16-bit immediate.
    Ri,
    /// 16-bit immediate only.
    #[default]
    I,
}

/// Trait for extracting instruction fields from encoded words.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 31-27).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 26-23).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 22-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 18-15).
    fn rs2(&self) -> usize;

    /// Extracts the 16-bit immediate (bits 15-0), sign-extended to 32 bits.
    fn imm(&self) -> i32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> RS1_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> RS2_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn imm(&self) -> i32 {
        i32::from((self & IMM_MASK) as u16 as i16)
    }
}

/// One instruction in flight.
///
/// Created by Decode with its structural fields, given operand values by
/// Issue, a writeback value by Execute, and committed by Writeback. The
/// `Default` value is the NOP bubble that flushed stages are reset to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Encoding format.
    pub kind: InstType,
    /// Destination register field.
    pub rd: usize,
    /// First source register field.
    pub rs1: usize,
    /// Second source register field.
    pub rs2: usize,
    /// Sign-extended immediate.
    pub imm: i32,
    /// Operand 1 value, captured at Issue and refreshed by forwarding.
    pub rv1: i32,
    /// Operand 2 value, captured at Issue and refreshed by forwarding.
    pub rv2: i32,
    /// Value produced by Execute for Writeback.
    pub wb_value: i32,
    /// Address the instruction was fetched from.
    pub fetch_location: i32,
    /// Branch predictor's guess, made at Decode.
    pub pred_taken: bool,
    /// Set while Issue holds the instruction back on a dependency.
    pub dependent: bool,
    /// Execution unit the instruction is dispatched to.
    pub unit: ExecUnit,
    /// Writeback must not touch the register file (superseded by a return).
    pub wb_cancelled: bool,
    /// Fetch could not deliver this instruction; Execute raises the fault.
    pub fetch_fault: Option<FetchFault>,
}

impl Instruction {
    /// Builds an instruction with its structural fields; values start at zero.
    pub fn new(opcode: Opcode, rd: usize, rs1: usize, rs2: usize, imm: i32) -> Self {
        Self {
            opcode,
            kind: opcode.inst_type(),
            rd,
            rs1,
            rs2,
            imm,
            unit: opcode.unit(),
            ..Self::default()
        }
    }

    /// Whether this is a NOP (including a pipeline bubble).
    pub fn is_nop(&self) -> bool {
        self.opcode == Opcode::Nop
    }

    /// Whether Issue can drop this entry: a NOP that carries no fetch fault.
    pub fn is_bubble(&self) -> bool {
        self.is_nop() && self.fetch_fault.is_none()
    }

    /// Register locations feeding operand 1 and operand 2.
    ///
    /// Conditional branches compare the `rd` and `rs1` fields; stores take the
    /// value from `rs1` and the address base from `rd`.
    pub fn sources(&self) -> [Option<usize>; 2] {
        match self.kind {
            InstType::Rrr => [Some(self.rs1), Some(self.rs2)],
            InstType::Rri if self.opcode.is_conditional_branch() => {
                [Some(self.rd), Some(self.rs1)]
            }
            InstType::Rri if self.opcode == Opcode::St => [Some(self.rs1), Some(self.rd)],
            InstType::Rri | InstType::Rr => [Some(self.rs1), None],
            InstType::Ri | InstType::I => [None, None],
        }
    }

    /// Whether Writeback commits `wb_value` into `rd`.
    pub fn writes_register(&self) -> bool {
        match self.unit {
            ExecUnit::Alu => !self.is_nop(),
            ExecUnit::LoadStore => self.opcode != Opcode::St,
            ExecUnit::Branch => false,
        }
    }

    /// Target of a PC-relative control transfer.
    pub const fn relative_target(&self) -> i32 {
        self.fetch_location.wrapping_add(self.imm)
    }

    /// Address of the next sequential instruction.
    pub const fn fall_through(&self) -> i32 {
        self.fetch_location.wrapping_add(1)
    }
}
