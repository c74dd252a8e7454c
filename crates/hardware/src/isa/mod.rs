//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, the instruction word layout, and the decoder,
//! encoder and disassembler built on it.
//!
//! The ISA is a 32-bit word machine with sixteen registers, a 5-bit opcode
//! field and five encoding formats (RRR, RRI, RR, RI, I).

/// Instruction decoding for all formats.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding (inverse of decode).
pub mod encode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Opcode numbering, formats and unit assignment.
pub mod opcodes;

pub use instruction::{InstType, Instruction};
pub use opcodes::Opcode;
