//! Five-stage pipeline simulator library.
//!
//! This crate implements a cycle-stepped simulator of an in-order pipeline
//! for a compact 32-bit ISA with the following:
//! 1. **Core:** Fetch, Decode, Issue, Execute and Writeback stages, operand forwarding,
//!    static branch prediction with flush on misprediction, and the ALU, load/store
//!    and branch units.
//! 2. **Memory:** Word-addressable memory with bounds checking and a call stack.
//! 3. **ISA:** Opcode table, encoding, decoding and disassembly.
//! 4. **Simulation:** Assembler, loader, configuration, and statistics collection.

/// Common types and constants (register file, faults, machine limits).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Processor core (pipeline, architectural registers, execution units).
pub mod core;
/// Instruction set (opcodes, instruction layout, encode, decode, disassembly).
pub mod isa;
/// Assembler, program loader and run loop.
pub mod sim;
/// Simulated memory and call stack.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Crate-wide fault type and result alias.
pub use crate::common::{Result, SimError};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Top-level simulator and run outcome.
pub use crate::sim::{RunOutcome, Simulator};
