//! Architectural state components.
//!
//! Register storage with the invariants the ISA guarantees to programs.

/// General-purpose integer registers.
pub mod gpr;

/// Status flags register.
pub mod status;

pub use gpr::Gpr;
pub use status::StatusFlags;
