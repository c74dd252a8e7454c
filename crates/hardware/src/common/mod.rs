//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Register file geometry, memory limits and the supervisor-call protocol.
//! 2. **Error Handling:** The closed `SimError` fault enumeration and `Result` alias.
//! 3. **Register Management:** The `RegisterFile` owning GP, PC and special registers.

/// Common constants used throughout the simulator.
pub mod constants;

/// Fault types and the crate `Result` alias.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::{Result, SimError};
pub use reg::RegisterFile;
