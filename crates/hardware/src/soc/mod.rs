//! Memory system.
//!
//! The simulated machine's storage: the flat word memory and the call stack.

/// Word memory and call stack.
pub mod memory;

pub use memory::{CallStack, Memory};
