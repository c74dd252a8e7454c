//! System-wide constants.
//!
//! Register file geometry, memory limits and the supervisor-call protocol
//! shared by the pipeline, the units and the driver.

/// Number of general-purpose registers (`R0`-`R15`).
pub const GP_REGISTER_COUNT: usize = 16;

/// Index of the reserved, non-writable register.
pub const RESERVED_REGISTER: usize = 0;

/// Width in bits of the status register (Z and N flags).
pub const STATUS_WIDTH: u32 = 2;

/// Smallest memory size, in words, the simulator accepts.
pub const MIN_MEMORY_SIZE: usize = 64;

/// Supervisor-call value that requests a normal halt.
pub const SVC_HALT: i32 = 0x1;

/// Supervisor-call register contents while no call is pending.
pub const SVC_NONE: i32 = 0x0;
