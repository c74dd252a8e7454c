//! Simulation fault definitions.
//!
//! This module defines the closed set of faults a run can raise. It provides:
//! 1. **Fault Kinds:** Memory, register, decode, parse and arithmetic faults.
//! 2. **Context:** Each fault carries the offending address, register, word or line.
//! 3. **Propagation:** A crate-wide `Result` alias so stages return faults with `?`.
//!
//! Every fault is fatal to the current run. Nothing below the top-level driver
//! catches them; the driver dumps machine state and exits non-zero.

use std::io;

use thiserror::Error;

/// Crate-wide result type carrying a [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Fault raised by the simulated machine, the assembler or the loader.
#[derive(Debug, Error)]
pub enum SimError {
    /// Address outside `[0, size)` on read, write, image load or call-stack access.
    #[error("MemoryFault at {addr:#x} ({addr}): {reason}")]
    MemoryFault {
        /// The offending word address.
        addr: i64,
        /// What was being attempted.
        reason: String,
    },

    /// Invalid register index, write to the reserved register, or malformed
    /// special-register value.
    #[error("RegisterFault on {reg}: {reason}")]
    RegisterFault {
        /// Name of the offending register (`R17`, `STATUS`, `IR`, ...).
        reg: String,
        /// What was being attempted.
        reason: String,
    },

    /// Opcode or field pattern that the ISA does not define.
    #[error("DecodeFault on word {word:#010x}: {reason}")]
    DecodeFault {
        /// The raw instruction word (or the word being encoded).
        word: u32,
        /// Which field failed.
        reason: String,
    },

    /// Assembler input error: unknown mnemonic or malformed token.
    #[error("ParseFault at line {line}, token `{token}`: {reason}")]
    ParseFault {
        /// One-based source line number.
        line: usize,
        /// The token that could not be parsed.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Arithmetic with no defined result (integer division by zero).
    #[error("ArithmeticFault: {mnemonic} by zero at pc {pc:#x}")]
    ArithmeticFault {
        /// Mnemonic of the faulting instruction.
        mnemonic: &'static str,
        /// Fetch location of the faulting instruction.
        pc: i32,
    },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Host I/O failure while reading or writing program files.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl SimError {
    /// Builds a [`SimError::MemoryFault`].
    pub fn memory(addr: impl Into<i64>, reason: impl Into<String>) -> Self {
        Self::MemoryFault {
            addr: addr.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`SimError::RegisterFault`].
    pub fn register(reg: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RegisterFault {
            reg: reg.into(),
            reason: reason.into(),
        }
    }

    /// Builds a [`SimError::DecodeFault`].
    pub fn decode(word: u32, reason: impl Into<String>) -> Self {
        Self::DecodeFault {
            word,
            reason: reason.into(),
        }
    }

    /// Builds a [`SimError::ParseFault`].
    pub fn parse(line: usize, token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseFault {
            line,
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Short name of the fault kind, used in the driver's fault banner.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MemoryFault { .. } => "MemoryFault",
            Self::RegisterFault { .. } => "RegisterFault",
            Self::DecodeFault { .. } => "DecodeFault",
            Self::ParseFault { .. } => "ParseFault",
            Self::ArithmeticFault { .. } => "ArithmeticFault",
            Self::Config(_) => "ConfigError",
            Self::Io { .. } => "IoError",
        }
    }
}
