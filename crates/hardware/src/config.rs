//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline machine constants (memory size, stack depth, cycle budget).
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline settings.
//! 3. **Loading:** JSON parsing and validation.
//!
//! Configuration is supplied as JSON (every field optional), or use
//! `Config::default()` for the stock machine.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::MIN_MEMORY_SIZE;
use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden
/// in a JSON configuration.
mod defaults {
    /// Main memory size in words.
    pub const MEMORY_SIZE: usize = 1024;

    /// Call stack capacity in words.
    ///
    /// A call pushes sixteen words (R1-R15 and the link register), so this
    /// allows 64 nested calls.
    pub const STACK_DEPTH: usize = 1024;

    /// Cycle budget before a run is stopped.
    pub const MAX_CYCLES: u64 = 1_000_000;

    /// Instructions Issue may move to the executable queue per cycle.
    pub const ISSUE_WIDTH: usize = 1;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
///
/// let json = r#"{
///     "general": { "verbose": true, "max_cycles": 500 },
///     "memory": { "size": 256 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.verbose);
/// assert_eq!(config.general.max_cycles, 500);
/// assert_eq!(config.memory.size, 256);
/// assert_eq!(config.pipeline.issue_width, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Main memory configuration
    pub memory: MemoryConfig,
    /// Pipeline configuration
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// `Config` if the JSON is malformed, has unknown keys, or fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`from_json`](Self::from_json).
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// `Config` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.memory.size < MIN_MEMORY_SIZE {
            return Err(SimError::Config(format!(
                "memory.size {} is below the minimum of {MIN_MEMORY_SIZE} words",
                self.memory.size
            )));
        }
        if self.memory.size > i32::MAX as usize {
            return Err(SimError::Config(format!(
                "memory.size {} is not addressable by a 32-bit word",
                self.memory.size
            )));
        }
        if self.pipeline.issue_width == 0 {
            return Err(SimError::Config("pipeline.issue_width must be at least 1".into()));
        }
        if self.general.max_cycles == 0 {
            return Err(SimError::Config("general.max_cycles must be at least 1".into()));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Per-stage pipeline trace and assembler token logging
    pub verbose: bool,

    /// Stop the run after this many cycles
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Memory size in words
    pub size: usize,

    /// Call stack capacity in words
    pub stack_depth: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            stack_depth: defaults::STACK_DEPTH,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Issue bus width
    pub issue_width: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            issue_width: defaults::ISSUE_WIDTH,
        }
    }
}
