//! Main Memory.
//!
//! This module models the simulated processor's storage. It provides:
//! 1. **Word Store:** A flat, word-addressable array of fixed size.
//! 2. **Bounds Checking:** Every access validates the address against `[0, size)`.
//! 3. **Call Stack:** A separate LIFO region used by call/return linkage.
//! 4. **Image Loading:** Placement of a program image starting at address 0.

/// Call stack used by branch-with-link and return.
pub mod stack;

use std::fmt;

use crate::common::constants::MIN_MEMORY_SIZE;
use crate::common::error::{Result, SimError};

pub use stack::CallStack;

/// Flat word-addressable memory plus the call stack.
#[derive(Clone, Debug)]
pub struct Memory {
    words: Vec<i32>,
    /// Call/return linkage stack.
    pub stack: CallStack,
}

impl Memory {
    /// Creates a zero-filled memory of `size` words and a call stack of `stack_depth` entries.
    ///
    /// # Errors
    ///
    /// `MemoryFault` if `size` is below [`MIN_MEMORY_SIZE`].
    pub fn new(size: usize, stack_depth: usize) -> Result<Self> {
        if size < MIN_MEMORY_SIZE {
            return Err(SimError::memory(
                size as i64,
                format!("memory size below the minimum of {MIN_MEMORY_SIZE} words"),
            ));
        }
        Ok(Self {
            words: vec![0; size],
            stack: CallStack::new(stack_depth),
        })
    }

    /// Number of addressable words.
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Reads the word at `addr`.
    ///
    /// # Errors
    ///
    /// `MemoryFault` if `addr` is outside `[0, size)`.
    pub fn read(&self, addr: i32) -> Result<i32> {
        let idx = self.index(addr, "read")?;
        Ok(self.words[idx])
    }

    /// Writes `val` at `addr`.
    ///
    /// # Errors
    ///
    /// `MemoryFault` if `addr` is outside `[0, size)`.
    pub fn write(&mut self, addr: i32, val: i32) -> Result<()> {
        let idx = self.index(addr, "write")?;
        self.words[idx] = val;
        Ok(())
    }

    /// Copies a program image into memory starting at address 0.
    ///
    /// # Errors
    ///
    /// `MemoryFault` if the image does not fit; memory is left untouched.
    pub fn load_image(&mut self, image: &[i32]) -> Result<()> {
        if image.len() > self.words.len() {
            return Err(SimError::memory(
                self.words.len() as i64,
                format!(
                    "program image of {} words exceeds memory size {}",
                    image.len(),
                    self.words.len()
                ),
            ));
        }
        self.words[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// All memory words, for dumps and tests.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    fn index(&self, addr: i32, op: &str) -> Result<usize> {
        usize::try_from(addr)
            .ok()
            .filter(|&idx| idx < self.words.len())
            .ok_or_else(|| {
                SimError::memory(
                    addr,
                    format!("{op} outside [0, {:#x})", self.words.len()),
                )
            })
    }
}

impl fmt::Display for Memory {
    /// Dumps memory four words per row; runs of all-zero rows collapse to `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut skipping = false;
        for (row, chunk) in self.words.chunks(4).enumerate() {
            if chunk.iter().all(|&w| w == 0) {
                if !skipping {
                    writeln!(f, "*")?;
                    skipping = true;
                }
                continue;
            }
            skipping = false;
            write!(f, "{:#06x}:", row * 4)?;
            for word in chunk {
                write!(f, "  {word:#010x} ({word:>11})")?;
            }
            writeln!(f)?;
        }
        write!(f, "stack depth {}/{}", self.stack.len(), self.stack.capacity())
    }
}
