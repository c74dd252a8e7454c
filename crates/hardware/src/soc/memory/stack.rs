//! Call Stack.
//!
//! LIFO region holding the registers saved by branch-with-link. It is kept
//! apart from the word store so program data can never alias saved state.

use crate::common::error::{Result, SimError};

/// Bounded LIFO stack of saved words.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    entries: Vec<i32>,
    capacity: usize,
}

impl CallStack {
    /// Creates an empty stack holding at most `capacity` words.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Pushes `val`.
    ///
    /// # Errors
    ///
    /// `MemoryFault` when the stack is full.
    pub fn push(&mut self, val: i32) -> Result<()> {
        if self.entries.len() >= self.capacity {
            return Err(SimError::memory(
                self.entries.len() as i64,
                format!("call stack overflow (capacity {})", self.capacity),
            ));
        }
        self.entries.push(val);
        Ok(())
    }

    /// Pops the most recently pushed word.
    ///
    /// # Errors
    ///
    /// `MemoryFault` when the stack is empty.
    pub fn pop(&mut self) -> Result<i32> {
        self.entries
            .pop()
            .ok_or_else(|| SimError::memory(-1, "call stack underflow"))
    }

    /// Number of words currently saved.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of words.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
