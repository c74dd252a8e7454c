//! Pipeline latch structures for inter-stage communication.
//!
//! Stages run in program order (Fetch first) within a cycle, so each stage
//! reads the latch committed at the end of the previous cycle and writes the
//! next one. The driver swaps them once every stage has run.
//!
//! 1. **IF/ID:** Raw word and fetch location, or the fault Fetch hit.
//! 2. **ID/IS:** Decoded instruction with its prediction.
//! 3. **Executable Queue:** Issued instructions waiting for Execute.
//! 4. **EX/WB:** Executed instruction with its writeback value; also the
//!    source of the Writeback-stage bypass.

use std::collections::VecDeque;

use crate::common::error::Result;
use crate::core::pipeline::context::SimContext;
use crate::isa::Instruction;

/// A fault hit by Fetch, held back until its entry reaches Execute.
///
/// Fetch runs ahead on the predicted path, so the entry may yet be flushed
/// or stranded behind an EOP. Only an entry that reaches Execute faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchFault {
    /// The fetch address was outside memory.
    OutOfRange,
    /// The word's opcode field exceeds the instruction count.
    IllegalOpcode {
        /// The rejected word.
        word: u32,
    },
}

impl FetchFault {
    /// Raises the fault for an entry fetched from `location`.
    ///
    /// Replays the access through the same checked accessor Fetch used, so
    /// the fault carries the same address and reason.
    ///
    /// # Errors
    ///
    /// `MemoryFault` for [`OutOfRange`](Self::OutOfRange), `RegisterFault`
    /// on `IR` for [`IllegalOpcode`](Self::IllegalOpcode).
    pub fn raise(self, ctx: &mut SimContext, location: i32) -> Result<()> {
        match self {
            Self::OutOfRange => ctx.mem.read(location).map(drop),
            Self::IllegalOpcode { word } => ctx.regs.write_ir(word),
        }
    }
}

/// Entry in the IF/ID latch.
///
/// The default entry is word 0, which decodes to NOP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchedWord {
    /// 32-bit instruction encoding.
    pub word: u32,
    /// Address the word was fetched from.
    pub location: i32,
    /// Set when the word could not be fetched.
    pub fault: Option<FetchFault>,
}

impl FetchedWord {
    /// A successfully fetched word.
    pub const fn new(word: u32, location: i32) -> Self {
        Self {
            word,
            location,
            fault: None,
        }
    }

    /// A poisoned entry standing in for a word Fetch could not deliver.
    pub const fn poisoned(location: i32, fault: FetchFault) -> Self {
        Self {
            word: 0,
            location,
            fault: Some(fault),
        }
    }
}

/// Latches written by the stages in one cycle.
#[derive(Clone, Debug, Default)]
pub struct Latches {
    /// Fetch to Decode.
    pub if_id: FetchedWord,
    /// Decode to Issue.
    pub id_is: Instruction,
    /// Execute to Writeback.
    pub ex_wb: Instruction,
}

/// Queue between Issue and Execute.
///
/// Instructions issued this cycle land in `incoming` and only become
/// visible to Execute after [`commit`](Self::commit) at the end of the cycle.
#[derive(Clone, Debug, Default)]
pub struct ExecQueue {
    ready: VecDeque<Instruction>,
    incoming: Vec<Instruction>,
}

impl ExecQueue {
    /// Stages an issued instruction for the next cycle.
    pub fn push(&mut self, inst: Instruction) {
        self.incoming.push(inst);
    }

    /// Removes the oldest instruction visible to Execute.
    pub fn pop(&mut self) -> Option<Instruction> {
        self.ready.pop_front()
    }

    /// Makes this cycle's issued instructions visible to Execute.
    pub fn commit(&mut self) {
        self.ready.extend(self.incoming.drain(..));
    }

    /// Drops everything, staged or visible.
    pub fn clear(&mut self) {
        self.ready.clear();
        self.incoming.clear();
    }

    /// Number of instructions, staged or visible.
    pub fn len(&self) -> usize {
        self.ready.len() + self.incoming.len()
    }

    /// Whether the queue holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Instructions visible to Execute, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.ready.iter().chain(self.incoming.iter())
    }
}
