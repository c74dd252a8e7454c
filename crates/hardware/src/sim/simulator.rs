//! Simulator: owns the simulation context and the pipeline side-by-side.
//!
//! Keeping the two apart lets every stage borrow the context mutably while
//! the pipeline borrows its own latches, with no shared ownership.

use tracing::{info, warn};

use crate::common::RegisterFile;
use crate::common::constants::SVC_HALT;
use crate::common::error::Result;
use crate::config::Config;
use crate::core::pipeline::{DependencyCheck, NoDependencyCheck, Pipeline, SimContext};
use crate::soc::Memory;
use crate::stats::SimStats;

/// How a run ended without a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program requested a halt through the supervisor-call register.
    Halted {
        /// Cycles elapsed.
        cycles: u64,
    },
    /// The cycle budget ran out first.
    CycleLimit {
        /// Cycles elapsed.
        cycles: u64,
    },
}

/// Top-level simulator: architectural state plus pipeline.
#[derive(Debug)]
pub struct Simulator {
    /// Register file, memory and branch signals.
    pub ctx: SimContext,
    /// Pipeline implementation.
    pub pipeline: Pipeline,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator with empty memory and the stub dependency checker.
    ///
    /// # Errors
    ///
    /// `Config` if the configuration is invalid, `MemoryFault` if memory
    /// cannot be built at the configured size.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_checker(config, Box::new(NoDependencyCheck))
    }

    /// Creates a simulator with a custom Issue-stage dependency checker.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new).
    pub fn with_checker(config: &Config, checker: Box<dyn DependencyCheck>) -> Result<Self> {
        config.validate()?;
        let mem = Memory::new(config.memory.size, config.memory.stack_depth)?;
        Ok(Self {
            ctx: SimContext::new(RegisterFile::new(), mem),
            pipeline: Pipeline::with_checker(
                checker,
                config.pipeline.issue_width,
                config.general.verbose,
            ),
            max_cycles: config.general.max_cycles,
        })
    }

    /// Copies a program image into memory at address 0.
    ///
    /// # Errors
    ///
    /// `MemoryFault` if the image does not fit.
    pub fn load(&mut self, image: &[i32]) -> Result<()> {
        self.ctx.mem.load_image(image)
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Any fault raised by a pipeline stage.
    pub fn tick(&mut self) -> Result<()> {
        self.pipeline.tick(&mut self.ctx)
    }

    /// Whether the program has requested a halt.
    pub const fn is_halted(&self) -> bool {
        self.ctx.regs.svc() == SVC_HALT
    }

    /// Cycles elapsed so far.
    pub const fn cycles(&self) -> u64 {
        self.ctx.regs.cycles
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.pipeline.stats
    }

    /// Runs until the program halts or the cycle budget is exhausted.
    ///
    /// # Errors
    ///
    /// The first fault raised by any stage; machine state is left as it was
    /// when the fault occurred so it can be dumped.
    pub fn run(&mut self) -> Result<RunOutcome> {
        info!(max_cycles = self.max_cycles, "run started");
        while self.cycles() < self.max_cycles {
            self.tick()?;
            if self.is_halted() {
                info!(cycles = self.cycles(), "halted");
                return Ok(RunOutcome::Halted {
                    cycles: self.cycles(),
                });
            }
        }
        warn!(cycles = self.cycles(), "cycle limit reached");
        Ok(RunOutcome::CycleLimit {
            cycles: self.cycles(),
        })
    }
}
