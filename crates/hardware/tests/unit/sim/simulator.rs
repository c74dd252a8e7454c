//! # Simulator Tests
//!
//! Construction from configuration, image loading and run termination.

use pipesim_core::common::constants::SVC_HALT;
use pipesim_core::config::Config;
use pipesim_core::{RunOutcome, SimError, Simulator};

use crate::common::harness::{TestContext, test_config};

#[test]
fn memory_follows_configuration() {
    let sim = Simulator::new(&test_config()).unwrap();
    assert_eq!(sim.ctx.mem.size(), 256);
    assert_eq!(sim.ctx.mem.stack.capacity(), 1024);
    assert_eq!(sim.cycles(), 0);
    assert!(!sim.is_halted());
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut config = Config::default();
    config.pipeline.issue_width = 0;
    let err = Simulator::new(&config).unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "{err}");
}

#[test]
fn image_larger_than_memory_is_rejected() {
    let mut sim = Simulator::new(&test_config()).unwrap();
    let err = sim.load(&[0; 257]).unwrap_err();
    assert!(matches!(err, SimError::MemoryFault { .. }), "{err}");
}

#[test]
fn empty_program_spins_until_cycle_limit() {
    let mut config = test_config();
    config.memory.size = 1024;
    config.general.max_cycles = 100;
    let mut tc = TestContext::with_config(&config);

    assert_eq!(tc.run(), RunOutcome::CycleLimit { cycles: 100 });
    assert_eq!(tc.sim.stats().instructions_retired, 0);
}

#[test]
fn halt_is_checked_after_every_cycle() {
    let mut tc = TestContext::new().load_asm("EOP");

    let outcome = tc.run();

    assert_eq!(outcome, RunOutcome::Halted { cycles: 4 });
    assert_eq!(tc.sim.ctx.regs.svc(), SVC_HALT);
    assert_eq!(tc.sim.stats().cycles, 4);
}

#[test]
fn run_resumes_from_current_cycle() {
    let mut config = test_config();
    config.general.max_cycles = 10;
    let mut tc = TestContext::with_config(&config).load_asm("MOVI R1, 1\nBU 0");

    tc.step(4);
    assert_eq!(tc.run(), RunOutcome::CycleLimit { cycles: 10 });
}
