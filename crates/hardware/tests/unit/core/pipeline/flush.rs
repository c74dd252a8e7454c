//! # Flush Tests
//!
//! A branch resolved against its prediction must discard everything before
//! Execute in the same cycle and restart Fetch at the corrected address.

use pipesim_core::RunOutcome;
use pipesim_core::core::pipeline::latches::FetchedWord;
use pipesim_core::isa::Instruction;

use crate::common::harness::{TestContext, test_config};

const MISPREDICTED_FORWARD: &str = "
    MOVI R1, 1
    MOVI R2, 1
    BEQ  R1, R2, 2     # forward, predicted not taken, actually taken
    MOVI R3, 7         # wrong path
    EOP
";

#[test]
fn mispredict_clears_front_end_in_one_cycle() {
    let mut tc = TestContext::new().load_asm(MISPREDICTED_FORWARD);

    let cycles = tc.step_until_branch(20);

    assert_eq!(cycles, 6);
    assert_eq!(tc.sim.ctx.branch_target, 4);
    assert!(!tc.sim.ctx.prediction_correct);

    let pipeline = &tc.sim.pipeline;
    assert_eq!(pipeline.latches().if_id, FetchedWord::default());
    assert_eq!(pipeline.latches().id_is, Instruction::default());
    assert!(pipeline.queue().is_empty());
    assert_eq!(pipeline.issue().pending().count(), 0);
    assert_eq!(tc.sim.ctx.regs.pc, 4);
}

#[test]
fn wrong_path_never_writes_back() {
    let mut tc = TestContext::new().load_asm(MISPREDICTED_FORWARD);

    let outcome = tc.run();

    assert!(matches!(outcome, RunOutcome::Halted { .. }));
    assert_eq!(tc.reg(3), 0);
    let stats = tc.sim.stats();
    assert_eq!(stats.flushes, 1);
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.branches_resolved, 1);
}

#[test]
fn correctly_predicted_loop_only_flushes_on_exit() {
    let mut tc = TestContext::new().load_asm(
        "MOVI R1, 0
         MOVI R2, 5
         ADDI R1, R1, 1
         BNE  R1, R2, -1
         EOP",
    );

    let outcome = tc.run();

    assert!(matches!(outcome, RunOutcome::Halted { .. }));
    assert_eq!(tc.reg(1), 5);
    let stats = tc.sim.stats();
    assert_eq!(stats.branches_resolved, 5);
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.flushes, 1);
    assert_eq!(stats.decode_redirects, 5);
}

#[test]
fn unconditional_loop_redirects_without_flushing() {
    let mut tc = TestContext::new().load_asm(
        "MOVI R1, -1
         BU   -1",
    );

    let outcome = tc.run();

    assert_eq!(outcome, RunOutcome::CycleLimit { cycles: 500 });
    assert_eq!(tc.reg(1), -1);
    let stats = tc.sim.stats();
    assert_eq!(stats.flushes, 0);
    assert!(stats.decode_redirects > 0);
}

#[test]
fn return_flushes_and_cancels_pending_writeback() {
    let mut tc = TestContext::new().load_asm(
        "MOVI R1, 10
         BL   3
         EOP
         NOP
         MOVI R1, 99
         RET",
    );

    let outcome = tc.run();

    assert!(matches!(outcome, RunOutcome::Halted { .. }));
    assert_eq!(tc.reg(1), 10);
    assert!(tc.sim.ctx.mem.stack.is_empty());
    assert_eq!(tc.sim.ctx.regs.lr, 2);
    assert_eq!(tc.sim.stats().flushes, 1);
}

#[test]
fn return_flushes_fetches_past_the_end_of_memory() {
    let mut config = test_config();
    config.memory.size = 64;
    // 0: call the routine in the last three words, then read back its store.
    let source = format!(
        "BL 61\nLD R3, R0, 50\nEOP\n{}MOVI R1, 5\nST R0, R1, 50\nRET",
        "NOP\n".repeat(58)
    );
    let mut tc = TestContext::with_config(&config).load_asm(&source);

    let outcome = tc.try_run().unwrap();

    assert!(matches!(outcome, RunOutcome::Halted { .. }));
    assert_eq!(tc.mem(50), 5);
    assert_eq!(tc.reg(3), 5);
    assert_eq!(tc.reg(1), 0);
    assert_eq!(tc.sim.stats().flushes, 1);
}
