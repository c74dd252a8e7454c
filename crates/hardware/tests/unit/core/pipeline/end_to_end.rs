//! # End-to-End Tests
//!
//! Small programs run through the full pipeline: cycle accounting, halting,
//! the cycle budget and every fault kind the machine can raise mid-run.

use pipesim_core::{RunOutcome, SimError};
use rstest::rstest;

use crate::common::harness::{TestContext, test_config};

const SUM: &str = "
    MOVI R1, 5
    MOVI R2, 3
    ADD  R3, R1, R2
    EOP
";

#[test]
fn straight_line_program_halts_with_exact_cycle_count() {
    let mut tc = TestContext::new().load_asm(SUM);

    let outcome = tc.run();

    assert_eq!(outcome, RunOutcome::Halted { cycles: 7 });
    assert_eq!(tc.reg(1), 5);
    assert_eq!(tc.reg(2), 3);
    assert_eq!(tc.reg(3), 8);
    assert!(tc.sim.is_halted());
}

#[test]
fn retired_mix_excludes_bubbles() {
    let mut tc = TestContext::new().load_asm(SUM);
    tc.run();

    let stats = tc.sim.stats();
    assert_eq!(stats.cycles, 7);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.inst_move, 2);
    assert_eq!(stats.inst_alu, 1);
    assert!(stats.cpi() > 2.0);
}

#[test]
fn status_flags_follow_last_alu_commit() {
    let mut tc = TestContext::new().load_asm(
        "MOVI R1, 3
         SUBI R2, R1, 3
         EOP",
    );
    tc.run();

    assert_eq!(tc.reg(2), 0);
    assert!(tc.sim.ctx.regs.status().zero());
    assert!(!tc.sim.ctx.regs.status().negative());
}

#[test]
fn single_cycle_steps_advance_the_clock() {
    let mut tc = TestContext::new().load_asm(SUM);

    tc.step(3);

    assert_eq!(tc.sim.cycles(), 3);
    assert_eq!(tc.sim.ctx.regs.pc, 3);
    assert!(!tc.sim.is_halted());
}

#[test]
fn wider_issue_gives_identical_results() {
    let mut config = test_config();
    config.pipeline.issue_width = 2;
    let mut tc = TestContext::with_config(&config).load_asm(
        "MOVI R1, 0
         MOVI R2, 5
         ADDI R1, R1, 1
         BNE  R1, R2, -1
         MOVR R4, R1
         EOP",
    );

    let outcome = tc.run();

    assert!(matches!(outcome, RunOutcome::Halted { .. }));
    assert_eq!(tc.reg(4), 5);
}

#[test]
fn nested_calls_restore_each_frame() {
    let mut tc = TestContext::new().load_asm(
        "MOVI R1, 1
         BL   3          # -> 4
         MOVR R5, R1
         EOP
         MOVI R1, 2
         BL   2          # -> 7
         RET
         MOVI R1, 3
         RET",
    );

    let outcome = tc.run();

    assert!(matches!(outcome, RunOutcome::Halted { .. }));
    assert_eq!(tc.reg(1), 1);
    assert_eq!(tc.reg(5), 1);
    assert!(tc.sim.ctx.mem.stack.is_empty());
}

#[rstest]
#[case::out_of_range_load("LD R1, R0, 2000\nEOP")]
#[case::negative_store("MOVI R1, -1\nST R1, R1, 0\nEOP")]
fn bad_data_address_is_a_memory_fault(#[case] source: &str) {
    let mut tc = TestContext::new().load_asm(source);
    let err = tc.try_run().unwrap_err();
    assert!(matches!(err, SimError::MemoryFault { .. }), "{err}");
}

#[test]
fn running_off_the_end_faults_once_the_address_reaches_execute() {
    let mut tc = TestContext::new().load_asm("MOVI R1, 1");
    let err = tc.try_run().unwrap_err();
    assert!(matches!(err, SimError::MemoryFault { addr: 256, .. }), "{err}");
    assert_eq!(tc.reg(1), 1);
}

#[test]
fn write_to_reserved_register_faults_at_writeback() {
    let mut tc = TestContext::new().load_asm("MOVI R0, 5\nEOP");
    let err = tc.try_run().unwrap_err();
    assert!(matches!(err, SimError::RegisterFault { .. }), "{err}");
    assert_eq!(tc.reg(0), 0);
}

#[test]
fn division_by_zero_faults() {
    let mut tc = TestContext::new().load_asm("MOVI R1, 7\nDIV R2, R1, R0\nEOP");
    let err = tc.try_run().unwrap_err();
    assert!(
        matches!(err, SimError::ArithmeticFault { mnemonic: "DIV", pc: 1 }),
        "{err}"
    );
}

#[test]
fn illegal_opcode_faults_when_it_reaches_execute() {
    let mut tc = TestContext::new().load_words(&[0xF800_0000_u32 as i32]);
    let err = tc.try_run().unwrap_err();
    assert!(matches!(err, SimError::RegisterFault { ref reg, .. } if reg == "IR"), "{err}");
    assert_eq!(tc.sim.cycles(), 3);
}

#[test]
fn program_filling_memory_halts_on_final_eop() {
    let mut config = test_config();
    config.memory.size = 64;
    let source = format!("{}MOVI R1, 5\nEOP", "NOP\n".repeat(62));
    let mut tc = TestContext::with_config(&config).load_asm(&source);

    let outcome = tc.try_run().unwrap();

    assert_eq!(outcome, RunOutcome::Halted { cycles: 67 });
    assert_eq!(tc.reg(1), 5);
}

#[test]
fn illegal_word_after_eop_is_never_executed() {
    let eop = (26_u32 << 27) as i32;
    let mut tc = TestContext::new().load_words(&[eop, 0xF800_0000_u32 as i32]);

    assert_eq!(tc.try_run().unwrap(), RunOutcome::Halted { cycles: 4 });
}

#[test]
fn fault_leaves_state_for_dumping() {
    let mut tc = TestContext::new().load_asm("MOVI R1, 7\nMOVI R2, 9\nDIV R3, R1, R0\nEOP");
    tc.try_run().unwrap_err();

    assert_eq!(tc.reg(1), 7);
    let dump = tc.sim.ctx.regs.to_string();
    assert!(dump.contains("R1"), "{dump}");
    assert!(tc.sim.ctx.mem.to_string().contains("stack depth 0/"));
}

fn demo(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn sum_demo_stores_fifty_five() {
    let mut tc = TestContext::new().load_asm(&demo("sum.asm"));

    assert!(matches!(tc.run(), RunOutcome::Halted { .. }));
    assert_eq!(tc.reg(3), 55);
    assert_eq!(tc.mem(100), 55);
    assert_eq!(tc.sim.stats().branches_resolved, 10);
}

#[test]
fn call_demo_returns_through_memory() {
    let mut tc = TestContext::new().load_asm(&demo("call.asm"));

    assert!(matches!(tc.run(), RunOutcome::Halted { .. }));
    assert_eq!(tc.mem(200), 49);
    assert_eq!(tc.reg(3), 49);
    assert_eq!(tc.reg(4), 0);
}
