//! # Branch Unit Tests
//!
//! Static prediction table, conditional resolution against the prediction,
//! and the call/return linkage through the call stack.

use pipesim_core::SimError;
use pipesim_core::common::RegisterFile;
use pipesim_core::common::constants::SVC_HALT;
use pipesim_core::core::pipeline::SimContext;
use pipesim_core::core::units::bru::{BranchUnit, StaticPredictor};
use pipesim_core::isa::{Instruction, Opcode};
use pipesim_core::soc::Memory;
use rstest::rstest;

use crate::common::builder::instruction::InstructionBuilder;

fn ctx() -> SimContext {
    SimContext::new(RegisterFile::new(), Memory::new(64, 64).unwrap())
}

fn bubble() -> Instruction {
    Instruction::default()
}

#[rstest]
#[case::bu(Opcode::Bu, 5, true)]
#[case::bl(Opcode::Bl, 5, true)]
#[case::ret(Opcode::Ret, 0, true)]
#[case::beq_backward(Opcode::Beq, -3, true)]
#[case::bne_backward(Opcode::Bne, -1, true)]
#[case::blt_forward(Opcode::Blt, 4, false)]
#[case::bgt_zero_offset(Opcode::Bgt, 0, false)]
#[case::add(Opcode::Add, 0, false)]
#[case::movi_negative(Opcode::Movi, -8, false)]
#[case::eop(Opcode::Eop, 0, false)]
fn static_prediction(#[case] op: Opcode, #[case] imm: i32, #[case] taken: bool) {
    let inst = InstructionBuilder::new(op).imm(imm).build();
    assert_eq!(StaticPredictor::predict(&inst), taken);
}

#[rstest]
#[case(Opcode::Beq, 3, 3, true)]
#[case(Opcode::Beq, 3, 4, false)]
#[case(Opcode::Bne, 3, 4, true)]
#[case(Opcode::Blt, -1, 0, true)]
#[case(Opcode::Blt, 0, -1, false)]
#[case(Opcode::Bgt, 0, -1, true)]
#[case(Opcode::Bgt, 5, 5, false)]
fn condition_is_signed(#[case] op: Opcode, #[case] a: i32, #[case] b: i32, #[case] taken: bool) {
    assert_eq!(BranchUnit::condition(op, a, b), taken);
}

#[test]
fn forward_branch_taken_is_mispredicted() {
    let mut ctx = ctx();
    let inst = InstructionBuilder::new(Opcode::Beq)
        .rd(1)
        .rs1(2)
        .imm(6)
        .values(9, 9)
        .at(10)
        .predicted(false)
        .build();

    BranchUnit::execute(&inst, &mut ctx, &mut bubble()).unwrap();

    assert!(ctx.branch_taken);
    assert_eq!(ctx.branch_target, 16);
    assert!(!ctx.prediction_correct);
    assert_eq!(ctx.regs.pc_branch, 16);
}

#[test]
fn backward_branch_taken_as_predicted_is_silent() {
    let mut ctx = ctx();
    let inst = InstructionBuilder::new(Opcode::Bne)
        .imm(-2)
        .values(1, 2)
        .at(10)
        .predicted(true)
        .build();

    BranchUnit::execute(&inst, &mut ctx, &mut bubble()).unwrap();

    assert!(!ctx.branch_taken);
    assert!(ctx.prediction_correct);
}

#[test]
fn backward_branch_not_taken_falls_through() {
    let mut ctx = ctx();
    let inst = InstructionBuilder::new(Opcode::Bne)
        .imm(-2)
        .values(4, 4)
        .at(10)
        .predicted(true)
        .build();

    BranchUnit::execute(&inst, &mut ctx, &mut bubble()).unwrap();

    assert!(ctx.branch_taken);
    assert_eq!(ctx.branch_target, 11);
    assert!(!ctx.prediction_correct);
}

#[test]
fn unconditional_branch_only_redirects_when_unpredicted() {
    let mut ctx = ctx();
    let predicted = InstructionBuilder::new(Opcode::Bu).imm(4).at(2).predicted(true).build();
    BranchUnit::execute(&predicted, &mut ctx, &mut bubble()).unwrap();
    assert!(!ctx.branch_taken);

    let unpredicted = InstructionBuilder::new(Opcode::Bu).imm(4).at(2).predicted(false).build();
    BranchUnit::execute(&unpredicted, &mut ctx, &mut bubble()).unwrap();
    assert!(ctx.branch_taken);
    assert_eq!(ctx.branch_target, 6);
}

#[test]
fn call_saves_registers_with_writeback_forwarding() {
    let mut ctx = ctx();
    for r in 1..16 {
        ctx.regs.write(r, r as i32 * 10).unwrap();
    }
    // R4's new value is still in Writeback.
    let mut in_wb = InstructionBuilder::new(Opcode::Movi).rd(4).wb_value(-4).build();
    let call = InstructionBuilder::new(Opcode::Bl).imm(20).at(7).predicted(true).build();

    let link = BranchUnit::execute(&call, &mut ctx, &mut in_wb).unwrap();

    assert_eq!(link, 8);
    assert_eq!(ctx.regs.lr, 8);
    assert_eq!(ctx.mem.stack.len(), 16);
    assert!(!ctx.branch_taken);

    assert_eq!(ctx.mem.stack.pop().unwrap(), 8);
    for r in (1..16).rev() {
        let expected = if r == 4 { -4 } else { r as i32 * 10 };
        assert_eq!(ctx.mem.stack.pop().unwrap(), expected, "R{r}");
    }
}

#[test]
fn return_restores_in_mirror_order_and_cancels_writeback() {
    let mut ctx = ctx();
    for r in 1..16 {
        ctx.regs.write(r, 100 + r as i32).unwrap();
    }
    let call = InstructionBuilder::new(Opcode::Bl).imm(20).at(3).predicted(true).build();
    BranchUnit::execute(&call, &mut ctx, &mut bubble()).unwrap();

    for r in 1..16 {
        ctx.regs.write(r, -1).unwrap();
    }
    ctx.regs.lr = 0;

    let mut in_wb = InstructionBuilder::new(Opcode::Add).rd(2).wb_value(55).build();
    let ret = InstructionBuilder::new(Opcode::Ret).at(30).predicted(true).build();
    BranchUnit::execute(&ret, &mut ctx, &mut in_wb).unwrap();

    for r in 1..16 {
        assert_eq!(ctx.regs.read(r).unwrap(), 100 + r as i32, "R{r}");
    }
    assert_eq!(ctx.regs.lr, 4);
    assert!(ctx.mem.stack.is_empty());
    assert!(in_wb.wb_cancelled);
    assert!(ctx.branch_taken);
    assert_eq!(ctx.branch_target, 4);
    assert!(!ctx.prediction_correct);
}

#[test]
fn return_without_call_underflows() {
    let mut ctx = ctx();
    let ret = InstructionBuilder::new(Opcode::Ret).predicted(true).build();
    let err = BranchUnit::execute(&ret, &mut ctx, &mut bubble()).unwrap_err();
    assert!(matches!(err, SimError::MemoryFault { .. }), "{err}");
}

#[test]
fn call_past_stack_depth_overflows() {
    let mut ctx = SimContext::new(RegisterFile::new(), Memory::new(64, 20).unwrap());
    let call = InstructionBuilder::new(Opcode::Bl).imm(1).predicted(true).build();
    BranchUnit::execute(&call, &mut ctx, &mut bubble()).unwrap();
    let err = BranchUnit::execute(&call, &mut ctx, &mut bubble()).unwrap_err();
    assert!(matches!(err, SimError::MemoryFault { .. }), "{err}");
}

#[test]
fn end_of_program_requests_halt() {
    let mut ctx = ctx();
    let eop = InstructionBuilder::new(Opcode::Eop).build();
    BranchUnit::execute(&eop, &mut ctx, &mut bubble()).unwrap();
    assert_eq!(ctx.regs.svc(), SVC_HALT);
    assert!(!ctx.branch_taken);
}
