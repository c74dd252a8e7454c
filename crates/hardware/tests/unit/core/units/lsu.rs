//! # Load/Store Unit Tests

use pipesim_core::SimError;
use pipesim_core::common::RegisterFile;
use pipesim_core::core::pipeline::SimContext;
use pipesim_core::core::units::lsu::Lsu;
use pipesim_core::isa::Opcode;
use pipesim_core::soc::Memory;

use crate::common::builder::instruction::InstructionBuilder;

fn ctx() -> SimContext {
    SimContext::new(RegisterFile::new(), Memory::new(64, 16).unwrap())
}

#[test]
fn store_writes_value_at_base_plus_offset() {
    let mut ctx = ctx();
    // ST R2(base) R1(value) 3: rv1 = value, rv2 = base.
    let st = InstructionBuilder::new(Opcode::St)
        .rd(2)
        .rs1(1)
        .imm(3)
        .values(-9, 40)
        .build();

    Lsu::execute(&st, &mut ctx).unwrap();

    assert_eq!(ctx.mem.read(43).unwrap(), -9);
    assert_eq!(ctx.regs.mar, 43);
    assert_eq!(ctx.regs.mdr, -9);
}

#[test]
fn load_reads_through_mdr() {
    let mut ctx = ctx();
    ctx.mem.write(10, 1234).unwrap();
    let ld = InstructionBuilder::new(Opcode::Ld)
        .rd(3)
        .rs1(1)
        .imm(-2)
        .values(12, 0)
        .build();

    assert_eq!(Lsu::execute(&ld, &mut ctx).unwrap(), 1234);
    assert_eq!(ctx.regs.mar, 10);
    assert_eq!(ctx.regs.mdr, 1234);
}

#[test]
fn moves_pass_values_through() {
    let mut ctx = ctx();
    let movi = InstructionBuilder::new(Opcode::Movi).rd(1).imm(-300).build();
    let movr = InstructionBuilder::new(Opcode::Movr).rd(1).rs1(2).values(77, 0).build();
    assert_eq!(Lsu::execute(&movi, &mut ctx).unwrap(), -300);
    assert_eq!(Lsu::execute(&movr, &mut ctx).unwrap(), 77);
}

#[test]
fn out_of_range_access_faults() {
    let mut ctx = ctx();
    let ld = InstructionBuilder::new(Opcode::Ld).values(64, 0).build();
    let st = InstructionBuilder::new(Opcode::St).values(1, -1).build();
    assert!(matches!(
        Lsu::execute(&ld, &mut ctx),
        Err(SimError::MemoryFault { addr: 64, .. })
    ));
    assert!(matches!(
        Lsu::execute(&st, &mut ctx),
        Err(SimError::MemoryFault { addr: -1, .. })
    ));
}
