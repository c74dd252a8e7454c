//! # Assembler Tests
//!
//! Token grammar, operand forms and the line-numbered parse faults.

use pipesim_core::SimError;
use pipesim_core::isa::{Instruction, Opcode};
use pipesim_core::sim::assembler::{AssembleOptions, assemble, parse_line, parse_program};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn opts() -> AssembleOptions {
    AssembleOptions::default().set_verbose(true)
}

fn line(text: &str) -> Instruction {
    parse_line(1, text, opts()).unwrap().unwrap()
}

fn parse_fault(source: &str) -> (usize, String) {
    match assemble(source, opts()).unwrap_err() {
        SimError::ParseFault { line, token, .. } => (line, token),
        other => panic!("expected ParseFault, got {other}"),
    }
}

#[test]
fn commas_and_whitespace_both_separate() {
    assert_eq!(line("ADD R3, R1, R2"), Instruction::new(Opcode::Add, 3, 1, 2, 0));
    assert_eq!(line("add r3 r1,r2"), Instruction::new(Opcode::Add, 3, 1, 2, 0));
    assert_eq!(line("\tADDI  R1 ,R1, 1"), Instruction::new(Opcode::Addi, 1, 1, 0, 1));
}

#[rstest]
#[case("MOVI R1, 0x7fff", 0x7fff)]
#[case("MOVI R1, -0x8000", -0x8000)]
#[case("MOVI R1, 0XA", 10)]
#[case("MOVI R1, +12", 12)]
#[case("MOVI R1, -1", -1)]
#[case("BU 0xFFFF", -1)]
#[case("BU 0x8000", -0x8000)]
#[case("BNE R1, R2, 0xfffe", -2)]
fn immediates(#[case] text: &str, #[case] imm: i32) {
    assert_eq!(line(text).imm, imm);
}

#[test]
fn operand_forms() {
    assert_eq!(line("ST R2, R1, -4"), Instruction::new(Opcode::St, 2, 1, 0, -4));
    assert_eq!(line("MOVR R2, R1"), Instruction::new(Opcode::Movr, 2, 1, 0, 0));
    assert_eq!(line("BL 0x8"), Instruction::new(Opcode::Bl, 0, 0, 0, 8));
    assert_eq!(line("RET"), Instruction::new(Opcode::Ret, 0, 0, 0, 0));
    assert_eq!(line("EOP 3"), Instruction::new(Opcode::Eop, 0, 0, 0, 3));
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_line(1, "", opts()).unwrap(), None);
    assert_eq!(parse_line(1, "   # just a note", opts()).unwrap(), None);
    assert_eq!(line("NOP # trailing"), Instruction::default());

    let program = parse_program("# header\n\nMOVI R1, 1\n\nEOP\n", opts()).unwrap();
    assert_eq!(program.len(), 2);
}

#[test]
fn image_matches_encoded_words() {
    let image = assemble("MOVI R1, 5\nEOP", opts()).unwrap();
    let movi = (17_u32 << 27) | (1 << 23) | 5;
    let eop = 26_u32 << 27;
    assert_eq!(image, vec![movi as i32, eop as i32]);
}

#[rstest]
#[case::unknown_mnemonic("MOVI R1, 1\nJMP 4", 2, "JMP")]
#[case::bad_register("ADD R3, R1, R16", 1, "R16")]
#[case::not_a_register("ADD R3, R1, 5", 1, "5")]
#[case::immediate_overflow("EOP\n\nMOVI R1, 40000", 3, "40000")]
#[case::bad_hex("MOVI R1, 0xZZ", 1, "0xZZ")]
#[case::hex_wider_than_field("BU 0x10000", 1, "0x10000")]
#[case::negative_hex_overflow("BU -0x8001", 1, "-0x8001")]
#[case::sign_after_prefix("BU 0x-5", 1, "0x-5")]
#[case::double_sign("BU -0x-5", 1, "-0x-5")]
#[case::sign_inside_decimal("MOVI R1, 1-2", 1, "1-2")]
#[case::extra_operand("NOT R1, R2, R3", 1, "R3")]
#[case::missing_operand("ADDI R1, R1", 1, "ADDI")]
#[case::branch_needs_offset("BU", 1, "BU")]
fn parse_faults_report_line_and_token(
    #[case] source: &str,
    #[case] expected_line: usize,
    #[case] expected_token: &str,
) {
    let (line, token) = parse_fault(source);
    assert_eq!(line, expected_line);
    assert_eq!(token, expected_token);
}
