//! Line-oriented assembler.
//!
//! Translates assembly source into a program image. The grammar:
//! 1. **Lines:** One instruction per line; `#` starts a comment; blank lines are skipped.
//! 2. **Tokens:** Separated by whitespace and/or commas; mnemonics are case-insensitive.
//! 3. **Operands:** Registers `R0`-`R15`; immediates `0x`-prefixed hex or decimal,
//!    optionally signed, and must fit in 16 signed bits. An unsigned hex literal up
//!    to `0xFFFF` is taken as the raw field bits, so `0xFFFF` is -1.
//!
//! Operands are written in encoding field order:
//!
//! | Form | Example |
//! |------|---------|
//! | RRR | `ADD R3, R1, R2` |
//! | RRI | `ADDI R1, R1, 0x1`, `LD R2, R1, 0`, `ST R1, R2, 0`, `BNE R1, R2, -0x3` |
//! | RR  | `NOT R2, R1`, `MOVR R2, R1` |
//! | RI  | `MOVI R1, 5` |
//! | I   | `BU -1`, `BL 0x8`, `RET`, `EOP`, `NOP` (immediate optional for the last three) |

use tracing::trace;

use crate::common::constants::GP_REGISTER_COUNT;
use crate::common::error::{Result, SimError};
use crate::isa::encode::encode_program;
use crate::isa::{InstType, Instruction, Opcode};

/// Assembler options.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssembleOptions {
    verbose: bool,
}

impl AssembleOptions {
    /// Enables token-level logging.
    pub const fn set_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Assembles `source` into a program image ready for [`Memory::load_image`](crate::soc::Memory::load_image).
///
/// # Errors
///
/// `ParseFault` with the one-based line number of the first bad token, or
/// `DecodeFault` if an operand does not fit its field.
///
/// # Examples
///
/// ```
/// use pipesim_core::sim::assembler::{AssembleOptions, assemble};
///
/// let image = assemble("MOVI R1, 5\nEOP", AssembleOptions::default()).unwrap();
/// assert_eq!(image.len(), 2);
/// ```
pub fn assemble(source: &str, options: AssembleOptions) -> Result<Vec<i32>> {
    encode_program(&parse_program(source, options)?)
}

/// Parses `source` into instructions without encoding them.
///
/// # Errors
///
/// `ParseFault` with the one-based line number of the first bad token.
pub fn parse_program(source: &str, options: AssembleOptions) -> Result<Vec<Instruction>> {
    let mut program = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        if let Some(inst) = parse_line(idx + 1, line, options)? {
            program.push(inst);
        }
    }
    Ok(program)
}

/// Parses one source line; `Ok(None)` for blank and comment-only lines.
///
/// # Errors
///
/// `ParseFault` on an unknown mnemonic, a malformed operand, or the wrong
/// number of operands.
pub fn parse_line(line_no: usize, line: &str, options: AssembleOptions) -> Result<Option<Instruction>> {
    let code = line.split('#').next().unwrap_or_default();
    let tokens: Vec<&str> = code
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let Some((&mnemonic, operands)) = tokens.split_first() else {
        return Ok(None);
    };
    if options.verbose {
        trace!(line = line_no, tokens = ?tokens, "asm");
    }

    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| SimError::parse(line_no, mnemonic, "unknown mnemonic"))?;

    let mut ops = Operands {
        line: line_no,
        mnemonic,
        tokens: operands,
        next: 0,
    };

    let inst = match opcode.inst_type() {
        InstType::Rrr => {
            let rd = ops.register()?;
            let rs1 = ops.register()?;
            let rs2 = ops.register()?;
            Instruction::new(opcode, rd, rs1, rs2, 0)
        }
        InstType::Rri => {
            let rd = ops.register()?;
            let rs1 = ops.register()?;
            let imm = ops.immediate()?;
            Instruction::new(opcode, rd, rs1, 0, imm)
        }
        InstType::Rr => {
            let rd = ops.register()?;
            let rs1 = ops.register()?;
            Instruction::new(opcode, rd, rs1, 0, 0)
        }
        InstType::Ri => {
            let rd = ops.register()?;
            let imm = ops.immediate()?;
            Instruction::new(opcode, rd, 0, 0, imm)
        }
        // NOP, RET and EOP ignore their immediate, so it may be omitted.
        InstType::I => {
            let imm = match opcode {
                Opcode::Nop | Opcode::Ret | Opcode::Eop => ops.optional_immediate()?.unwrap_or(0),
                _ => ops.immediate()?,
            };
            Instruction::new(opcode, 0, 0, 0, imm)
        }
    };
    ops.finish()?;
    Ok(Some(inst))
}

/// Cursor over the operand tokens of one line.
struct Operands<'a> {
    line: usize,
    mnemonic: &'a str,
    tokens: &'a [&'a str],
    next: usize,
}

impl<'a> Operands<'a> {
    fn take(&mut self, what: &str) -> Result<&'a str> {
        let tok = self.tokens.get(self.next).copied().ok_or_else(|| {
            SimError::parse(self.line, self.mnemonic, format!("missing {what} operand"))
        })?;
        self.next += 1;
        Ok(tok)
    }

    fn register(&mut self) -> Result<usize> {
        let tok = self.take("register")?;
        parse_register(tok).ok_or_else(|| {
            SimError::parse(
                self.line,
                tok,
                format!("expected a register R0-R{}", GP_REGISTER_COUNT - 1),
            )
        })
    }

    fn immediate(&mut self) -> Result<i32> {
        let tok = self.take("immediate")?;
        let literal = parse_immediate(tok)
            .ok_or_else(|| SimError::parse(self.line, tok, "expected a hex or decimal immediate"))?;
        if literal.raw_bits {
            return u16::try_from(literal.value)
                .map(|bits| i32::from(bits as i16))
                .map_err(|_| SimError::parse(self.line, tok, "immediate does not fit in 16 bits"));
        }
        i16::try_from(literal.value)
            .map(i32::from)
            .map_err(|_| SimError::parse(self.line, tok, "immediate does not fit in 16 signed bits"))
    }

    fn optional_immediate(&mut self) -> Result<Option<i32>> {
        if self.next < self.tokens.len() {
            self.immediate().map(Some)
        } else {
            Ok(None)
        }
    }

    fn finish(&self) -> Result<()> {
        match self.tokens.get(self.next) {
            Some(extra) => Err(SimError::parse(self.line, *extra, "unexpected operand")),
            None => Ok(()),
        }
    }
}

/// Parses `R<n>` (either case) with `n` a valid register index.
fn parse_register(tok: &str) -> Option<usize> {
    let digits = tok.strip_prefix('R').or_else(|| tok.strip_prefix('r'))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n < GP_REGISTER_COUNT)
}

/// A parsed immediate token.
struct Literal {
    value: i64,
    /// Unsigned hex: the digits are the 16-bit field pattern.
    raw_bits: bool,
}

/// Parses a signed hex (`0x`) or decimal literal. The sign may only lead the
/// token; the digits after it must all belong to the radix.
fn parse_immediate(tok: &str) -> Option<Literal> {
    let (negative, body) = match tok.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, tok.strip_prefix('+').unwrap_or(tok)),
    };
    let (magnitude, hex) = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(digits) if all_digits(digits, u8::is_ascii_hexdigit) => {
            (i64::from_str_radix(digits, 16).ok()?, true)
        }
        None if all_digits(body, u8::is_ascii_digit) => (body.parse().ok()?, false),
        _ => return None,
    };
    Some(Literal {
        value: if negative { -magnitude } else { magnitude },
        raw_bits: hex && !negative,
    })
}

fn all_digits(s: &str, accept: fn(&u8) -> bool) -> bool {
    !s.is_empty() && s.bytes().all(|b| accept(&b))
}
