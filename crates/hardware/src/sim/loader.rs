//! Program Loader.
//!
//! This module turns APEX assembly text into decoded instructions. It performs:
//! 1. **File loading:** Reads the program file from disk.
//! 2. **Tokenizing:** Splits each line on commas and whitespace, dropping comments.
//! 3. **Operand parsing:** Checks the operand count of each opcode, then parses
//!    `R<n>` registers and `#<n>` literals.
//!
//! ```text
//! ; sum two constants
//! MOVC,R1,#5
//! MOVC R2, #10
//! ADD,R3,R1,R2
//! HALT
//! ```

use std::fs;
use std::path::Path;

use crate::common::error::LoadError;
use crate::isa::{Format, Instruction, Opcode};

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Path to the program text.
/// * `register_count` - Size of the register file; larger indices are rejected.
///
/// # Returns
///
/// The instructions in file order, or the first [`LoadError`] encountered.
pub fn load_program(path: &Path, register_count: usize) -> Result<Vec<Instruction>, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&source, register_count)?;
    tracing::info!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}

/// Parses program text.
///
/// Blank lines and comments (`;` or `//` up to the end of the line) are skipped.
pub fn parse_program(source: &str, register_count: usize) -> Result<Vec<Instruction>, LoadError> {
    let mut program = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        if let Some(insn) = parse_line(index + 1, raw, register_count)? {
            program.push(insn);
        }
    }
    if program.is_empty() {
        return Err(LoadError::EmptyProgram);
    }
    Ok(program)
}

/// Removes a trailing `;` or `//` comment.
fn strip_comment(line: &str) -> &str {
    let cut = [line.find(';'), line.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..cut]
}

/// Parses one line; `Ok(None)` for lines without an instruction.
fn parse_line(
    line: usize,
    raw: &str,
    register_count: usize,
) -> Result<Option<Instruction>, LoadError> {
    let mut tokens = strip_comment(raw)
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };
    let opcode: Opcode = mnemonic.parse().map_err(|_| LoadError::UnknownOpcode {
        line,
        mnemonic: mnemonic.to_owned(),
    })?;

    let operands: Vec<&str> = tokens.collect();
    let format = opcode.format();
    if operands.len() != format.operand_count() {
        return Err(LoadError::OperandCount {
            line,
            mnemonic: opcode.mnemonic(),
            expected: format.operand_count(),
            found: operands.len(),
        });
    }

    let reg = |i: usize| parse_register(line, operands[i], register_count);
    let imm = |i: usize| parse_immediate(line, operands[i]);
    let mut insn = Instruction {
        opcode,
        ..Instruction::default()
    };
    match format {
        Format::ThreeReg => {
            insn.rd = reg(0)?;
            insn.rs1 = reg(1)?;
            insn.rs2 = reg(2)?;
        }
        Format::RegRegImm => {
            insn.rd = reg(0)?;
            insn.rs1 = reg(1)?;
            insn.imm = imm(2)?;
        }
        Format::Store => {
            insn.rs2 = reg(0)?;
            insn.rs1 = reg(1)?;
            insn.imm = imm(2)?;
        }
        Format::DestImm => {
            insn.rd = reg(0)?;
            insn.imm = imm(1)?;
        }
        Format::SourceImm => {
            insn.rs1 = reg(0)?;
            insn.imm = imm(1)?;
        }
        Format::TwoSource => {
            insn.rs1 = reg(0)?;
            insn.rs2 = reg(1)?;
        }
        Format::Imm => insn.imm = imm(0)?,
        Format::Bare => {}
    }
    Ok(Some(insn))
}

/// Parses `R<n>` (either case) and checks it against the register file.
fn parse_register(line: usize, operand: &str, register_count: usize) -> Result<usize, LoadError> {
    let malformed = || LoadError::MalformedRegister {
        line,
        operand: operand.to_owned(),
    };
    let digits = operand
        .strip_prefix('R')
        .or_else(|| operand.strip_prefix('r'))
        .ok_or_else(malformed)?;
    let index: usize = digits.parse().map_err(|_| malformed())?;
    if index >= register_count {
        return Err(LoadError::RegisterOutOfRange {
            line,
            index,
            count: register_count,
        });
    }
    Ok(index)
}

/// Parses `#<n>` with an optional sign.
fn parse_immediate(line: usize, operand: &str) -> Result<i32, LoadError> {
    operand
        .strip_prefix('#')
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| LoadError::MalformedImmediate {
            line,
            operand: operand.to_owned(),
        })
}
