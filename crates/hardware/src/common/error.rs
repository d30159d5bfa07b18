//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Load Errors:** Problems found while turning program text into instructions.
//! 2. **Simulation Errors:** Fatal conditions raised during construction or while a cycle runs.
//! 3. **Configuration Errors:** Malformed or inconsistent configuration documents.
//!
//! There is no recoverable error in the pipeline: data hazards are resolved by
//! stalling, everything else stops the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or parsing a program file.
///
/// Every parse variant carries the 1-based line number of the offending line.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("could not read program '{}': {source}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The mnemonic is not part of the instruction set.
    #[error("line {line}: unknown opcode '{mnemonic}'")]
    UnknownOpcode {
        /// Line number.
        line: usize,
        /// Mnemonic as written.
        mnemonic: String,
    },

    /// The instruction has the wrong number of operands.
    #[error("line {line}: {mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Line number.
        line: usize,
        /// Canonical mnemonic.
        mnemonic: &'static str,
        /// Operands required by the format.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },

    /// A register operand is not of the form `R<n>`.
    #[error("line {line}: malformed register operand '{operand}'")]
    MalformedRegister {
        /// Line number.
        line: usize,
        /// Operand as written.
        operand: String,
    },

    /// An immediate operand is not of the form `#<n>`.
    #[error("line {line}: malformed immediate operand '{operand}'")]
    MalformedImmediate {
        /// Line number.
        line: usize,
        /// Operand as written.
        operand: String,
    },

    /// A register index exceeds the register file.
    #[error("line {line}: register R{index} out of range (register file has {count} registers)")]
    RegisterOutOfRange {
        /// Line number.
        line: usize,
        /// Register index as written.
        index: usize,
        /// Size of the register file.
        count: usize,
    },

    /// The file contains no instructions.
    #[error("program contains no instructions")]
    EmptyProgram,
}

/// Fatal simulator error.
///
/// Raised either while building a simulator (the instance is never created)
/// or while a cycle is running (the run is aborted).
#[derive(Debug, Error)]
pub enum SimError {
    /// The program could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The configuration cannot describe a machine.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A simulator cannot be built around an empty program.
    #[error("cannot build a simulator for an empty program")]
    EmptyProgram,

    /// An instruction names a register outside the register file.
    #[error("instruction at pc {pc} uses register R{index}, but the register file has {count}")]
    RegisterOutOfRange {
        /// Address of the instruction.
        pc: i32,
        /// Offending register index.
        index: usize,
        /// Size of the register file.
        count: usize,
    },

    /// Fetch was asked for an address outside code memory.
    #[error("pc {pc} is outside code memory [{base}, {end})")]
    PcOutOfRange {
        /// Requested program counter.
        pc: i32,
        /// First valid address.
        base: i32,
        /// One past the last valid address.
        end: i32,
    },

    /// Fetch was asked for an address that is not instruction-aligned.
    #[error("pc {pc} is not aligned to the instruction width")]
    MisalignedPc {
        /// Requested program counter.
        pc: i32,
    },

    /// A load or store computed an address outside data memory.
    #[error("data memory address {address} out of range (memory has {size} words) at pc {pc}")]
    MemoryOutOfRange {
        /// Address of the faulting instruction.
        pc: i32,
        /// Computed effective address.
        address: i32,
        /// Size of data memory in words.
        size: usize,
    },

    /// `DIV` with a zero divisor.
    #[error("division by zero at pc {pc}")]
    DivideByZero {
        /// Address of the faulting instruction.
        pc: i32,
    },
}

/// Failure while reading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the machine cannot be built with.
    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        /// Dotted path of the field.
        field: &'static str,
        /// Human-readable explanation.
        reason: &'static str,
    },
}
