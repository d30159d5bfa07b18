//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the APEX opcode table, the decoded instruction type, and the
//! disassembler used for traces.
//!
//! # Instruction classes
//!
//! * Register arithmetic and logic: `ADD SUB MUL DIV AND OR XOR`.
//! * Immediate arithmetic: `ADDL SUBL MOVC`.
//! * Memory: `LOAD LOADP STORE STOREP`.
//! * Compare and branch: `CMP CML BZ BNZ BP BNP BN BNN`.
//! * Control transfer: `JUMP JALR`.
//! * System: `HALT NOP`.

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Decoded instruction structure.
pub mod instruction;

/// Opcode table and per-opcode properties.
pub mod opcode;

pub use instruction::Instruction;
pub use opcode::{BranchCondition, Format, InstructionClass, Opcode};
