//! Core processor implementation.
//!
//! This module contains the CPU state, the five-stage pipeline, the execution
//! units, and the architectural storage elements.

/// Architectural components (register file, condition flags).
pub mod arch;

/// CPU state container and memory arrays.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, engine).
pub mod pipeline;

/// Execution units (ALU, branch resolution unit).
pub mod units;

pub use self::cpu::Cpu;
