//! Execution units and functional components.
//!
//! This module contains the integer ALU and the branch resolution unit.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit including the BTB.
pub mod bru;
