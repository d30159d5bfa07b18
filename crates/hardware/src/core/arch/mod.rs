//! APEX architectural state components.
//!
//! This module contains the programmer-visible storage elements:
//! 1. **GPRs:** General-purpose register file.
//! 2. **Flags:** Zero, negative and positive condition flags.

/// Condition flags written by Execute.
pub mod flags;

/// General-Purpose Register file implementation.
pub mod gpr;
