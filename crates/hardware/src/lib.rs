//! APEX pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator of the 5-stage APEX teaching pipeline with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), register file, flags, and data memory.
//! 2. **Hazards:** RAW stalls between Decode and Execute, and operand forwarding from Execute and Memory.
//! 3. **Prediction:** A branch target buffer consulted by Fetch, with misprediction recovery in Execute.
//! 4. **ISA:** The APEX opcode table, instruction format, and disassembler.
//! 5. **Simulation:** Loader, run control, trace rendering, configuration, and statistics collection.
//!
//! ```
//! use apex_core::Config;
//! use apex_core::sim::{FreeRun, Simulator, StopReason, loader};
//!
//! let program = loader::parse_program("MOVC,R1,#5\nMOVC,R2,#10\nADD,R3,R1,R2\nHALT\n", 16).unwrap();
//! let mut sim = Simulator::new(program, &Config::default()).unwrap();
//! let summary = sim.run(&mut FreeRun).unwrap();
//! assert_eq!(summary.reason, StopReason::Halted);
//! assert_eq!(sim.register(3), 15);
//! ```

/// Common types and constants (machine constants, error types).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, arch state, execution units, memories).
pub mod core;
/// Instruction set (opcodes, instruction, disassembler).
pub mod isa;
/// Program loader, simulator run loop, run control and trace rendering.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds registers, memories, latches, BTB, and stats.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::from_file`.
pub use crate::sim::Simulator;
