//! Common utilities and types used throughout the APEX simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Machine-wide parameters (code base, instruction width, default sizes).
//! 2. **Error Handling:** Load, simulation, and configuration error types.

/// Machine constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{CODE_BASE_ADDRESS, INSTRUCTION_SIZE};
pub use error::{ConfigError, LoadError, SimError};
