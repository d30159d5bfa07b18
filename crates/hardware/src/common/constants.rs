//! Global Machine Constants.
//!
//! This module defines the fixed parameters of the APEX machine. It includes:
//! 1. **Code Memory Constants:** The base address of the first instruction and the PC stride.
//! 2. **Storage Constants:** Default register file, data memory, and BTB sizes.
//! 3. **Sentinels:** Marker values used by the branch target buffer.

/// Address of the first instruction in code memory.
///
/// Program counters below this value do not map to any instruction.
pub const CODE_BASE_ADDRESS: i32 = 4000;

/// Width of every instruction in bytes; the PC advances by this amount.
pub const INSTRUCTION_SIZE: i32 = 4;

/// Amount added to the base register by the post-increment memory operations.
pub const POST_INCREMENT: i32 = 4;

/// Default number of general-purpose registers (`R0`-`R15`).
pub const REG_FILE_SIZE: usize = 16;

/// Default number of words of data memory.
pub const DATA_MEMORY_SIZE: usize = 4000;

/// Default number of entries in the branch target buffer.
pub const BTB_SIZE: usize = 8;

/// Tag and target value of an unused BTB entry.
pub const BTB_EMPTY_ADDRESS: i32 = -1;

/// Mask applied to BTB history bits (two outcomes are remembered).
pub const BTB_HISTORY_MASK: u8 = 0b11;

/// Number of pipeline stages (Fetch, Decode, Execute, Memory, Writeback).
pub const PIPELINE_DEPTH: u64 = 5;
