//! APEX General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains `N` signed 32-bit registers (`R0`-`R{N-1}`), 16 by default.
//! 2. **Access:** Plain reads and writes; `R0` is an ordinary register, not hardwired.

use crate::common::constants::REG_FILE_SIZE;

/// General-Purpose Register file.
///
/// Register indices are validated when a program is loaded; an index outside
/// the file reads as zero and its writes are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: Vec<i32>,
}

impl Gpr {
    /// Creates a register file of `count` registers, all zero.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of registers.
    pub fn new(count: usize) -> Self {
        Self {
            regs: vec![0; count],
        }
    }

    /// Number of registers in the file.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns `true` if the file has no registers.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the register, or 0 for an index outside the file.
    pub fn read(&self, idx: usize) -> i32 {
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a value to a register.
    ///
    /// Writes to an index outside the file are dropped.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: i32) {
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// All register values in index order.
    pub fn as_slice(&self) -> &[i32] {
        &self.regs
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new(REG_FILE_SIZE)
    }
}
