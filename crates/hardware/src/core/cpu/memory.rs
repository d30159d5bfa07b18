//! Code and Data Memory.
//!
//! This module provides the two storage arrays of the machine. It performs the following:
//! 1. **Code Memory:** Maps a program counter to an instruction (`(pc - base) / 4`).
//! 2. **Data Memory:** A word array indexed directly by the computed address.
//! 3. **Bounds Checking:** Every access outside either array becomes a [`SimError`].

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::SimError;
use crate::isa::Instruction;

/// Read-only instruction store.
#[derive(Clone, Debug)]
pub struct CodeMemory {
    base: i32,
    instructions: Vec<Instruction>,
}

impl CodeMemory {
    /// Places `instructions` at consecutive addresses starting at `base`.
    pub fn new(base: i32, instructions: Vec<Instruction>) -> Self {
        Self { base, instructions }
    }

    /// Address of the first instruction.
    pub const fn base(&self) -> i32 {
        self.base
    }

    /// One past the address of the last instruction.
    pub fn end(&self) -> i32 {
        let len = i32::try_from(self.instructions.len()).unwrap_or(i32::MAX);
        self.base.saturating_add(len.saturating_mul(INSTRUCTION_SIZE))
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// All instructions in address order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Reads the instruction stored at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter; must be aligned and inside the program.
    ///
    /// # Returns
    ///
    /// The instruction, or [`SimError::PcOutOfRange`] / [`SimError::MisalignedPc`].
    pub fn fetch(&self, pc: i32) -> Result<Instruction, SimError> {
        let out_of_range = || SimError::PcOutOfRange {
            pc,
            base: self.base,
            end: self.end(),
        };
        let offset = pc.checked_sub(self.base).filter(|o| *o >= 0).ok_or_else(out_of_range)?;
        if offset % INSTRUCTION_SIZE != 0 {
            return Err(SimError::MisalignedPc { pc });
        }
        let index = (offset / INSTRUCTION_SIZE) as usize;
        self.instructions.get(index).copied().ok_or_else(out_of_range)
    }
}

/// Word-addressed data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates `size` words of zeroed memory.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the memory has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in address order.
    pub fn as_slice(&self) -> &[i32] {
        &self.words
    }

    /// Index of `address`, if it lies inside memory.
    fn index(&self, address: i32) -> Option<usize> {
        usize::try_from(address).ok().filter(|i| *i < self.words.len())
    }

    /// Reads the word at `address` on behalf of the instruction at `pc`.
    pub fn read(&self, pc: i32, address: i32) -> Result<i32, SimError> {
        self.index(address)
            .map(|i| self.words[i])
            .ok_or(SimError::MemoryOutOfRange {
                pc,
                address,
                size: self.words.len(),
            })
    }

    /// Writes `value` to `address` on behalf of the instruction at `pc`.
    pub fn write(&mut self, pc: i32, address: i32, value: i32) -> Result<(), SimError> {
        let size = self.words.len();
        let i = self
            .index(address)
            .ok_or(SimError::MemoryOutOfRange { pc, address, size })?;
        self.words[i] = value;
        Ok(())
    }

    /// Reads a word without attributing the access to an instruction.
    ///
    /// Used by tests and memory dumps; returns `None` outside memory.
    pub fn peek(&self, address: i32) -> Option<i32> {
        self.index(address).map(|i| self.words[i])
    }

    /// Writes a word before the run starts.
    pub fn poke(&mut self, address: i32, value: i32) -> Result<(), SimError> {
        self.write(-1, address, value)
    }
}
