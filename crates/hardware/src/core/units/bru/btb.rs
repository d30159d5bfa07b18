//! Branch Target Buffer (BTB).
//!
//! The BTB is a small fully associative table that remembers, per branch
//! address, the last two outcomes and the taken target. Fetch scans it by the
//! current PC to decide whether to steer toward the stored target.
//!
//! Unused entries hold the sentinel address `-1` in both the tag and the
//! target, with history `0`.

use crate::common::constants::{BTB_EMPTY_ADDRESS, BTB_HISTORY_MASK};
use crate::isa::Opcode;

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BtbEntry {
    /// Address of the branch this entry describes, or `-1`.
    pub tag: i32,
    /// Last two outcomes, newest in bit 0 (1 = taken).
    pub history: u8,
    /// Taken target of the branch, or `-1`.
    pub target: i32,
}

impl Default for BtbEntry {
    fn default() -> Self {
        Self {
            tag: BTB_EMPTY_ADDRESS,
            history: 0,
            target: BTB_EMPTY_ADDRESS,
        }
    }
}

impl BtbEntry {
    /// Returns `true` if the entry holds no branch.
    pub const fn is_empty(&self) -> bool {
        self.tag == BTB_EMPTY_ADDRESS && self.target == BTB_EMPTY_ADDRESS
    }

    /// Direction predicted for a branch of kind `opcode` from this entry's history.
    ///
    /// `BNZ` and `BP` are predicted taken if either recorded outcome was taken.
    /// `BZ` and `BNP` are predicted taken only while no taken outcome is
    /// recorded. All other opcodes are never predicted taken.
    pub const fn predicts_taken(&self, opcode: Opcode) -> bool {
        let history = self.history & BTB_HISTORY_MASK;
        match opcode {
            Opcode::Bnz | Opcode::Bp => history != 0,
            // Both bits must be clear; a single taken outcome already flips it.
            Opcode::Bz | Opcode::Bnp => history == 0,
            _ => false,
        }
    }
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
    /// Slot replaced by the next insertion into a full table.
    next_victim: usize,
}

impl Btb {
    /// Creates an empty Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size],
            next_victim: 0,
        }
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// All slots, in table order.
    pub fn entries(&self) -> &[BtbEntry] {
        &self.table
    }

    /// Scans the table for the entry tagged with `pc`.
    ///
    /// # Returns
    ///
    /// The matching entry, or `None` if the address is not recorded.
    pub fn lookup(&self, pc: i32) -> Option<&BtbEntry> {
        if pc == BTB_EMPTY_ADDRESS {
            return None;
        }
        self.table.iter().find(|e| e.tag == pc)
    }

    /// Predicts the next fetch address for a branch at `pc`.
    ///
    /// # Returns
    ///
    /// The stored target if the entry exists and predicts taken, otherwise `None`.
    pub fn predict(&self, pc: i32, opcode: Opcode) -> Option<i32> {
        self.lookup(pc)
            .filter(|e| e.predicts_taken(opcode))
            .map(|e| e.target)
    }

    /// Records a resolved branch.
    ///
    /// An existing entry has `taken` shifted into its history. A new branch
    /// takes the first empty slot, or the oldest inserted slot when the table
    /// is full.
    ///
    /// # Arguments
    ///
    /// * `pc` - The address of the branch.
    /// * `taken` - The resolved direction.
    /// * `target` - The taken target (`pc + imm`), stored regardless of direction.
    pub fn update(&mut self, pc: i32, taken: bool, target: i32) {
        if self.table.is_empty() {
            return;
        }
        let bit = u8::from(taken);
        if let Some(entry) = self.table.iter_mut().find(|e| e.tag == pc) {
            entry.history = ((entry.history << 1) | bit) & BTB_HISTORY_MASK;
            entry.target = target;
            return;
        }

        let slot = match self.table.iter().position(BtbEntry::is_empty) {
            Some(free) => free,
            None => {
                let victim = self.next_victim;
                self.next_victim = (victim + 1) % self.table.len();
                victim
            }
        };
        self.table[slot] = BtbEntry {
            tag: pc,
            history: bit,
            target,
        };
    }
}
