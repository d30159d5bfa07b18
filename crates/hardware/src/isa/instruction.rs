//! Decoded APEX instruction.
//!
//! Instructions are produced once by the loader and copied into pipeline
//! latches by value; nothing mutates them afterwards.

use super::opcode::Opcode;

/// A decoded program instruction.
///
/// Register fields that the opcode does not use are ignored by every stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register index.
    pub rd: usize,
    /// First source register index (the base register for memory operations).
    pub rs1: usize,
    /// Second source register index (the stored value for `STORE`/`STOREP`).
    pub rs2: usize,
    /// Signed literal.
    pub imm: i32,
}

impl Instruction {
    /// Builds an instruction from its fields.
    pub const fn new(opcode: Opcode, rd: usize, rs1: usize, rs2: usize, imm: i32) -> Self {
        Self {
            opcode,
            rd,
            rs1,
            rs2,
            imm,
        }
    }

    /// Registers this instruction reads in Decode, first `rs1` then `rs2`.
    pub fn source_registers(&self) -> impl Iterator<Item = usize> {
        let rs1 = self.opcode.reads_rs1().then_some(self.rs1);
        let rs2 = self.opcode.reads_rs2().then_some(self.rs2);
        rs1.into_iter().chain(rs2)
    }

    /// Register that receives the result buffer in Writeback.
    pub const fn destination(&self) -> Option<usize> {
        if self.opcode.writes_rd() {
            Some(self.rd)
        } else {
            None
        }
    }

    /// Base register updated by a post-increment memory operation.
    pub const fn base_destination(&self) -> Option<usize> {
        if self.opcode.post_increments() {
            Some(self.rs1)
        } else {
            None
        }
    }

    /// Every register index named by the instruction's format.
    ///
    /// Used to reject programs that reference registers outside the file.
    pub fn referenced_registers(&self) -> impl Iterator<Item = usize> {
        let rd = self.opcode.writes_rd().then_some(self.rd);
        rd.into_iter().chain(self.source_registers())
    }

    /// Whether this instruction writes `reg` in Writeback (either destination).
    pub fn writes_register(&self, reg: usize) -> bool {
        self.destination() == Some(reg) || self.base_destination() == Some(reg)
    }
}
