//! Instruction disassembler.
//!
//! Renders an [`Instruction`] back into the text form accepted by the loader,
//! e.g. `ADD,R3,R1,R2` or `STORE,R1,R2,#8`. Used by the trace renderer and
//! in log messages.

use std::fmt;

use super::instruction::Instruction;
use super::opcode::Format;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        match op.format() {
            Format::ThreeReg => write!(f, "{op},R{},R{},R{}", self.rd, self.rs1, self.rs2),
            Format::RegRegImm => write!(f, "{op},R{},R{},#{}", self.rd, self.rs1, self.imm),
            Format::Store => write!(f, "{op},R{},R{},#{}", self.rs2, self.rs1, self.imm),
            Format::DestImm => write!(f, "{op},R{},#{}", self.rd, self.imm),
            Format::SourceImm => write!(f, "{op},R{},#{}", self.rs1, self.imm),
            Format::TwoSource => write!(f, "{op},R{},R{}", self.rs1, self.rs2),
            Format::Imm => write!(f, "{op},#{}", self.imm),
            Format::Bare => write!(f, "{op}"),
        }
    }
}
