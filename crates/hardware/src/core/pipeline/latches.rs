//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the latch carried by each of the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** Every latch carries the instruction, its operands and results.
//! 2. **Double Buffering:** A cycle reads one [`PipelineLatches`] and builds the next.
//! 3. **Prediction Metadata:** The direction Fetch predicted travels with the branch.

use crate::isa::Instruction;

/// Per-stage pipeline latch.
///
/// `valid` is the only authority on whether the owning stage acts on the
/// contents; an invalid latch may still hold stale fields. On the Fetch latch
/// `valid` means "fetching is enabled".
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct StageLatch {
    /// The stage holds an instruction to process.
    pub valid: bool,
    /// The stage must not advance this cycle.
    pub stall: bool,
    /// Address of the instruction.
    pub pc: i32,
    /// Copy of the instruction.
    pub insn: Instruction,
    /// Operand read (or forwarded) for `rs1`.
    pub rs1_value: i32,
    /// Operand read (or forwarded) for `rs2`.
    pub rs2_value: i32,
    /// Value destined for `rd` (ALU result, loaded word, link address).
    pub result_buffer: i32,
    /// Effective data memory address of a load or store.
    pub memory_address: i32,
    /// Post-incremented base (`rs1 + 4`) for `LOADP` and `STOREP`.
    pub base_update: i32,
    /// Fetch steered toward the BTB target for this branch.
    pub predicted_taken: bool,
    /// Address Fetch continued from after this instruction.
    pub predicted_target: i32,
}

impl StageLatch {
    /// A valid latch holding `insn` fetched from `pc`.
    pub fn holding(pc: i32, insn: Instruction) -> Self {
        Self {
            valid: true,
            pc,
            insn,
            ..Self::default()
        }
    }

    /// The instruction, if the latch is valid.
    pub fn instruction(&self) -> Option<&Instruction> {
        self.valid.then_some(&self.insn)
    }
}

/// Named pipeline stages, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and register read.
    Decode,
    /// ALU, address generation and branch resolution.
    Execute,
    /// Data memory access.
    Memory,
    /// Register writeback and retirement.
    Writeback,
}

impl Stage {
    /// All stages in program order.
    pub const ALL: [Self; 5] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
    ];

    /// Display name used by traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode/RF",
            Self::Execute => "Execute",
            Self::Memory => "Memory",
            Self::Writeback => "Writeback",
        }
    }
}

/// One latch per stage.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct PipelineLatches {
    /// Fetch control and the last fetched instruction.
    pub fetch: StageLatch,
    /// Instruction waiting to be decoded.
    pub decode: StageLatch,
    /// Instruction waiting to execute.
    pub execute: StageLatch,
    /// Instruction waiting for data memory.
    pub memory: StageLatch,
    /// Instruction waiting to retire.
    pub writeback: StageLatch,
}

impl PipelineLatches {
    /// Latches of a freshly reset machine: fetching enabled, everything else empty.
    pub fn reset() -> Self {
        Self {
            fetch: StageLatch {
                valid: true,
                ..StageLatch::default()
            },
            ..Self::default()
        }
    }

    /// Latch owned by `stage`.
    pub const fn get(&self, stage: Stage) -> &StageLatch {
        match stage {
            Stage::Fetch => &self.fetch,
            Stage::Decode => &self.decode,
            Stage::Execute => &self.execute,
            Stage::Memory => &self.memory,
            Stage::Writeback => &self.writeback,
        }
    }

    /// Returns `true` if no stage past Fetch holds an instruction.
    pub const fn is_drained(&self) -> bool {
        !(self.decode.valid || self.execute.valid || self.memory.valid || self.writeback.valid)
    }
}
