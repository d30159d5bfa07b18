//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, flags, and the program counter.
//! 2. **Pipeline Control:** Owns the stage latches and the refetch-delay flag.
//! 3. **Memory:** Owns code memory and data memory.
//! 4. **Branch Prediction:** Owns the branch target buffer.

/// Code and data memory arrays.
pub mod memory;

use self::memory::{CodeMemory, DataMemory};
use crate::common::INSTRUCTION_SIZE;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::arch::flags::ConditionFlags;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::PipelineLatches;
use crate::core::units::bru::BranchUnit;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
///
/// Stages mutate disjoint parts of this state: Writeback writes registers,
/// Memory writes data memory, Execute writes flags and redirects the PC.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Program Counter (address of the next instruction to fetch).
    pub pc: i32,
    /// Condition flags.
    pub flags: ConditionFlags,
    /// Program storage.
    pub code: CodeMemory,
    /// Data storage.
    pub data: DataMemory,
    /// Branch target buffer and its update policy.
    pub branch_unit: BranchUnit,
    /// Stage latches at the current cycle boundary.
    pub latches: PipelineLatches,
    /// Fetch must idle one cycle before fetching at the redirected PC.
    pub fetch_from_next_cycle: bool,
    /// Cycles executed.
    pub clock: u64,
    /// Instructions retired by Writeback (HALT included).
    pub completed: u64,
    /// HALT has retired.
    pub halted: bool,
    /// A cycle failed with a fatal error; the machine is stopped.
    pub faulted: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with `program` loaded at the configured code base.
    ///
    /// # Arguments
    ///
    /// * `program` - The decoded instructions, in address order.
    /// * `config` - The simulator configuration parameters.
    ///
    /// # Returns
    ///
    /// A reset CPU, or a [`SimError`] if the configuration is invalid, the
    /// program is empty, or an instruction names a register outside the file.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        if program.is_empty() {
            return Err(SimError::EmptyProgram);
        }

        let machine = &config.machine;
        let code = CodeMemory::new(machine.code_base, program);
        let count = machine.register_count;
        for (slot, insn) in code.instructions().iter().enumerate() {
            if let Some(index) = insn.referenced_registers().find(|r| *r >= count) {
                let slot = i32::try_from(slot).unwrap_or(i32::MAX);
                let pc = machine
                    .code_base
                    .saturating_add(slot.saturating_mul(INSTRUCTION_SIZE));
                return Err(SimError::RegisterOutOfRange { pc, index, count });
            }
        }

        tracing::info!(
            instructions = code.len(),
            code_base = machine.code_base,
            registers = count,
            data_words = machine.data_memory_size,
            btb_entries = config.pipeline.btb_size,
            "cpu reset"
        );

        Ok(Self {
            regs: Gpr::new(count),
            pc: machine.code_base,
            flags: ConditionFlags::default(),
            code,
            data: DataMemory::new(machine.data_memory_size),
            branch_unit: BranchUnit::new(config),
            latches: PipelineLatches::reset(),
            fetch_from_next_cycle: false,
            clock: 0,
            completed: 0,
            halted: false,
            faulted: false,
            stats: SimStats::default(),
        })
    }
}
