//! Cycle driver.
//!
//! One call to [`tick`] advances the machine by exactly one clock cycle:
//! 1. **Snapshot:** The current latches are taken out of the CPU.
//! 2. **Stages:** Writeback, Memory, Execute, Decode and Fetch run in that order,
//!    each reading its own latch from the snapshot and writing the next set.
//! 3. **Hazards:** The data hazard unit recomputes the front-end stall flags.
//! 4. **Commit:** The new latches replace the old ones and the clock advances.
//!
//! A failing stage aborts the whole cycle: every piece of state the stages may
//! have touched is rolled back to the cycle boundary and the machine stops.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::arch::flags::ConditionFlags;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{PipelineLatches, StageLatch};
use crate::core::units::bru::BranchUnit;
use crate::stats::SimStats;
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};

/// Machine status after a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// More cycles are needed.
    Running,
    /// `HALT` has retired; further cycles do nothing.
    Halted,
    /// An earlier cycle failed; further cycles do nothing.
    Faulted,
}

/// State the stages may mutate during one cycle, captured at the cycle boundary.
#[derive(Debug)]
struct Checkpoint {
    regs: Gpr,
    flags: ConditionFlags,
    pc: i32,
    fetch_from_next_cycle: bool,
    completed: u64,
    stats: SimStats,
    branch_unit: BranchUnit,
    /// Address and prior value of the word a store in Memory will overwrite.
    store: Option<(i32, i32)>,
}

impl Checkpoint {
    fn take(cpu: &Cpu, memory: &StageLatch) -> Self {
        let store = memory
            .instruction()
            .filter(|insn| insn.opcode.is_store())
            .and_then(|_| {
                let address = memory.memory_address;
                cpu.data.peek(address).map(|old| (address, old))
            });
        Self {
            regs: cpu.regs.clone(),
            flags: cpu.flags,
            pc: cpu.pc,
            fetch_from_next_cycle: cpu.fetch_from_next_cycle,
            completed: cpu.completed,
            stats: cpu.stats.clone(),
            branch_unit: cpu.branch_unit.clone(),
            store,
        }
    }

    fn restore(self, cpu: &mut Cpu) {
        cpu.regs = self.regs;
        cpu.flags = self.flags;
        cpu.pc = self.pc;
        cpu.fetch_from_next_cycle = self.fetch_from_next_cycle;
        cpu.completed = self.completed;
        cpu.stats = self.stats;
        cpu.branch_unit = self.branch_unit;
        if let Some((address, old)) = self.store {
            // Peeked above, so the address is inside memory.
            let _ = cpu.data.poke(address, old);
        }
    }
}

/// Runs the five stages on `current`, building `next`.
///
/// Returns `true` if `HALT` retired in Writeback.
fn run_stages(
    cpu: &mut Cpu,
    current: &PipelineLatches,
    next: &mut PipelineLatches,
) -> Result<bool, SimError> {
    let halted = wb_stage(cpu, &current.writeback);
    mem_stage(cpu, &current.memory, next)?;
    let flushed = execute_stage(cpu, &current.execute, next)?;
    decode_stage(cpu, &current.decode, flushed, next);
    fetch_stage(cpu, next)?;
    Ok(halted)
}

/// Simulates one clock cycle.
///
/// # Arguments
///
/// * `cpu` - The machine to advance.
///
/// # Returns
///
/// [`CycleOutcome::Halted`] once `HALT` has retired (on that cycle and every
/// later call, which changes nothing), [`CycleOutcome::Running`] otherwise.
/// A [`SimError`] aborts the cycle: registers, data memory, flags, PC, BTB,
/// counters and latches are left as they were at the start of the cycle, the
/// clock does not advance, and every later call returns
/// [`CycleOutcome::Faulted`] without changing anything.
pub fn tick(cpu: &mut Cpu) -> Result<CycleOutcome, SimError> {
    if cpu.halted {
        return Ok(CycleOutcome::Halted);
    }
    if cpu.faulted {
        return Ok(CycleOutcome::Faulted);
    }

    let checkpoint = Checkpoint::take(cpu, &cpu.latches.memory);
    let current = std::mem::take(&mut cpu.latches);
    let mut next = PipelineLatches {
        fetch: current.fetch.clone(),
        ..PipelineLatches::default()
    };

    let halted = match run_stages(cpu, &current, &mut next) {
        Ok(halted) => halted,
        Err(e) => {
            tracing::error!(cycle = cpu.clock + 1, error = %e, "cycle aborted");
            checkpoint.restore(cpu);
            cpu.latches = current;
            cpu.faulted = true;
            return Err(e);
        }
    };

    if hazards::check_data_hazard(&mut next) {
        cpu.stats.stalls_data += 1;
    }
    cpu.latches = next;
    cpu.clock += 1;
    cpu.stats.cycles = cpu.clock;

    if halted {
        cpu.halted = true;
        tracing::info!(cycles = cpu.clock, completed = cpu.completed, "halt retired");
        return Ok(CycleOutcome::Halted);
    }
    Ok(CycleOutcome::Running)
}
