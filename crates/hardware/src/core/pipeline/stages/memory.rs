//! Memory Access (MEM) Stage.
//!
//! Loads read the word at the effective address computed by Execute into the
//! result buffer; stores write `rs2_value` there. Every other instruction
//! passes through unchanged.

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::{PipelineLatches, StageLatch};

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latch` - The Memory latch at the start of the cycle
/// * `next` - Latches being built for the next cycle; receives the Writeback input
///
/// # Returns
///
/// [`SimError::MemoryOutOfRange`] if a load or store addresses a word outside data memory.
pub fn mem_stage(
    cpu: &mut Cpu,
    latch: &StageLatch,
    next: &mut PipelineLatches,
) -> Result<(), SimError> {
    if latch.stall || !latch.valid {
        return Ok(());
    }
    let mut out = latch.clone();
    let op = out.insn.opcode;

    if op.is_load() {
        out.result_buffer = cpu.data.read(out.pc, out.memory_address)?;
        tracing::debug!(pc = out.pc, address = out.memory_address, value = out.result_buffer, "load");
    } else if op.is_store() {
        cpu.data.write(out.pc, out.memory_address, out.rs2_value)?;
        tracing::debug!(pc = out.pc, address = out.memory_address, value = out.rs2_value, "store");
    }

    next.writeback = out;
    Ok(())
}
