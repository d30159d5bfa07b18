//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It
//! commits results to the register file, counts the instruction as completed,
//! and reports when `HALT` retires.

use crate::core::Cpu;
use crate::core::pipeline::latches::StageLatch;
use crate::isa::Opcode;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latch` - The Writeback latch at the start of the cycle
///
/// # Returns
///
/// `true` if the instruction retired this cycle was `HALT`.
///
/// # Behavior
///
/// - Writes the post-incremented base of `LOADP`/`STOREP` to `rs1`
/// - Then writes the result buffer to `rd` for register-producing opcodes
/// - Counts every valid instruction, `HALT` included, as completed
pub fn wb_stage(cpu: &mut Cpu, latch: &StageLatch) -> bool {
    if latch.stall || !latch.valid {
        return false;
    }
    let insn = &latch.insn;

    if let Some(base) = insn.base_destination() {
        cpu.regs.write(base, latch.base_update);
    }
    if let Some(rd) = insn.destination() {
        cpu.regs.write(rd, latch.result_buffer);
    }

    cpu.completed += 1;
    cpu.stats.record_retire(insn.opcode.class());
    tracing::debug!(pc = latch.pc, insn = %insn, "writeback");

    insn.opcode == Opcode::Halt
}
