//! Instruction Decode (ID) Stage.
//!
//! Reads the source operands of the instruction in the Decode latch from the
//! register file, overrides them with values forwarded from the instructions
//! that left Execute and Memory this cycle, and hands the result to Execute.

use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{PipelineLatches, StageLatch};

/// Executes the decode stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Reference to the CPU state (registers are read only)
/// * `latch` - The Decode latch at the start of the cycle
/// * `flushed` - Execute redirected the PC this cycle; the instruction is discarded
/// * `next` - Latches being built for the next cycle; receives the Execute input
///
/// A stalled instruction is carried over unchanged.
pub fn decode_stage(cpu: &Cpu, latch: &StageLatch, flushed: bool, next: &mut PipelineLatches) {
    if flushed {
        if latch.valid {
            tracing::debug!(pc = latch.pc, insn = %latch.insn, "decode flushed");
        }
        return;
    }
    if latch.stall {
        next.decode = latch.clone();
        return;
    }
    if !latch.valid {
        return;
    }

    let mut out = latch.clone();
    let insn = out.insn;
    if insn.opcode.reads_rs1() {
        out.rs1_value = cpu.regs.read(insn.rs1);
    }
    if insn.opcode.reads_rs2() {
        out.rs2_value = cpu.regs.read(insn.rs2);
    }
    hazards::forward_operands(&next.memory, &next.writeback, &mut out);

    tracing::debug!(
        pc = out.pc,
        insn = %insn,
        rs1 = out.rs1_value,
        rs2 = out.rs2_value,
        "decode"
    );
    next.execute = out;
}
