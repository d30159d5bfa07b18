//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Stalls Fetch and Decode while the instruction in Execute
//!    produces a register the instruction in Decode reads.
//! 2. **Operand Forwarding:** Bypasses the register file with values produced by the
//!    instructions that left Execute and Memory in the current cycle.

use crate::core::pipeline::latches::{PipelineLatches, StageLatch};
use crate::isa::Instruction;

/// Returns `true` if the producer in Execute blocks the consumer in Decode.
///
/// A dependency exists when the producer writes (as `rd` or as a post-incremented
/// base) a register the consumer actually reads. Writes to `R0` do not stall,
/// except the loaded value of a load: it is not available until Memory has run,
/// so it cannot be forwarded out of Execute.
///
/// # Arguments
///
/// * `producer` - Instruction in the Execute latch.
/// * `consumer` - Instruction in the Decode latch.
pub fn raw_dependency(producer: &Instruction, consumer: &Instruction) -> bool {
    consumer.source_registers().any(|src| {
        let loaded = producer.opcode.is_load() && producer.destination() == Some(src);
        producer.writes_register(src) && (src != 0 || loaded)
    })
}

/// Recomputes the Fetch and Decode stall flags.
///
/// If both the Execute and Decode latches are valid and the instruction in
/// Execute produces a register the one in Decode reads, both Fetch and Decode
/// are stalled. Otherwise both stall flags are cleared.
///
/// # Returns
///
/// `true` if the front end is stalled.
pub fn check_data_hazard(latches: &mut PipelineLatches) -> bool {
    let stall = match (latches.execute.instruction(), latches.decode.instruction()) {
        (Some(producer), Some(consumer)) => raw_dependency(producer, consumer),
        _ => false,
    };
    latches.fetch.stall = stall;
    latches.decode.stall = stall;
    tracing::trace!(
        stall,
        execute_pc = latches.execute.pc,
        decode_pc = latches.decode.pc,
        "hazard check"
    );
    stall
}

/// Applies the values carried by one downstream latch to a consumer's operands.
///
/// `include_result` is `false` for a load leaving Execute, whose result buffer
/// is not filled yet. The post-incremented base is applied before `rd` so that
/// `rd` wins when the two coincide, matching Writeback.
fn forward_from(source: &StageLatch, include_result: bool, consumer: &mut StageLatch) {
    let Some(producer) = source.instruction() else {
        return;
    };
    let insn = consumer.insn;

    let mut apply = |reg: usize, value: i32| {
        if insn.opcode.reads_rs1() && insn.rs1 == reg {
            consumer.rs1_value = value;
        }
        if insn.opcode.reads_rs2() && insn.rs2 == reg {
            consumer.rs2_value = value;
        }
    };

    if let Some(base) = producer.base_destination() {
        apply(base, source.base_update);
    }
    if include_result {
        if let Some(rd) = producer.destination() {
            apply(rd, source.result_buffer);
        }
    }
}

/// Overrides register-file operands with in-flight results.
///
/// # Arguments
///
/// * `ex_mem` - Latch just written by Execute (the younger producer).
/// * `mem_wb` - Latch just written by Memory (the older producer).
/// * `consumer` - The Decode output whose `rs1_value`/`rs2_value` were read
///   from the register file.
///
/// The older producer is applied first so the younger one wins.
pub fn forward_operands(ex_mem: &StageLatch, mem_wb: &StageLatch, consumer: &mut StageLatch) {
    forward_from(mem_wb, true, consumer);
    let ex_result_ready = !ex_mem.insn.opcode.is_load();
    forward_from(ex_mem, ex_result_ready, consumer);
}
