//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It performs:
//! 1. **Stall Handling:** A stalled front end only re-evaluates the hazard.
//! 2. **Redirect Delay:** Idles one cycle after Execute redirected the PC.
//! 3. **Prediction:** Steers predicted-taken branches to their BTB target.
//! 4. **Delivery:** Copies the fetched instruction into the Decode latch.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{PipelineLatches, StageLatch};
use crate::core::units::bru::BranchPredictor;
use crate::isa::Opcode;

/// Executes the fetch stage of the pipeline.
///
/// `next.fetch` holds the fetch control state carried into this cycle (or the
/// fresh state installed by a redirect in Execute).
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `next` - Latches being built for the next cycle; receives the Decode input
///
/// # Returns
///
/// [`SimError::PcOutOfRange`] or [`SimError::MisalignedPc`] if the PC does not
/// address an instruction.
pub fn fetch_stage(cpu: &mut Cpu, next: &mut PipelineLatches) -> Result<(), SimError> {
    if next.fetch.stall {
        let _ = hazards::check_data_hazard(next);
        return Ok(());
    }
    if !next.fetch.valid {
        return Ok(());
    }
    if cpu.fetch_from_next_cycle {
        cpu.fetch_from_next_cycle = false;
        cpu.stats.stalls_control += 1;
        return Ok(());
    }

    let pc = cpu.pc;
    let insn = cpu.code.fetch(pc)?;
    let mut fetched = StageLatch::holding(pc, insn);
    let sequential = pc.wrapping_add(INSTRUCTION_SIZE);

    cpu.pc = sequential;
    if insn.opcode.is_predicted() {
        cpu.stats.btb_lookups += 1;
        if cpu.branch_unit.btb.lookup(pc).is_some() {
            cpu.stats.btb_hits += 1;
        }
        if let Some(target) = cpu.branch_unit.predict_branch(pc, insn.opcode) {
            fetched.predicted_taken = true;
            cpu.pc = target;
        }
    }
    fetched.predicted_target = cpu.pc;
    tracing::debug!(pc, insn = %insn, next_pc = cpu.pc, "fetch");

    match insn.opcode {
        Opcode::Nop => {}
        Opcode::Halt => {
            next.decode = fetched.clone();
            fetched.valid = false;
        }
        _ => next.decode = fetched.clone(),
    }
    next.fetch = fetched;
    Ok(())
}
