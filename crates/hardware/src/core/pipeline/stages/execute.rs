//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Computation:** ALU operations, `MOVC`, and the flags they affect.
//! 2. **Address Generation:** Effective addresses and post-increment bases for memory operations.
//! 3. **Comparison:** Three-way compares that leave exactly one flag set.
//! 4. **Control Resolution:** Branch outcomes, misprediction recovery, and jumps.

use crate::common::constants::{INSTRUCTION_SIZE, POST_INCREMENT};
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::arch::flags::ConditionFlags;
use crate::core::pipeline::latches::{PipelineLatches, StageLatch};
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::bru::BranchPredictor;
use crate::isa::Opcode;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
/// * `latch` - The Execute latch at the start of the cycle
/// * `next` - Latches being built for the next cycle; receives the Memory input
///
/// # Returns
///
/// `Ok(true)` if the PC was redirected and the instruction in Decode must be
/// discarded, `Ok(false)` otherwise, or [`SimError::DivideByZero`].
pub fn execute_stage(
    cpu: &mut Cpu,
    latch: &StageLatch,
    next: &mut PipelineLatches,
) -> Result<bool, SimError> {
    if latch.stall || !latch.valid {
        return Ok(false);
    }
    let mut out = latch.clone();
    let insn = out.insn;
    let mut redirect = None;

    if let Some(op) = AluOp::from_opcode(insn.opcode) {
        let rhs = if insn.opcode.reads_rs2() {
            out.rs2_value
        } else {
            insn.imm
        };
        out.result_buffer =
            Alu::execute(op, out.rs1_value, rhs).ok_or(SimError::DivideByZero { pc: out.pc })?;
    }

    match insn.opcode {
        Opcode::Movc => out.result_buffer = insn.imm,
        Opcode::Load | Opcode::Loadp | Opcode::Store | Opcode::Storep => {
            out.memory_address = out.rs1_value.wrapping_add(insn.imm);
            out.base_update = out.rs1_value.wrapping_add(POST_INCREMENT);
        }
        Opcode::Cmp => cpu.flags = ConditionFlags::compare(out.rs1_value, out.rs2_value),
        Opcode::Cml => cpu.flags = ConditionFlags::compare(out.rs1_value, insn.imm),
        Opcode::Bz | Opcode::Bnz | Opcode::Bp | Opcode::Bnp | Opcode::Bn | Opcode::Bnn => {
            redirect = resolve_branch(cpu, &out);
        }
        Opcode::Jump => redirect = Some(out.rs1_value.wrapping_add(insn.imm)),
        Opcode::Jalr => {
            out.result_buffer = out.pc.wrapping_add(INSTRUCTION_SIZE);
            redirect = Some(out.rs1_value.wrapping_add(insn.imm));
        }
        Opcode::Add
        | Opcode::Addl
        | Opcode::Sub
        | Opcode::Subl
        | Opcode::Mul
        | Opcode::Div
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Halt
        | Opcode::Nop => {}
    }

    if insn.opcode.sets_zero_flag() {
        cpu.flags.set_zero_from(out.result_buffer);
    }

    tracing::debug!(pc = out.pc, insn = %insn, result = out.result_buffer, "execute");
    next.memory = out;

    match redirect {
        Some(target) => {
            redirect_fetch(cpu, next, target);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Resolves a conditional branch against the current flags.
///
/// Trains the predictor and compares the outcome with the direction Fetch
/// predicted.
///
/// # Returns
///
/// The address Fetch must restart from, or `None` if the prediction was right.
fn resolve_branch(cpu: &mut Cpu, latch: &StageLatch) -> Option<i32> {
    let insn = latch.insn;
    let condition = insn.opcode.branch_condition()?;
    let taken = condition.holds(cpu.flags);
    let target = latch.pc.wrapping_add(insn.imm);

    if insn.opcode.is_predicted() {
        cpu.branch_unit.update_branch(latch.pc, taken, target);
    }
    if taken {
        cpu.stats.branches_taken += 1;
    }

    if taken == latch.predicted_taken {
        cpu.stats.branch_predictions += 1;
        return None;
    }
    cpu.stats.branch_mispredictions += 1;
    tracing::debug!(pc = latch.pc, taken, predicted = latch.predicted_taken, "branch mispredicted");

    if taken {
        Some(target)
    } else {
        Some(latch.pc.wrapping_add(INSTRUCTION_SIZE))
    }
}

/// Points Fetch at `target` after a one-cycle delay and re-enables it.
fn redirect_fetch(cpu: &mut Cpu, next: &mut PipelineLatches, target: i32) {
    cpu.pc = target;
    cpu.fetch_from_next_cycle = true;
    cpu.stats.flushes += 1;
    next.fetch = StageLatch {
        valid: true,
        ..StageLatch::default()
    };
    tracing::debug!(target, "redirect");
}
