//! Statistics counters checked against programs with known behavior.

use apex_core::isa::InstructionClass;
use apex_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::harness::TestContext;

#[test]
fn instruction_mix_of_counted_loop() {
    let mut ctx = TestContext::new(
        "MOVC,R1,#3
         MOVC,R2,#0
         ADDL,R2,R2,#5
         SUBL,R1,R1,#1
         BNZ,#-8
         HALT",
    );
    let summary = ctx.run();
    let stats = ctx.sim.stats();

    assert_eq!(stats.cycles, summary.cycles);
    assert_eq!(stats.instructions_retired, 12);
    assert_eq!(stats.inst_alu, 8);
    assert_eq!(stats.inst_branch, 3);
    assert_eq!(stats.inst_system, 1);
    assert_eq!(stats.inst_load + stats.inst_store + stats.inst_control, 0);
    assert_eq!(stats.branches_taken, 2);
    assert!((stats.prediction_accuracy() - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn memory_and_control_classes() {
    let mut ctx = TestContext::new(
        "MOVC,R1,#8
         STORE,R1,R1,#0
         LOADP,R2,R1,#0
         MOVC,R5,#4024
         JALR,R6,R5,#0
         MOVC,R7,#1
         HALT",
    );
    let _ = ctx.run();
    let stats = ctx.sim.stats();
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_control, 1);
    assert_eq!(stats.flushes, 1);
    assert_eq!(ctx.reg(7), 0, "skipped by JALR");
}

#[test]
fn stall_counters_match_cycle_overhead() {
    let mut ctx = TestContext::new(
        "MOVC,R1,#0
         SUBL,R2,R1,#0
         BZ,#8
         MOVC,R3,#1
         MOVC,R4,#1
         HALT",
    );
    let summary = ctx.run();
    let stats = ctx.sim.stats();
    assert_eq!(
        summary.cycles,
        summary.instructions + 4 + stats.stalls_data + 2 * stats.flushes
    );
    assert_eq!(stats.stalls_data, 1);
    assert_eq!(stats.flushes, 1);
    assert_eq!(stats.stalls_control, stats.flushes);
    assert_eq!(ctx.reg(3), 0);
}

#[test]
fn record_retire_counts_by_class() {
    let mut stats = SimStats::default();
    stats.record_retire(InstructionClass::Load);
    stats.record_retire(InstructionClass::Load);
    stats.record_retire(InstructionClass::Control);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.inst_load, 2);
    assert_eq!(stats.inst_control, 1);
}

#[test]
fn accuracy_without_branches_is_zero() {
    assert_eq!(SimStats::default().prediction_accuracy(), 0.0);
}

#[test]
fn report_sections_print() {
    let mut ctx = TestContext::new("MOVC,R1,#1\nHALT");
    let _ = ctx.run();
    ctx.sim.stats().print();
    let only: Vec<String> = STATS_SECTIONS[..2].iter().map(|s| (*s).to_owned()).collect();
    ctx.sim.stats().print_sections(&only);
    assert_eq!(STATS_SECTIONS.len(), 4);
}
