use apex_core::config::Config;
use apex_core::core::pipeline::latches::StageLatch;
use apex_core::core::pipeline::stages::decode_stage;

use crate::common::builder::instruction::*;
use crate::common::builder::pipeline_state::LatchBuilder;
use crate::common::harness::{cpu_with, next_latches};

#[test]
fn reads_register_operands() {
    let mut cpu = cpu_with(vec![halt()], &Config::default());
    cpu.regs.write(1, 5);
    cpu.regs.write(2, -3);
    let mut next = next_latches(&cpu);
    let latch = LatchBuilder::new(add(3, 1, 2)).pc(4004).build();

    decode_stage(&cpu, &latch, false, &mut next);
    assert!(next.execute.valid);
    assert_eq!(next.execute.pc, 4004);
    assert_eq!((next.execute.rs1_value, next.execute.rs2_value), (5, -3));
}

#[test]
fn store_reads_base_and_value() {
    let mut cpu = cpu_with(vec![halt()], &Config::default());
    cpu.regs.write(1, 100);
    cpu.regs.write(2, 7);
    let mut next = next_latches(&cpu);
    decode_stage(&cpu, &LatchBuilder::new(store(2, 1, 4)).build(), false, &mut next);
    assert_eq!(next.execute.rs1_value, 100, "rs1 is the base");
    assert_eq!(next.execute.rs2_value, 7, "rs2 is the stored value");
}

#[test]
fn forwards_over_register_file() {
    let mut cpu = cpu_with(vec![halt()], &Config::default());
    cpu.regs.write(1, 5);
    let mut next = next_latches(&cpu);
    next.memory = LatchBuilder::new(movc(1, 0)).result(50).build();

    decode_stage(&cpu, &LatchBuilder::new(addl(2, 1, 1)).build(), false, &mut next);
    assert_eq!(next.execute.rs1_value, 50);
}

#[test]
fn flushed_instruction_is_dropped() {
    let cpu = cpu_with(vec![halt()], &Config::default());
    let mut next = next_latches(&cpu);
    decode_stage(&cpu, &LatchBuilder::new(movc(1, 1)).build(), true, &mut next);
    assert!(!next.execute.valid);
    assert!(!next.decode.valid);
}

#[test]
fn stalled_instruction_is_carried_over() {
    let cpu = cpu_with(vec![halt()], &Config::default());
    let mut next = next_latches(&cpu);
    let latch = LatchBuilder::new(addl(2, 1, 1)).pc(4004).stalled().build();
    decode_stage(&cpu, &latch, false, &mut next);
    assert_eq!(next.decode, latch);
    assert!(!next.execute.valid, "a bubble enters Execute");
}

#[test]
fn empty_latch_produces_nothing() {
    let cpu = cpu_with(vec![halt()], &Config::default());
    let mut next = next_latches(&cpu);
    decode_stage(&cpu, &StageLatch::default(), false, &mut next);
    assert!(!next.execute.valid);
}
