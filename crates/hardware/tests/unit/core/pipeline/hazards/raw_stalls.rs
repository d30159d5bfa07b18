use apex_core::core::pipeline::hazards::{check_data_hazard, raw_dependency};
use apex_core::core::pipeline::latches::PipelineLatches;
use apex_core::isa::Opcode;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::builder::pipeline_state::LatchBuilder;
use crate::common::harness::TestContext;

#[rstest]
#[case::rs1(add(3, 1, 2), add(4, 3, 1), true)]
#[case::rs2(add(3, 1, 2), add(4, 1, 3), true)]
#[case::store_value(movc(2, 1), store(2, 1, 0), true)]
#[case::store_base(movc(1, 1), store(2, 1, 0), true)]
#[case::post_increment_base(storep(2, 1, 0), load(3, 1, 0), true)]
#[case::loadp_base(loadp(4, 1, 0), addl(5, 1, 1), true)]
#[case::unrelated(add(3, 1, 2), add(4, 5, 6), false)]
#[case::write_after_write(movc(3, 1), movc(3, 2), false)]
#[case::store_writes_no_register(store(3, 1, 0), add(4, 0, 3), false)]
#[case::compare_writes_no_register(cmp(1, 2), branch(Opcode::Bz, 8), false)]
#[case::r0_alu(movc(0, 1), addl(1, 0, 1), false)]
#[case::r0_load(load(0, 5, 0), addl(1, 0, 1), true)]
#[case::unread_field(movc(3, 1), movc(4, 0), false)]
fn dependency_table(
    #[case] producer: apex_core::isa::Instruction,
    #[case] consumer: apex_core::isa::Instruction,
    #[case] expected: bool,
) {
    assert_eq!(raw_dependency(&producer, &consumer), expected);
}

#[test]
fn hazard_sets_and_clears_both_stall_flags() {
    let mut latches = PipelineLatches {
        execute: LatchBuilder::new(movc(1, 5)).build(),
        decode: LatchBuilder::new(addl(2, 1, 1)).build(),
        ..PipelineLatches::reset()
    };
    assert!(check_data_hazard(&mut latches));
    assert!(latches.fetch.stall && latches.decode.stall);

    latches.execute = LatchBuilder::new(movc(1, 5)).invalid().build();
    assert!(!check_data_hazard(&mut latches));
    assert!(!latches.fetch.stall && !latches.decode.stall);
}

#[test]
fn empty_decode_never_stalls() {
    let mut latches = PipelineLatches {
        execute: LatchBuilder::new(load(1, 2, 0)).build(),
        ..PipelineLatches::reset()
    };
    latches.fetch.stall = true;
    assert!(!check_data_hazard(&mut latches));
    assert!(!latches.fetch.stall);
}

#[test]
fn stall_holds_the_consumer_in_decode() {
    let mut ctx = TestContext::new(
        "MOVC,R1,#5
         ADDL,R2,R1,#1
         HALT",
    );
    let _ = ctx.step(2);
    let latches = ctx.sim.latches();
    assert!(latches.decode.stall, "ADDL waits for MOVC in Execute");
    assert_eq!(latches.decode.pc, 4004);

    let _ = ctx.step(1);
    let latches = ctx.sim.latches();
    assert!(!latches.decode.stall);
    assert_eq!(latches.decode.pc, 4004, "still in Decode after the bubble");
    assert!(!latches.execute.valid, "bubble in Execute");
    assert_eq!(ctx.sim.pc(), 4008, "Fetch did not advance while stalled");
}

#[test]
fn chained_dependencies_stall_each_link() {
    let mut ctx = TestContext::new(
        "MOVC,R1,#1
         ADDL,R1,R1,#1
         ADDL,R1,R1,#1
         HALT",
    );
    let summary = ctx.run();
    assert_eq!(ctx.reg(1), 3);
    assert_eq!(ctx.sim.stats().stalls_data, 2);
    assert_eq!(summary.cycles, 10);
}
