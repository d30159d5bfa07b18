use std::io::Write;

use apex_core::common::error::{LoadError, SimError};
use apex_core::config::Config;
use apex_core::sim::{RunControl, Simulator, StepDecision, StopReason, loader, trace};

use crate::common::harness::TestContext;

const ADD_PROGRAM: &str = "MOVC,R1,#5\nMOVC,R2,#10\nADD,R3,R1,R2\nHALT\n";

/// Steps a fixed number of cycles, then quits; records what it observed.
struct Script {
    budget: u64,
    asked: Vec<u64>,
    observed: Vec<(u64, Vec<String>)>,
}

impl Script {
    fn new(budget: u64) -> Self {
        Self {
            budget,
            asked: Vec::new(),
            observed: Vec::new(),
        }
    }
}

impl RunControl for Script {
    fn before_cycle(&mut self, cycle: u64) -> StepDecision {
        self.asked.push(cycle);
        if self.asked.len() as u64 > self.budget {
            StepDecision::Quit
        } else {
            StepDecision::Continue
        }
    }

    fn after_cycle(&mut self, sim: &Simulator) {
        self.observed
            .push((sim.clock(), trace::format_pipeline(sim.latches())));
    }
}

fn program() -> Vec<apex_core::isa::Instruction> {
    loader::parse_program(ADD_PROGRAM, 16).unwrap()
}

#[test]
fn free_run_reaches_halt() {
    let mut ctx = TestContext::new(ADD_PROGRAM);
    let summary = ctx.run();
    assert_eq!(summary.reason, StopReason::Halted);
    assert_eq!((summary.cycles, summary.instructions), (9, 4));
    assert!(ctx.sim.is_halted());
    assert_eq!(ctx.sim.summary(StopReason::Halted), summary);
}

#[test]
fn single_step_asks_before_every_cycle() {
    let mut config = Config::default();
    config.general.single_step = true;
    let mut sim = Simulator::new(program(), &config).unwrap();
    let mut script = Script::new(3);

    let summary = sim.run(&mut script).unwrap();
    assert_eq!(summary.reason, StopReason::UserQuit);
    assert_eq!(summary.cycles, 3);
    assert_eq!(script.asked, vec![1, 2, 3, 4]);
    assert!(script.observed.is_empty(), "stage tracing is off");

    // The machine resumes where it stopped.
    let summary = sim.run(&mut Script::new(u64::MAX)).unwrap();
    assert_eq!(summary.reason, StopReason::Halted);
    assert_eq!(sim.register(3), 15);
}

#[test]
fn trace_stages_shows_every_cycle() {
    let mut config = Config::default();
    config.general.trace_stages = true;
    let mut sim = Simulator::new(program(), &config).unwrap();
    let mut script = Script::new(0);

    let summary = sim.run(&mut script).unwrap();
    assert!(script.asked.is_empty(), "not single stepping");
    assert_eq!(script.observed.len() as u64, summary.cycles);
    let (clock, first) = &script.observed[0];
    assert_eq!(*clock, 1);
    assert_eq!(first.len(), 5);
    assert!(first[1].contains("MOVC,R1,#5"), "cycle 1 Decode row: {}", first[1]);
}

#[test]
fn cycle_limit_stops_early() {
    let mut config = Config::default();
    config.general.max_cycles = Some(4);
    let mut ctx = TestContext::with_config(ADD_PROGRAM, config);
    let summary = ctx.run();
    assert_eq!(summary.reason, StopReason::CycleLimit);
    assert_eq!(summary.cycles, 4);
    assert!(summary.instructions < 4);
}

#[test]
fn builds_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ADD_PROGRAM.as_bytes()).unwrap();
    let mut sim = Simulator::from_file(file.path(), &Config::default()).unwrap();
    let _ = sim.run(&mut apex_core::sim::FreeRun).unwrap();
    assert_eq!(sim.register(3), 15);
    assert_eq!(sim.pc(), sim.cpu.code.end());
}

#[test]
fn construction_failures() {
    let dir = tempfile::tempdir().unwrap();
    let err = Simulator::from_file(&dir.path().join("none.asm"), &Config::default()).unwrap_err();
    assert!(matches!(err, SimError::Load(LoadError::Io { .. })));

    assert!(matches!(
        Simulator::new(Vec::new(), &Config::default()),
        Err(SimError::EmptyProgram)
    ));
}

#[test]
fn memory_can_be_seeded_before_running() {
    let mut ctx = TestContext::new("MOVC,R1,#3\nLOAD,R2,R1,#0\nHALT");
    ctx.sim.data_memory_mut().poke(3, 77).unwrap();
    let _ = ctx.run();
    assert_eq!(ctx.reg(2), 77);
    assert_eq!(ctx.sim.config().machine.data_memory_size, 4000);
}
