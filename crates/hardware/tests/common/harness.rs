use apex_core::common::error::SimError;
use apex_core::config::Config;
use apex_core::core::Cpu;
use apex_core::core::pipeline::CycleOutcome;
use apex_core::core::pipeline::latches::PipelineLatches;
use apex_core::isa::Instruction;
use apex_core::sim::{FreeRun, RunSummary, Simulator, loader};

/// Upper bound on cycles for programs expected to halt.
pub const CYCLE_CAP: u64 = 10_000;

pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    /// Builds a simulator from assembly text with the default configuration.
    pub fn new(source: &str) -> Self {
        Self::with_config(source, Config::default())
    }

    pub fn with_config(source: &str, config: Config) -> Self {
        let program = loader::parse_program(source, config.machine.register_count)
            .expect("test program should parse");
        Self::from_program(program, config)
    }

    pub fn from_program(program: Vec<Instruction>, mut config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        if config.general.max_cycles.is_none() {
            config.general.max_cycles = Some(CYCLE_CAP);
        }
        let sim = Simulator::new(program, &config).expect("simulator should build");
        Self { sim }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    pub fn set_mem(&mut self, address: i32, value: i32) {
        self.sim
            .data_memory_mut()
            .poke(address, value)
            .expect("address inside data memory");
    }

    pub fn mem(&self, address: i32) -> i32 {
        self.sim
            .data_memory()
            .peek(address)
            .expect("address inside data memory")
    }

    pub fn reg(&self, idx: usize) -> i32 {
        self.sim.register(idx)
    }

    /// Runs to completion, panicking on a fatal error.
    pub fn run(&mut self) -> RunSummary {
        self.try_run().expect("program should run without a fatal error")
    }

    pub fn try_run(&mut self) -> Result<RunSummary, SimError> {
        self.sim.run(&mut FreeRun)
    }

    /// Runs exactly `cycles` cycles (or fewer if the machine halts).
    pub fn step(&mut self, cycles: u64) -> CycleOutcome {
        let mut outcome = CycleOutcome::Running;
        for _ in 0..cycles {
            outcome = self.sim.tick().expect("cycle should not fail");
            if outcome == CycleOutcome::Halted {
                break;
            }
        }
        outcome
    }
}

/// A reset CPU for driving single stages by hand.
pub fn cpu_with(program: Vec<Instruction>, config: &Config) -> Cpu {
    Cpu::new(program, config).expect("cpu should build")
}

/// Latches for the next cycle as the cycle driver seeds them.
pub fn next_latches(cpu: &Cpu) -> PipelineLatches {
    PipelineLatches {
        fetch: cpu.latches.fetch.clone(),
        ..Default::default()
    }
}
