//! Simulator: the public face of the machine.
//!
//! Owns the CPU and the configuration, and adds the run loop on top of the
//! single-cycle driver.

use std::path::Path;

use super::control::{RunControl, StepDecision};
use super::loader;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::flags::ConditionFlags;
use crate::core::cpu::memory::DataMemory;
use crate::core::pipeline::latches::PipelineLatches;
use crate::core::pipeline::{self, CycleOutcome};
use crate::isa::Instruction;
use crate::stats::SimStats;

/// Why [`Simulator::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// `HALT` retired.
    Halted,
    /// The configured cycle limit was reached first.
    CycleLimit,
    /// The run control asked to stop.
    UserQuit,
    /// An earlier cycle failed with a fatal error.
    Faulted,
}

/// Result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles executed so far.
    pub cycles: u64,
    /// Instructions retired so far.
    pub instructions: u64,
    /// Why the run stopped.
    pub reason: StopReason,
}

/// Top-level simulator: CPU architectural state plus run settings.
#[derive(Debug)]
pub struct Simulator {
    /// CPU state (registers, memories, latches, BTB, stats).
    pub cpu: Cpu,
    config: Config,
}

impl Simulator {
    /// Creates a simulator for an already decoded program.
    ///
    /// Fails without creating an instance if the configuration is invalid,
    /// the program is empty, or an instruction names a register outside the file.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Result<Self, SimError> {
        let cpu = Cpu::new(program, config)?;
        Ok(Self {
            cpu,
            config: config.clone(),
        })
    }

    /// Loads a program file and creates a simulator for it.
    pub fn from_file(path: &Path, config: &Config) -> Result<Self, SimError> {
        let program = loader::load_program(path, config.machine.register_count)?;
        Self::new(program, config)
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) -> Result<CycleOutcome, SimError> {
        pipeline::tick(&mut self.cpu)
    }

    /// Runs until `HALT` retires, the cycle limit is reached, or `control` quits.
    ///
    /// `control` is consulted before each cycle only when single stepping is
    /// configured, and shown the machine after each cycle only when stage
    /// tracing is configured.
    pub fn run(&mut self, control: &mut dyn RunControl) -> Result<RunSummary, SimError> {
        let general = self.config.general.clone();
        let reason = loop {
            if self.cpu.halted {
                break StopReason::Halted;
            }
            if self.cpu.faulted {
                break StopReason::Faulted;
            }
            if general.max_cycles.is_some_and(|limit| self.cpu.clock >= limit) {
                break StopReason::CycleLimit;
            }
            if general.single_step && control.before_cycle(self.cpu.clock + 1) == StepDecision::Quit
            {
                break StopReason::UserQuit;
            }
            let _ = self.tick()?;
            if general.trace_stages {
                control.after_cycle(self);
            }
        };
        tracing::info!(cycles = self.cpu.clock, instructions = self.cpu.completed, ?reason, "run finished");
        Ok(self.summary(reason))
    }

    /// Summary of the machine's progress with the given stop reason.
    pub const fn summary(&self, reason: StopReason) -> RunSummary {
        RunSummary {
            cycles: self.cpu.clock,
            instructions: self.cpu.completed,
            reason,
        }
    }

    /// The configuration the simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns `true` once `HALT` has retired.
    pub const fn is_halted(&self) -> bool {
        self.cpu.halted
    }

    /// Returns `true` once a cycle has failed with a fatal error.
    pub const fn is_faulted(&self) -> bool {
        self.cpu.faulted
    }

    /// Cycles executed.
    pub const fn clock(&self) -> u64 {
        self.cpu.clock
    }

    /// Instructions retired, `HALT` included.
    pub const fn completed(&self) -> u64 {
        self.cpu.completed
    }

    /// Next fetch address.
    pub const fn pc(&self) -> i32 {
        self.cpu.pc
    }

    /// Value of register `idx`.
    pub fn register(&self, idx: usize) -> i32 {
        self.cpu.regs.read(idx)
    }

    /// All register values.
    pub fn registers(&self) -> &[i32] {
        self.cpu.regs.as_slice()
    }

    /// Condition flags.
    pub const fn flags(&self) -> ConditionFlags {
        self.cpu.flags
    }

    /// Data memory.
    pub const fn data_memory(&self) -> &DataMemory {
        &self.cpu.data
    }

    /// Mutable data memory, for seeding values before a run.
    pub const fn data_memory_mut(&mut self) -> &mut DataMemory {
        &mut self.cpu.data
    }

    /// Stage latches at the current cycle boundary.
    pub const fn latches(&self) -> &PipelineLatches {
        &self.cpu.latches
    }

    /// Performance statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }
}
