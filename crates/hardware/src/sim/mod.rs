//! Simulation front end.
//!
//! Provides the program loader, the [`Simulator`](simulator::Simulator) run
//! loop, the run-control seam used for single stepping, and text renderers
//! for traces.

/// Run-control trait and the free-running control.
pub mod control;

/// Assembly text loader.
pub mod loader;

/// Simulator and run loop.
pub mod simulator;

/// Stage, register, flag and memory renderers.
pub mod trace;

pub use control::{FreeRun, RunControl, StepDecision};
pub use simulator::{RunSummary, Simulator, StopReason};
