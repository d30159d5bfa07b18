//! Run control.
//!
//! The simulator asks a [`RunControl`] whether to continue before each cycle
//! when single stepping is enabled, and shows it the machine after each cycle
//! when stage tracing is enabled. The command line implements it with an
//! interactive prompt; tests implement it with scripts.

use super::simulator::Simulator;

/// Answer to "run the next cycle?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDecision {
    /// Run the next cycle.
    Continue,
    /// Stop the run before the next cycle.
    Quit,
}

/// Observer and gate for [`Simulator::run`].
pub trait RunControl {
    /// Called before every cycle while single stepping.
    ///
    /// # Arguments
    ///
    /// * `cycle` - Number of the cycle about to run (1-based).
    fn before_cycle(&mut self, cycle: u64) -> StepDecision;

    /// Called after every cycle while stage tracing is enabled.
    fn after_cycle(&mut self, _sim: &Simulator) {}
}

/// Control that never pauses and observes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeRun;

impl RunControl for FreeRun {
    fn before_cycle(&mut self, _cycle: u64) -> StepDecision {
        StepDecision::Continue
    }
}
