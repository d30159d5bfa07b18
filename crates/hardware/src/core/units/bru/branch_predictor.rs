//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait used by Fetch to steer the
//! program counter and by Execute to report resolved branches.

use crate::isa::Opcode;

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts the next fetch address for a conditional branch.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `opcode` - Kind of branch; the direction rule depends on it
    ///
    /// # Returns
    ///
    /// The predicted target if the branch is predicted taken, `None` to fall
    /// through sequentially.
    fn predict_branch(&self, pc: i32, opcode: Opcode) -> Option<i32>;

    /// Trains the predictor with the resolved outcome of a branch.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    /// * `target` - The taken target of the branch
    fn update_branch(&mut self, pc: i32, taken: bool, target: i32);
}
