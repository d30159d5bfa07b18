//! Branch resolution unit (BRU).
//!
//! Holds the branch target buffer and the policy deciding whether resolved
//! branches are recorded in it.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Branch Target Buffer storing outcome history and targets.
pub mod btb;

use self::btb::Btb;
use crate::config::{BtbUpdatePolicy, Config};
use crate::isa::Opcode;

/// BTB-backed predictor owned by the CPU.
#[derive(Clone, Debug)]
pub struct BranchUnit {
    /// The branch target buffer.
    pub btb: Btb,
    /// When resolved branches are written to the buffer.
    pub policy: BtbUpdatePolicy,
}

impl BranchUnit {
    /// Creates an empty buffer sized and configured from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            btb: Btb::new(config.pipeline.btb_size),
            policy: config.pipeline.btb_update,
        }
    }
}

impl BranchPredictor for BranchUnit {
    /// Only `BZ`, `BNZ`, `BP` and `BNP` consult the buffer.
    fn predict_branch(&self, pc: i32, opcode: Opcode) -> Option<i32> {
        if !opcode.is_predicted() {
            return None;
        }
        self.btb.predict(pc, opcode)
    }

    fn update_branch(&mut self, pc: i32, taken: bool, target: i32) {
        match self.policy {
            BtbUpdatePolicy::Never => {}
            BtbUpdatePolicy::OnResolve => self.btb.update(pc, taken, target),
        }
    }
}
