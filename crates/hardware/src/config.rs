//! Configuration system for the APEX simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline machine constants (code base, register file, data memory, BTB).
//! 2. **Structures:** Hierarchical config for general, machine, and pipeline settings.
//! 3. **Enums:** The branch target buffer update policy.
//!
//! Configuration is supplied as JSON (`--config` on the command line) or built with
//! `Config::default()`. Every field is optional in the JSON document.

use serde::Deserialize;

use crate::common::constants;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values describe the reference APEX machine and are used whenever a
/// JSON document leaves a field out.
mod defaults {
    use crate::common::constants;

    /// Address of the first instruction.
    pub const CODE_BASE: i32 = constants::CODE_BASE_ADDRESS;

    /// Number of general-purpose registers.
    pub const REGISTER_COUNT: usize = constants::REG_FILE_SIZE;

    /// Number of words of data memory.
    pub const DATA_MEMORY_SIZE: usize = constants::DATA_MEMORY_SIZE;

    /// Number of branch target buffer entries.
    pub const BTB_SIZE: usize = constants::BTB_SIZE;
}

/// Policy for populating the branch target buffer.
///
/// The buffer is consulted by Fetch for conditional branches; this setting
/// decides whether Execute ever writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BtbUpdatePolicy {
    /// The buffer is never written and stays empty for the whole run.
    ///
    /// Every conditional branch is then predicted not taken, which matches the
    /// reference machine cycle for cycle.
    #[default]
    Never,

    /// Execute records every resolved conditional branch.
    ///
    /// The first resolution inserts an entry (replacing the oldest one when the
    /// buffer is full); later resolutions shift the outcome into the history bits.
    #[serde(alias = "OnResolution")]
    OnResolve,
}

/// Root configuration structure for the simulator.
///
/// # Examples
///
/// ```
/// use apex_core::config::{BtbUpdatePolicy, Config};
///
/// let json = r#"{ "pipeline": { "btb_update": "OnResolve" } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.pipeline.btb_update, BtbUpdatePolicy::OnResolve);
/// assert_eq!(config.machine.register_count, 16);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Run-time behavior (tracing, stepping, cycle limit).
    #[serde(default)]
    pub general: GeneralConfig,
    /// Sizes of the architectural storage.
    #[serde(default)]
    pub machine: MachineConfig,
    /// Pipeline and branch prediction settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a JSON document and validates the result.
    ///
    /// # Arguments
    ///
    /// * `json` - The configuration text. Missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration, or a [`ConfigError`] describing the first problem.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the machine can be built with these values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let machine = &self.machine;
        if machine.register_count == 0 {
            return Err(ConfigError::Invalid {
                field: "machine.register_count",
                reason: "must be at least 1",
            });
        }
        if machine.data_memory_size == 0 {
            return Err(ConfigError::Invalid {
                field: "machine.data_memory_size",
                reason: "must be at least 1",
            });
        }
        if machine.data_memory_size > i32::MAX as usize {
            return Err(ConfigError::Invalid {
                field: "machine.data_memory_size",
                reason: "must be addressable by a 32-bit signed word",
            });
        }
        if machine.code_base < 0 || machine.code_base % constants::INSTRUCTION_SIZE != 0 {
            return Err(ConfigError::Invalid {
                field: "machine.code_base",
                reason: "must be non-negative and a multiple of the instruction width",
            });
        }
        if self.pipeline.btb_size == 0 {
            return Err(ConfigError::Invalid {
                field: "pipeline.btb_size",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Render every stage latch, the flags and the register file after each cycle.
    #[serde(default)]
    pub trace_stages: bool,

    /// Ask the run control for permission before every cycle.
    #[serde(default)]
    pub single_step: bool,

    /// Stop after this many cycles even if HALT has not retired.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Architectural storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineConfig {
    /// Address of the first instruction in code memory.
    #[serde(default = "MachineConfig::default_code_base")]
    pub code_base: i32,

    /// Number of general-purpose registers.
    #[serde(default = "MachineConfig::default_register_count")]
    pub register_count: usize,

    /// Number of 32-bit words of data memory.
    #[serde(default = "MachineConfig::default_data_memory_size")]
    pub data_memory_size: usize,
}

impl MachineConfig {
    /// Returns the default code base address.
    const fn default_code_base() -> i32 {
        defaults::CODE_BASE
    }

    /// Returns the default register count.
    const fn default_register_count() -> usize {
        defaults::REGISTER_COUNT
    }

    /// Returns the default data memory size in words.
    const fn default_data_memory_size() -> usize {
        defaults::DATA_MEMORY_SIZE
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            code_base: defaults::CODE_BASE,
            register_count: defaults::REGISTER_COUNT,
            data_memory_size: defaults::DATA_MEMORY_SIZE,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of entries in the branch target buffer.
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,

    /// When the branch target buffer is written.
    #[serde(default)]
    pub btb_update: BtbUpdatePolicy,
}

impl PipelineConfig {
    /// Returns the default BTB size.
    const fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            btb_size: defaults::BTB_SIZE,
            btb_update: BtbUpdatePolicy::default(),
        }
    }
}
