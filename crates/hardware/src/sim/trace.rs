//! Trace rendering.
//!
//! Text views of the machine used by the display and step modes. Every
//! function here only reads state.

use std::fmt::Write as _;

use crate::core::arch::flags::ConditionFlags;
use crate::core::cpu::memory::DataMemory;
use crate::core::pipeline::latches::{PipelineLatches, Stage, StageLatch};

/// Width the stage name is padded to.
const STAGE_NAME_WIDTH: usize = 15;

/// Renders one stage, e.g. `Execute        : pc(4008) ADD,R3,R1,R2`.
///
/// An invalid latch renders as `<name>: EMPTY`.
pub fn format_stage(name: &str, latch: &StageLatch) -> String {
    if latch.valid {
        format!(
            "{name:<width$}: pc({}) {}",
            latch.pc,
            latch.insn,
            width = STAGE_NAME_WIDTH
        )
    } else {
        format!("{name:<width$}: EMPTY", width = STAGE_NAME_WIDTH)
    }
}

/// Renders every stage in program order, one line each.
///
/// The Fetch row shows the last fetched instruction while fetching is enabled.
pub fn format_pipeline(latches: &PipelineLatches) -> Vec<String> {
    Stage::ALL
        .iter()
        .map(|&stage| format_stage(stage.name(), latches.get(stage)))
        .collect()
}

/// Renders the register file in two rows, lower half first.
pub fn format_registers(regs: &[i32]) -> String {
    let half = regs.len().div_ceil(2);
    let row = |start: usize, values: &[i32]| {
        let mut line = String::new();
        for (offset, value) in values.iter().enumerate() {
            let _ = write!(line, "R{:<2}[{:>6}] ", start + offset, value);
        }
        line.trim_end().to_owned()
    };
    let (low, high) = regs.split_at(half);
    format!("{}\n{}", row(0, low), row(half, high))
}

/// Renders the flags as `Z=<0|1> N=<0|1> P=<0|1>`.
pub fn format_flags(flags: ConditionFlags) -> String {
    format!(
        "Z={} N={} P={}",
        u8::from(flags.zero),
        u8::from(flags.negative),
        u8::from(flags.positive)
    )
}

/// Renders `count` words of data memory starting at `start`, one per line.
///
/// Addresses outside memory are skipped.
pub fn format_memory(memory: &DataMemory, start: i32, count: usize) -> Vec<String> {
    (0..count)
        .filter_map(|i| {
            let address = start.checked_add(i32::try_from(i).ok()?)?;
            memory
                .peek(address)
                .map(|value| format!("MEM[{address:>4}] = {value}"))
        })
        .collect()
}
