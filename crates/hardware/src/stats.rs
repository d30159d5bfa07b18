//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the APEX simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, control, system).
//! 3. **Branch prediction:** BTB lookups and hits, correct and mispredicted branches.
//! 4. **Stalls:** Data hazard stalls, refetch bubbles, and flushes.

use std::time::Instant;

use crate::isa::InstructionClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired by Writeback.
    pub instructions_retired: u64,

    /// Count of ALU and compare instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of `JUMP`/`JALR` retired.
    pub inst_control: u64,
    /// Count of `HALT` retired.
    pub inst_system: u64,

    /// Conditional branches resolved taken.
    pub branches_taken: u64,
    /// Conditional branches whose predicted direction was correct.
    pub branch_predictions: u64,
    /// Conditional branches whose predicted direction was wrong.
    pub branch_mispredictions: u64,
    /// BTB lookups performed by Fetch.
    pub btb_lookups: u64,
    /// BTB lookups that found an entry.
    pub btb_hits: u64,

    /// Cycles Decode spent stalled on a RAW dependency.
    pub stalls_data: u64,
    /// Cycles Fetch idled after a redirect.
    pub stalls_control: u64,
    /// Redirects that discarded the instruction in Decode.
    pub flushes: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_control: 0,
            inst_system: 0,
            branches_taken: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            btb_lookups: 0,
            btb_hits: 0,
            stalls_data: 0,
            stalls_control: 0,
            flushes: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "branch"];

/// Percentage of `part` in `whole`, with an empty whole counted as one.
fn percent(part: u64, whole: u64) -> f64 {
    (part as f64 / whole.max(1) as f64) * 100.0
}

impl SimStats {
    /// Counts one retired instruction of the given class.
    pub fn record_retire(&mut self, class: InstructionClass) {
        self.instructions_retired += 1;
        match class {
            InstructionClass::Alu => self.inst_alu += 1,
            InstructionClass::Load => self.inst_load += 1,
            InstructionClass::Store => self.inst_store += 1,
            InstructionClass::Branch => self.inst_branch += 1,
            InstructionClass::Control => self.inst_control += 1,
            InstructionClass::System => self.inst_system += 1,
        }
    }

    /// Fraction of conditional branches predicted correctly, in percent.
    pub fn prediction_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            percent(self.branch_predictions, total)
        }
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        if want("summary") {
            let ipc = self.instructions_retired as f64 / cyc as f64;
            let cpi = cyc as f64 / instr as f64;
            println!("\n==========================================================");
            println!("APEX PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {ipc:.4}");
            println!("sim_cpi                  {cpi:.4}");
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            println!(
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                percent(self.stalls_data, cyc)
            );
            println!(
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                percent(self.stalls_control, cyc)
            );
            println!("  flushes                {}", self.flushes);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("alu", self.inst_alu),
                ("load", self.inst_load),
                ("store", self.inst_store),
                ("branch", self.inst_branch),
                ("control", self.inst_control),
                ("system", self.inst_system),
            ] {
                println!("  {name:<22} {count} ({:.2}%)", percent(count, instr));
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            println!("BRANCH PREDICTION");
            println!("  branches.taken         {}", self.branches_taken);
            println!("  btb.lookups            {}", self.btb_lookups);
            println!("  btb.hits               {}", self.btb_hits);
            println!("  bp.correct             {}", self.branch_predictions);
            println!("  bp.mispredicted        {}", self.branch_mispredictions);
            println!("  bp.accuracy            {:.2}%", self.prediction_accuracy());
            println!("==========================================================");
        }
    }
}
