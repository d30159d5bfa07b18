//! APEX pipeline simulator CLI.
//!
//! This binary runs an APEX assembly program through the cycle-accurate pipeline. It supports:
//! 1. **Simulate:** Run silently to completion, then print the final report and registers.
//! 2. **Display:** Print every stage latch, the flags and the register file after each cycle.
//! 3. **Step:** Like display, pausing before each cycle until Enter is pressed (`q` quits).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use apex_core::config::Config;
use apex_core::sim::trace;
use apex_core::sim::{RunControl, RunSummary, Simulator, StepDecision, StopReason};
use apex_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "apex",
    author,
    version,
    about = "Cycle-accurate APEX 5-stage pipeline simulator",
    long_about = "Run an APEX assembly program through the 5-stage pipeline.\n\nLogging is controlled with RUST_LOG (e.g. RUST_LOG=apex_core=debug).\n\nExamples:\n  apex program.asm\n  apex program.asm --mode display\n  apex program.asm --mode step --memory 0:8\n  apex program.asm --config btb.json --stats"
)]
struct Cli {
    /// Program file (one instruction per line).
    program: PathBuf,

    /// JSON configuration file; missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How the run is presented.
    #[arg(short, long, value_enum, default_value_t = Mode::Simulate)]
    mode: Mode,

    /// Stop after this many cycles.
    #[arg(long)]
    cycles: Option<u64>,

    /// Print data memory words after the run, as `<start>:<count>`.
    #[arg(long, value_parser = parse_memory_range)]
    memory: Option<(i32, usize)>,

    /// Print the statistics report after the run.
    #[arg(long)]
    stats: bool,

    /// Limit the statistics report to these comma-separated sections (implies --stats).
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
    )]
    stats_sections: Vec<String>,
}

/// Presentation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run without per-cycle output.
    Simulate,
    /// Print the pipeline after every cycle.
    Display,
    /// Print the pipeline and wait for Enter before every cycle.
    Step,
}

/// Parses `<start>:<count>`.
fn parse_memory_range(s: &str) -> Result<(i32, usize), String> {
    let (start, count) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <start>:<count>, got '{s}'"))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("bad start address '{start}': {e}"))?;
    let count = count
        .trim()
        .parse()
        .map_err(|e| format!("bad word count '{count}': {e}"))?;
    Ok((start, count))
}

/// Prints the pipeline after each cycle and, when stepping, waits for the user.
struct Console<R> {
    input: R,
}

impl<R: BufRead> RunControl for Console<R> {
    fn before_cycle(&mut self, _cycle: u64) -> StepDecision {
        print!("Press Enter to advance the clock or <q> to quit: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => StepDecision::Quit,
            Ok(_) if line.trim().eq_ignore_ascii_case("q") => StepDecision::Quit,
            Ok(_) => StepDecision::Continue,
        }
    }

    fn after_cycle(&mut self, sim: &Simulator) {
        println!("--------------------------------------------");
        println!("Clock Cycle #: {}", sim.clock());
        println!("--------------------------------------------");
        for line in trace::format_pipeline(sim.latches()) {
            println!("{line}");
        }
        println!("Flags: {}", trace::format_flags(sim.flags()));
        println!("{}", trace::format_registers(sim.registers()));
    }
}

/// Loads the configuration file, or the defaults when none is given.
fn load_config(path: Option<&PathBuf>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| e.to_string())
}

/// Prints the end-of-run report.
fn report(sim: &Simulator, summary: &RunSummary, cli: &Cli) {
    let status = match summary.reason {
        StopReason::Halted => "Simulation Complete",
        StopReason::CycleLimit | StopReason::UserQuit => "Simulation Stopped",
        StopReason::Faulted => "Simulation Aborted",
    };
    println!(
        "APEX_CPU: {status}, cycles = {} instructions = {}",
        summary.cycles, summary.instructions
    );
    println!("Flags: {}", trace::format_flags(sim.flags()));
    println!("{}", trace::format_registers(sim.registers()));
    if let Some((start, count)) = cli.memory {
        for line in trace::format_memory(sim.data_memory(), start, count) {
            println!("{line}");
        }
    }
    if cli.stats || !cli.stats_sections.is_empty() {
        sim.stats().print_sections(&cli.stats_sections);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref()).unwrap_or_else(|e| {
        eprintln!("[!] {e}");
        process::exit(2);
    });
    config.general.trace_stages |= matches!(cli.mode, Mode::Display | Mode::Step);
    config.general.single_step |= cli.mode == Mode::Step;
    if cli.cycles.is_some() {
        config.general.max_cycles = cli.cycles;
    }
    tracing::debug!(?config, mode = ?cli.mode, "configuration resolved");

    let mut sim = Simulator::from_file(&cli.program, &config).unwrap_or_else(|e| {
        eprintln!("[!] {e}");
        process::exit(1);
    });

    let mut console = Console {
        input: io::stdin().lock(),
    };
    match sim.run(&mut console) {
        Ok(summary) => report(&sim, &summary, &cli),
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            println!(
                "APEX_CPU: Simulation Aborted, cycles = {} instructions = {}",
                sim.clock(),
                sim.completed()
            );
            for line in trace::format_pipeline(sim.latches()) {
                println!("{line}");
            }
            println!("{}", trace::format_registers(sim.registers()));
            process::exit(1);
        }
    }
}
