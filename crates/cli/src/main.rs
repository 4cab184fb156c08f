//! RV32 cycle-accurate pipeline simulator CLI.
//!
//! Loads a program image (ELF or flat binary), runs it until the core
//! halts or a cycle budget runs out, drains UART output to stdout, and
//! prints the performance counter report.

use std::io::Write;
use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rv32sim_core::config::Config;
use rv32sim_core::sim::{RunOutcome, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "Cycle-accurate RV32IM 5-stage pipeline simulator",
    long_about = "Run a bare-metal RV32IM image on a cycle-accurate 5-stage pipeline \
with branch prediction and a latency-modelled system bus.\n\nExamples:\n  \
rv32sim software/qsort.elf\n  rv32sim boot.bin --cycles 5000000 --stats branch\n  \
rv32sim app.elf --config soc.json --dump-regs"
)]
struct Cli {
    /// Program image to execute (ELF or flat binary).
    program: PathBuf,

    /// Maximum number of cycles to simulate.
    #[arg(short, long, default_value_t = 100_000_000)]
    cycles: u64,

    /// JSON configuration file (defaults are used when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Statistics sections to print: summary, stalls, branch. Repeatable;
    /// all sections are printed when omitted.
    #[arg(long = "stats")]
    stats: Vec<String>,

    /// Dump the register file after the run.
    #[arg(long)]
    dump_regs: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {}: {}", path.display(), e);
                process::exit(1);
            });
            Config::from_json(&text).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    let mut sim = Simulator::new(config);
    if let Err(e) = sim.load(&cli.program) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let outcome = sim.run(cli.cycles);

    let output = sim.bus_mut().uart_mut().take_output();
    std::io::stdout().write_all(&output).ok();
    std::io::stdout().flush().ok();

    match outcome {
        RunOutcome::Halted => {}
        RunOutcome::CycleLimit => {
            eprintln!("\n[!] Cycle limit reached ({} cycles)", cli.cycles);
        }
    }

    if cli.dump_regs {
        println!();
        sim.core().gpr().dump();
    }

    sim.stats().print_sections(&cli.stats);

    if outcome == RunOutcome::CycleLimit {
        process::exit(2);
    }
}
