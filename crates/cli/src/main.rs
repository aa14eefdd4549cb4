//! RV32IM cycle-accurate simulator CLI.
//!
//! This binary runs a prepared program image to completion. It performs:
//! 1. **Image run:** Load an `address: value` image file and execute it.
//! 2. **Model selection:** Pipelined vs single-instruction execution, with
//!    or without operand forwarding.
//! 3. **Reporting:** Register dump, statistics report, and drained logs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use rv32sim_core::config::Config;
use rv32sim_core::sim::loader;
use rv32sim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "RV32IM cycle-accurate pipeline simulator",
    long_about = "Run a prepared program image under the single-cycle or the \
five-stage pipelined execution model.\n\nExamples:\n  rv32sim run -f demos/sum.img\n  \
rv32sim run -f demos/sum.img --no-forwarding --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image to completion.
    Run {
        /// Program image file (`address: value` hex pairs).
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable the five-stage pipeline (single instruction in flight).
        #[arg(long)]
        no_pipeline: bool,

        /// Disable operand forwarding (full stalling on RAW hazards).
        #[arg(long)]
        no_forwarding: bool,

        /// Emit per-cycle trace lines to stderr.
        #[arg(long)]
        trace: bool,

        /// Dump all 32 registers after the run.
        #[arg(long)]
        dump_regs: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            config,
            no_pipeline,
            no_forwarding,
            trace,
            dump_regs,
        } => {
            let mut cfg = match config {
                Some(path) => load_config(&path),
                None => Config::default(),
            };
            if no_pipeline {
                cfg.pipeline = false;
            }
            if no_forwarding {
                cfg.forwarding = false;
            }
            if trace {
                cfg.trace = true;
            }

            let image = match loader::load_image_file(&file) {
                Ok(image) => image,
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            };

            let mut sim = Simulator::with_config(cfg);
            if !sim.load_image(&image) {
                report_logs(&mut sim);
                process::exit(1);
            }

            sim.run();
            report_logs(&mut sim);

            if dump_regs {
                sim.cpu().regs.dump();
            }
            sim.stats().print();
        }
    }
}

/// Reads and deserializes a JSON configuration file, exiting on failure.
fn load_config(path: &PathBuf) -> Config {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read config {}: {}", path.display(), e);
            process::exit(1);
        }
    };
    match serde_json::from_str::<Config>(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: invalid config {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Prints drained log messages, one `code message` line each.
fn report_logs(sim: &mut Simulator) {
    for (code, message) in sim.logs() {
        println!("[{}] {}", code, message);
    }
}
