//! Pipeline simulator CLI.
//!
//! This binary provides a single entry point for running and preparing programs. It performs:
//! 1. **Run:** Load a program (assembly source or `.bin` image), run it to halt or the
//!    cycle limit, and print statistics. A fault dumps registers and memory and exits 1.
//! 2. **Assemble:** Translate assembly source into a `.bin` image.
//! 3. **Disassemble:** List the instructions of a program file.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pipesim_core::config::Config;
use pipesim_core::isa::disasm::disassemble;
use pipesim_core::sim::assembler::AssembleOptions;
use pipesim_core::sim::loader;
use pipesim_core::{RunOutcome, SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Five-stage pipeline simulator",
    long_about = "Run, assemble or disassemble programs for the pipesim ISA.\n\nExamples:\n  pipesim run demos/sum.asm\n  pipesim run prog.bin --config machine.json --max-cycles 5000\n  pipesim asm demos/sum.asm -o sum.bin\n  pipesim dis sum.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it halts or reaches the cycle limit.
    Run {
        /// Program file: `.bin` image or assembly source.
        file: PathBuf,

        /// JSON machine configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override `general.max_cycles`.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Per-stage pipeline trace (overrides `general.verbose`).
        #[arg(short, long)]
        verbose: bool,
    },

    /// Assemble a source file into a binary image.
    Asm {
        /// Assembly source.
        file: PathBuf,

        /// Output image path.
        #[arg(short, long)]
        output: PathBuf,

        /// Log every token the assembler reads.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the instructions of a program file.
    Dis {
        /// Program file: `.bin` image or assembly source.
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            verbose,
        } => cmd_run(&file, config, max_cycles, verbose),
        Commands::Asm {
            file,
            output,
            verbose,
        } => cmd_asm(&file, &output, verbose),
        Commands::Dis { file } => cmd_dis(&file),
    };

    if let Err(e) = result {
        eprintln!("\n[!] {}: {e}", e.kind());
        process::exit(1);
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` wins over the verbose flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the program, runs it and reports the outcome.
///
/// A fault raised while loading or running dumps the registers, memory and
/// statistics to stderr and exits 1. Configuration faults come before there
/// is a machine to dump and are returned.
fn cmd_run(
    file: &Path,
    config_path: Option<PathBuf>,
    max_cycles: Option<u64>,
    verbose: bool,
) -> Result<(), SimError> {
    let mut config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    if let Some(limit) = max_cycles {
        config.general.max_cycles = limit;
    }
    config.general.verbose |= verbose;
    init_tracing(config.general.verbose);

    let mut sim = Simulator::new(&config)?;
    let options = AssembleOptions::default().set_verbose(config.general.verbose);
    let words = match loader::load_program(file, &mut sim.ctx.mem, options) {
        Ok(words) => words,
        Err(e) => fatal(&sim, &e),
    };

    println!("[*] {}: {words} words", file.display());
    println!(
        "    memory={} words  stack={}  issue_width={}  max_cycles={}",
        config.memory.size,
        config.memory.stack_depth,
        config.pipeline.issue_width,
        config.general.max_cycles
    );

    match sim.run() {
        Ok(RunOutcome::Halted { cycles }) => {
            println!("\n[*] Halted after {cycles} cycles");
            sim.stats().print();
            Ok(())
        }
        Ok(RunOutcome::CycleLimit { cycles }) => {
            println!("\n[*] Cycle limit reached after {cycles} cycles");
            sim.stats().print();
            Ok(())
        }
        Err(e) => fatal(&sim, &e),
    }
}

/// Reports a fault with a full machine dump on stderr and exits 1.
fn fatal(sim: &Simulator, e: &SimError) -> ! {
    eprintln!("\n[!] FATAL {}: {e}", e.kind());
    eprintln!("\n--- registers ---\n{}", sim.ctx.regs);
    eprintln!("\n--- memory ---\n{}", sim.ctx.mem);
    eprint!("{}", sim.stats());
    process::exit(1);
}

/// Assembles `file` into `output`.
fn cmd_asm(file: &Path, output: &Path, verbose: bool) -> Result<(), SimError> {
    init_tracing(verbose);
    let options = AssembleOptions::default().set_verbose(verbose);
    let image = loader::read_program(file, options)?;
    loader::write_binary(output, &image)?;
    println!("[*] {} -> {} ({} words)", file.display(), output.display(), image.len());
    Ok(())
}

/// Prints one line per word: address, raw encoding and disassembly.
fn cmd_dis(file: &Path) -> Result<(), SimError> {
    init_tracing(false);
    let image = loader::read_program(file, AssembleOptions::default())?;
    for (addr, word) in image.iter().enumerate() {
        println!("{addr:>5}: {:#010x}  {}", *word as u32, disassemble(*word as u32));
    }
    Ok(())
}
