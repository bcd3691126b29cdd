//! # logsys
//!
//! `logsys` enumerates every solution of a small system of boolean equations
//! and derives two plain-text reports from the solution set.
//!
//! Equations use a compact notation: `!` (not), `*` (and), `+` (or),
//! `=` (equivalence) and `-` (implication), one equation per line. Variables
//! are split into causes (`--x`) and effects (`--y`); the split only matters
//! for the reports.
//!
//! Two enumeration strategies are available:
//! 1.  **Exhaustive**: evaluates all `2^n` assignments. Exact and simple,
//!     practical up to a few dozen variables.
//! 2.  **Incremental**: asks a DPLL backend for one model at a time and blocks
//!     each model found. Far faster when few assignments satisfy the system.
//!
//! ## Usage
//!
//! ```sh
//! # Solve inline equations with the exhaustive strategy
//! logsys solve --x "x1 x2" --y "y1" --input "x1 = y1"
//!
//! # Solve a file of equations with the SAT backend, writing the reports
//! logsys solve --x "x1 x2" --y "y1 y2" --equations system.txt \
//!     --solver incremental --out reports/ --stats
//!
//! # Attach readable labels to the variables in the reports
//! logsys solve --x "x1" --y "y1" --input "x1 = y1" --names labels.txt
//!
//! # Generate shell completions
//! logsys completions zsh
//! ```

use crate::command_line::cli::{Cli, Commands, solve_system};
use clap::{CommandFactory, Parser};
use log::{LevelFilter, error};
use std::process::ExitCode;

mod command_line;

/// Global allocator using `tikv-jemallocator` for memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Unable to initialise logging: {e}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { input, common } => {
            init_logging(common.debug);
            match solve_system(&input, &common) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("{e}");
                    if e.is_operational() {
                        error!("The enumeration is inconclusive; retry with a larger --timeout-ms.");
                    }
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
