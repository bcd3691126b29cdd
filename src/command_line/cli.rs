#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use logsys::error::SolveError;
use logsys::logic::Grammar;
use logsys::report::DisplayNames;
use logsys::session::{EquationSystem, SolveOptions, Solved, Strategy};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the equation system solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "logsys",
    version,
    about = "Enumerates every solution of a system of boolean equations"
)]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute (`solve` or `completions`).
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a system of equations and build both reports.
    Solve {
        /// Variables and equations to solve.
        #[command(flatten)]
        input: SolveInput,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// What to solve and where the results go.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SolveInput {
    /// Cause variable names, separated by whitespace (e.g. "x1 x2").
    #[arg(long, default_value = "")]
    pub x: String,

    /// Effect variable names, separated by whitespace (e.g. "y1 y2").
    #[arg(long, default_value = "")]
    pub y: String,

    /// File with one equation per line.
    #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
    pub equations: Option<PathBuf>,

    /// Equations given inline, separated by newlines (e.g. "x1 = y1").
    #[arg(short, long)]
    pub input: Option<String>,

    /// File of display names, one `name = label` per line.
    #[arg(short, long)]
    pub names: Option<PathBuf>,

    /// Directory to write `view1.txt` and `view2.txt` into. The reports are
    /// printed when omitted.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write the clausal form of the equations to this file in DIMACS format.
    #[arg(long)]
    pub export_dimacs: Option<PathBuf>,
}

/// Defines command-line options controlling how a system is solved.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print performance and problem statistics after solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Print the solution set as a table.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solutions: bool,

    /// Enumeration strategy.
    #[arg(long, default_value_t = Strategy::Exhaustive)]
    solver: Strategy,

    /// Equation grammar; defaults to `permissive` for the exhaustive
    /// strategy and `strict` for the incremental one.
    #[arg(long)]
    grammar: Option<Grammar>,

    /// Abandon enumeration after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl CommonOptions {
    pub(crate) fn solve_options(&self) -> SolveOptions {
        let mut options = SolveOptions::new(self.solver);
        if let Some(grammar) = self.grammar {
            options = options.with_grammar(grammar);
        }
        if let Some(ms) = self.timeout_ms {
            options = options.with_timeout(Duration::from_millis(ms));
        }
        options
    }
}

/// Failures of the command-line front end.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl CliError {
    /// True when the run was inconclusive rather than the input being wrong.
    pub(crate) const fn is_operational(&self) -> bool {
        match self {
            Self::Solve(e) => e.is_operational(),
            Self::Read { .. } | Self::Write { .. } => false,
        }
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Solves the system described by `input` and emits the reports.
///
/// # Errors
///
/// I/O failures and any error from the solve itself.
pub(crate) fn solve_system(input: &SolveInput, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let equations = match (&input.equations, &input.input) {
        (Some(path), _) => read(path)?,
        (None, Some(text)) => text.replace("\\n", "\n"),
        (None, None) => String::new(),
    };
    let names = match &input.names {
        Some(path) => DisplayNames::parse(&read(path)?)?,
        None => DisplayNames::new(),
    };
    let system =
        EquationSystem::from_names(input.x.split_whitespace(), input.y.split_whitespace(), equations)?;
    let read_time = time.elapsed();

    let options = common.solve_options();
    let solved = system.solve(&options)?;

    println!("Solutions found: {}", solved.count);
    if common.print_solutions && !solved.solutions.is_empty() {
        print!("{}", solved.solutions.table(system.variables().names()));
    }

    if let Some(path) = &input.export_dimacs {
        write(path, &solved.cnf().to_string())?;
        println!("DIMACS written to: {}", path.display());
    }

    let report = system.report(&solved, &names);
    match &input.out {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| CliError::Write {
                path: dir.clone(),
                source,
            })?;
            write(&dir.join("view1.txt"), &report.view1)?;
            write(&dir.join("view2.txt"), &report.view2)?;
            println!("Reports written to: {}", dir.display());
        }
        None => {
            println!("\n--- view 1 ---\n{}", report.view1);
            println!("--- view 2 ---\n{}", report.view2);
        }
    }

    if common.stats {
        let (allocated, resident) = memory_mib().unwrap_or_default();
        print_stats(read_time, &system, &options, &solved, allocated, resident);
    }
    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_mib() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    read_time: Duration,
    system: &EquationSystem,
    options: &SolveOptions,
    solved: &Solved,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = solved.solve_time.as_secs_f64();
    let variables = system.variables();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Read time (s)", format!("{:.3}", read_time.as_secs_f64()));
    stat_line(
        "Translate time (s)",
        format!("{:.3}", solved.translate_time.as_secs_f64()),
    );
    stat_line("Cause variables", variables.x_count());
    stat_line("Effect variables", variables.len() - variables.x_count());
    stat_line("Equations", solved.formula.equations().len());
    stat_line("Grammar", options.grammar());

    println!("========================[ Search Statistics ]========================");
    stat_line("Strategy", solved.strategy);
    stat_line("Solutions", solved.count);
    stat_line_with_rate(
        match solved.strategy {
            Strategy::Exhaustive => "Candidates",
            Strategy::Incremental => "SAT checks",
        },
        usize::try_from(solved.checks).unwrap_or(usize::MAX),
        elapsed_secs,
    );
    if let Some(s) = &solved.backend_stats {
        stat_line("Clauses (final)", solved.cnf().len() + solved.count);
        stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
        stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
        stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    }
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "logsys",
            "solve",
            "--x",
            "x1 x2",
            "--y",
            "y1",
            "--input",
            "x1 = y1",
            "--solver",
            "incremental",
            "--timeout-ms",
            "250",
        ])
        .unwrap();
        let Commands::Solve { input, common } = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(input.x, "x1 x2");
        let options = common.solve_options();
        assert_eq!(options.strategy, Strategy::Incremental);
        assert_eq!(options.grammar(), Grammar::Strict);
        assert_eq!(options.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_equations_are_required() {
        assert!(Cli::try_parse_from(["logsys", "solve", "--x", "a"]).is_err());
    }
}
