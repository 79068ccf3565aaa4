//! Settle command-line interface.
//!
//! Relax a square grid from the command line:
//! ```sh
//! settle 100 0.01
//! settle 500 0.001 --workers 8 --problem random --seed 7 --check
//! ```
//!
//! Exit codes: 0 on success, 255 on argument validation failure, 3 on
//! a solve that hit the iteration cap, 4 on a failed `--check`, 5 on
//! an output write failure, and the transport error's own code (10-12)
//! when the worker group dies mid-solve.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use settle::grid::Grid;
use settle::prelude::*;
use settle::problem::ProblemError;

// The original tool aborted with -1 on bad arguments, which the shell
// reports as 255.
const EXIT_INVALID_ARGS: u8 = 255;
const EXIT_ITERATION_CAP: u8 = 3;
const EXIT_CHECK_FAILED: u8 = 4;
const EXIT_OUTPUT_IO: u8 = 5;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Problem {
    /// The canonical benchmark grid: a fixed block tiled to size.
    Tiled,
    /// Reproducible random doubles in [0, 100); see --seed.
    Random,
    /// Hot-plate: top edge at 100, cold everywhere else.
    Dirichlet,
}

#[derive(Parser)]
#[command(name = "settle")]
#[command(about = "Relax a square boundary-value grid by Jacobi iteration")]
#[command(version)]
struct Cli {
    /// Grid dimension (rows and columns). Must be at least 3.
    dimension: usize,

    /// Stop once no interior cell moves by this much. Must be a
    /// decimal greater than 0.
    precision: f64,

    /// Worker threads. Defaults to the machine's parallelism.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Seed grid to relax.
    #[arg(long, value_enum, default_value_t = Problem::Tiled)]
    problem: Problem,

    /// RNG seed for --problem random.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Safety cap on iterations.
    #[arg(long, default_value_t = 50_000)]
    max_iterations: u64,

    /// Verify the result: one extra pass checking every interior cell
    /// sits within precision of its four-neighbour mean.
    #[arg(long)]
    check: bool,

    /// Where to write the labeled input and solution grids.
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Skip writing the output file.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn generate_seed(&self) -> Result<Grid, ProblemError> {
        match self.problem {
            Problem::Tiled => settle::problem::tiled(self.dimension),
            Problem::Random => settle::problem::random(self.dimension, self.seed),
            Problem::Dirichlet => settle::problem::dirichlet(self.dimension),
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.precision.is_finite() || cli.precision <= 0.0 {
        eprintln!("precision must be a decimal greater than 0");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let seed = match cli.generate_seed() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("invalid problem: {e}");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let config = SolveConfig {
        workers: cli.workers,
        precision: cli.precision,
        max_iterations: cli.max_iterations,
    };

    let solution = match solve(&config, &seed) {
        Ok(solution) => solution,
        Err(SolveError::Config(e)) => {
            eprintln!("invalid arguments: {e}");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(SolveError::Transport {
            worker,
            source,
            iterations,
            last_merged,
        }) => {
            eprintln!(
                "transport failure after {iterations} iterations, \
                 reported by worker {worker}: {source}"
            );
            // Best effort: the furthest state reached still goes out.
            if !cli.quiet {
                if let Err(e) = report::write_report(&cli.output, &seed, &last_merged) {
                    eprintln!("could not write {}: {e}", cli.output.display());
                }
            }
            return ExitCode::from(source.code() as u8);
        }
        Err(e) => {
            eprintln!("solve failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "dimension {} with {} workers: {}",
        cli.dimension,
        solution.stats.workers,
        solution.termination
    );
    println!("{}", solution.termination);

    if !cli.quiet {
        if let Err(e) = report::write_report(&cli.output, &seed, &solution.grid) {
            eprintln!("could not write {}: {e}", cli.output.display());
            return ExitCode::from(EXIT_OUTPUT_IO);
        }
    }

    if let Termination::IterationCapReached { .. } = solution.termination {
        return ExitCode::from(EXIT_ITERATION_CAP);
    }

    if cli.check {
        if settle::sweep::within_precision(&solution.grid, cli.precision) {
            println!("check passed: residual within {}", cli.precision);
        } else {
            eprintln!("check FAILED: residual exceeds {}", cli.precision);
            return ExitCode::from(EXIT_CHECK_FAILED);
        }
    }

    ExitCode::SUCCESS
}
