//! The solve driver: partition, spawn, join, deliver.

use std::error::Error;
use std::fmt;
use std::thread;

use settle_core::{TransportError, WorkerId};
use settle_exchange::ChannelMesh;
use settle_grid::{Grid, GridError, PaddedGrid};
use settle_partition::Partition;

use crate::config::{ConfigError, SolveConfig};
use crate::metrics::SolveStats;
use crate::worker::{run_worker, WorkerFailure};

// ── Termination ────────────────────────────────────────────────────

/// Why a solve stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// An iteration merged zero cells: every cell is settled.
    Converged {
        /// Iterations completed, including the converging one.
        iterations: u64,
    },
    /// The safety cap ended the solve before it settled.
    IterationCapReached {
        /// Iterations completed.
        iterations: u64,
    },
}

impl Termination {
    /// Iterations completed when the solve stopped.
    pub fn iterations(&self) -> u64 {
        match self {
            Self::Converged { iterations } | Self::IterationCapReached { iterations } => {
                *iterations
            }
        }
    }

    /// Whether the solve actually settled.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged { iterations } => {
                write!(f, "converged after {iterations} iterations")
            }
            Self::IterationCapReached { iterations } => {
                write!(f, "iteration cap reached after {iterations} iterations")
            }
        }
    }
}

// ── Solution ───────────────────────────────────────────────────────

/// A finished solve.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The relaxed problem grid, padding trimmed off.
    pub grid: Grid,
    /// Why the solve stopped.
    pub termination: Termination,
    /// Counters from worker 0's view of the solve.
    pub stats: SolveStats,
}

// ── SolveError ─────────────────────────────────────────────────────

/// Errors from [`solve`].
#[derive(Debug)]
pub enum SolveError {
    /// Configuration failed validation; nothing was started.
    Config(ConfigError),
    /// Grid allocation failed.
    Grid(GridError),
    /// The collective exchange failed mid-solve.
    Transport {
        /// The lowest-numbered worker that reported the failure.
        worker: WorkerId,
        /// The failure itself, naming the offending peer.
        source: TransportError,
        /// Iterations fully merged before the failure.
        iterations: u64,
        /// The grid as of the last completed merge, padding trimmed.
        last_merged: Grid,
    },
    /// A worker thread could not be spawned.
    WorkerSpawn {
        /// The worker that failed to start.
        worker: WorkerId,
        /// The underlying spawn failure.
        source: std::io::Error,
    },
    /// A worker thread panicked mid-solve.
    WorkerLost {
        /// The worker whose thread died.
        worker: WorkerId,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Grid(e) => write!(f, "grid allocation: {e}"),
            Self::Transport {
                worker,
                source,
                iterations,
                ..
            } => {
                write!(
                    f,
                    "solve aborted after {iterations} merged iterations, \
                     reported by worker {worker}: {source}"
                )
            }
            Self::WorkerSpawn { worker, source } => {
                write!(f, "could not spawn worker {worker}: {source}")
            }
            Self::WorkerLost { worker } => {
                write!(f, "worker {worker} panicked mid-solve")
            }
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Transport { source, .. } => Some(source),
            Self::WorkerSpawn { source, .. } => Some(source),
            Self::WorkerLost { .. } => None,
        }
    }
}

impl From<ConfigError> for SolveError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── solve ──────────────────────────────────────────────────────────

/// Relax `seed` to its fixed point with a group of lockstep workers.
///
/// Validates the configuration, partitions the rows, spawns one OS
/// thread per active worker, and joins the group. Every worker holds
/// its own full copy of the padded grid and runs the identical
/// deterministic loop, so the result does not depend on the worker
/// count; worker 0's copy becomes the returned solution.
///
/// # Errors
///
/// Returns [`SolveError::Config`] or [`SolveError::Grid`] before any
/// thread starts, and a transport or thread failure if the group dies
/// mid-solve. A thread panic takes precedence over the transport
/// errors it causes in the surviving workers.
pub fn solve(config: &SolveConfig, seed: &Grid) -> Result<Solution, SolveError> {
    config.validate(seed)?;
    let dimension = seed.rows();
    let partition = Partition::compute(dimension, config.resolved_workers());
    let padded = PaddedGrid::from_seed(seed, partition.padded_rows())?;

    let endpoints = ChannelMesh::connect(&partition.active_workers());
    let precision = config.precision;
    let max_iterations = config.max_iterations;
    let group_size = partition.worker_count();

    let mut handles = Vec::with_capacity(group_size);
    for (assignment, endpoint) in partition.assignments().iter().zip(endpoints) {
        let assignment = *assignment;
        let authoritative = padded.clone();
        // If a spawn fails, the unspawned endpoints drop here, the
        // mesh collapses, and the already running workers error out
        // and exit on their own.
        let handle = thread::Builder::new()
            .name(format!("settle-worker-{}", assignment.worker))
            .spawn(move || {
                run_worker(
                    endpoint,
                    assignment,
                    authoritative,
                    precision,
                    max_iterations,
                    group_size,
                )
            })
            .map_err(|source| SolveError::WorkerSpawn {
                worker: assignment.worker,
                source,
            })?;
        handles.push((assignment.worker, handle));
    }

    // Join every worker before deciding anything: a dead peer makes
    // the survivors fail their next gather, so no join can hang.
    let mut outcomes = Vec::with_capacity(group_size);
    let mut first_failure: Option<WorkerFailure> = None;
    let mut first_lost: Option<WorkerId> = None;
    for (worker, handle) in handles {
        match handle.join() {
            Ok(Ok(outcome)) => outcomes.push(outcome),
            Ok(Err(failure)) => {
                // The lowest-numbered reporter wins; every other
                // worker's failure is a consequence of the same death.
                if first_failure.is_none() {
                    first_failure = Some(failure);
                }
            }
            Err(_) => {
                if first_lost.is_none() {
                    first_lost = Some(worker);
                }
            }
        }
    }

    if let Some(worker) = first_lost {
        return Err(SolveError::WorkerLost { worker });
    }
    if let Some(failure) = first_failure {
        return Err(SolveError::Transport {
            worker: failure.worker,
            source: failure.error,
            iterations: failure.iterations,
            last_merged: failure.last_merged.into_problem_grid(),
        });
    }

    for pair in outcomes.windows(2) {
        assert_eq!(
            pair[0].termination, pair[1].termination,
            "lockstep workers disagreed on termination"
        );
    }
    // The partition always yields at least one worker.
    let primary = outcomes.swap_remove(0);

    Ok(Solution {
        grid: primary.grid.into_problem_grid(),
        termination: primary.termination,
        stats: primary.stats,
    })
}
