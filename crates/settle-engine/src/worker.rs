//! The per-worker solve loop.
//!
//! Each active worker runs the same loop on its own thread: sweep the
//! assigned block against the local authoritative grid, publish and
//! gather through the collective, merge the full block set, decide.
//! Workers share no memory. Sweep and merge are deterministic
//! functions of the gathered state, so every worker reaches the same
//! verdict on the same iteration from its own copy.

use std::time::Instant;

use settle_core::{IterationId, TransportError, WorkerId};
use settle_exchange::{Collective, RowBlock};
use settle_grid::PaddedGrid;
use settle_partition::WorkerAssignment;
use settle_sweep::sweep_block;

use crate::convergence::merge_blocks;
use crate::metrics::{IterationMetrics, SolveStats};
use crate::solve::Termination;

/// What a worker hands back when its loop ends normally.
#[derive(Clone, Debug)]
pub struct WorkerOutcome {
    /// The worker's final authoritative grid, padding included.
    pub grid: PaddedGrid,
    /// Why the loop stopped.
    pub termination: Termination,
    /// Accumulated counters for the whole solve.
    pub stats: SolveStats,
}

/// What a worker hands back when the exchange fails underneath it.
#[derive(Clone, Debug)]
pub struct WorkerFailure {
    /// The worker reporting the failure.
    pub worker: WorkerId,
    /// The transport failure that ended the solve.
    pub error: TransportError,
    /// Iterations whose merge had completed before the failure.
    pub iterations: u64,
    /// The authoritative grid as of the last completed merge.
    pub last_merged: PaddedGrid,
}

/// Run one worker's relaxation loop to termination.
///
/// `authoritative` is this worker's own copy of the padded seed. The
/// loop runs until an iteration merges zero cells, the iteration cap
/// is reached, or the collective fails.
///
/// # Errors
///
/// Returns a [`WorkerFailure`] when a gather cannot complete. The
/// failure carries the grid from the last completed merge, so the
/// driver can still surface a best-effort result.
pub fn run_worker<C: Collective>(
    mut collective: C,
    assignment: WorkerAssignment,
    mut authoritative: PaddedGrid,
    precision: f64,
    max_iterations: u64,
    group_size: usize,
) -> Result<WorkerOutcome, WorkerFailure> {
    let worker = collective.worker();
    let cols = authoritative.cols();
    let mut stats = SolveStats {
        workers: group_size,
        grid_bytes_per_worker: authoritative.grid().memory_bytes(),
        ..SolveStats::default()
    };
    let mut block_buf = vec![0.0; assignment.rows * cols];
    let mut gathered: Vec<RowBlock> = Vec::with_capacity(group_size);
    let mut iteration = IterationId(0);

    loop {
        iteration = iteration.next();

        let sweep_started = Instant::now();
        let sweep_stats = sweep_block(&authoritative, &assignment, precision, &mut block_buf);
        let sweep_us = sweep_started.elapsed().as_micros() as u64;

        let own = RowBlock::new(
            iteration,
            worker,
            assignment.start_row,
            cols,
            block_buf.clone(),
        );
        let exchange_started = Instant::now();
        if let Err(error) = collective.all_gather(own, &mut gathered) {
            return Err(WorkerFailure {
                worker,
                error,
                iterations: iteration.0 - 1,
                last_merged: authoritative,
            });
        }
        let exchange_us = exchange_started.elapsed().as_micros() as u64;

        let merge_started = Instant::now();
        let outcome = merge_blocks(&mut authoritative, &gathered, precision);
        let merge_us = merge_started.elapsed().as_micros() as u64;

        stats.record(&IterationMetrics {
            iteration: iteration.0,
            sweep_us,
            exchange_us,
            merge_us,
            cells_updated: sweep_stats.cells_updated,
            cells_merged: outcome.cells_merged,
        });

        if outcome.converged() {
            return Ok(WorkerOutcome {
                grid: authoritative,
                termination: Termination::Converged {
                    iterations: iteration.0,
                },
                stats,
            });
        }
        if iteration.0 >= max_iterations {
            return Ok(WorkerOutcome {
                grid: authoritative,
                termination: Termination::IterationCapReached {
                    iterations: iteration.0,
                },
                stats,
            });
        }
    }
}
