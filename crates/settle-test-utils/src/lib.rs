//! Test utilities and mock types for Settle development.
//!
//! Provides a scriptable loopback [`Collective`], small grid fixtures,
//! and an independent straight-line relaxation reference that tests
//! compare the real solver against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::{Arc, Mutex};

use settle_core::{IterationId, TransportError, WorkerId};
use settle_exchange::{Collective, RowBlock};
use settle_grid::Grid;

/// One gather served by a [`RecordingCollective`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatherRecord {
    pub iteration: IterationId,
    pub start_row: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Shared view of the gathers a [`RecordingCollective`] has served.
///
/// Clone the handle before moving the collective into the code under
/// test; both sides see the same records.
pub type GatherLog = Arc<Mutex<Vec<GatherRecord>>>;

/// Single-worker loopback collective that records every gather and can
/// be scripted to fail at a chosen iteration.
pub struct RecordingCollective {
    worker: WorkerId,
    log: GatherLog,
    fail_at: Option<(IterationId, TransportError)>,
}

impl RecordingCollective {
    pub fn new(worker: WorkerId) -> Self {
        Self {
            worker,
            log: Arc::new(Mutex::new(Vec::new())),
            fail_at: None,
        }
    }

    /// Handle onto the gather log.
    pub fn log(&self) -> GatherLog {
        Arc::clone(&self.log)
    }

    /// Script a failure: the gather for `iteration` returns `error`
    /// instead of completing.
    pub fn fail_at(mut self, iteration: IterationId, error: TransportError) -> Self {
        self.fail_at = Some((iteration, error));
        self
    }
}

impl Collective for RecordingCollective {
    fn worker(&self) -> WorkerId {
        self.worker
    }

    fn all_gather(
        &mut self,
        own: RowBlock,
        into: &mut Vec<RowBlock>,
    ) -> Result<(), TransportError> {
        if let Some((iteration, error)) = &self.fail_at {
            if own.iteration == *iteration {
                return Err(error.clone());
            }
        }
        self.log.lock().unwrap().push(GatherRecord {
            iteration: own.iteration,
            start_row: own.start_row,
            rows: own.rows(),
            cols: own.cols,
        });
        into.clear();
        into.push(own);
        Ok(())
    }
}

/// A `dim` x `dim` grid holding `value` everywhere.
pub fn uniform(dim: usize, value: f64) -> Grid {
    Grid::from_fn(dim, dim, |_, _| value).unwrap()
}

/// A `dim` x `dim` grid of zeros with `value` at the center cell.
pub fn spike(dim: usize, value: f64) -> Grid {
    let mid = dim / 2;
    Grid::from_fn(dim, dim, |r, c| if r == mid && c == mid { value } else { 0.0 }).unwrap()
}

/// Straight-line single-threaded relaxation, written independently of
/// the solver crates so tests have something to disagree with.
///
/// Applies the same update rule as the solver — an interior cell takes
/// its four-neighbour mean when the mean has moved by at least
/// `precision`, and holds otherwise — and stops when an iteration
/// changes nothing or the cap runs out. Returns the final grid, the
/// iterations completed, and whether it settled.
pub fn relax_reference(seed: &Grid, precision: f64, max_iterations: u64) -> (Grid, u64, bool) {
    let d = seed.rows();
    assert_eq!(d, seed.cols(), "reference expects a square grid");

    let mut cells: Vec<Vec<f64>> = (0..d).map(|r| seed.row(r).to_vec()).collect();
    let mut completed = 0;
    let mut settled = false;

    for iteration in 1..=max_iterations {
        let mut next = cells.clone();
        let mut changed = 0usize;
        for r in 1..d.saturating_sub(1) {
            for c in 1..d.saturating_sub(1) {
                let mean =
                    (cells[r - 1][c] + cells[r + 1][c] + cells[r][c - 1] + cells[r][c + 1]) / 4.0;
                if (mean - cells[r][c]).abs() >= precision {
                    next[r][c] = mean;
                    changed += 1;
                }
            }
        }
        cells = next;
        completed = iteration;
        if changed == 0 {
            settled = true;
            break;
        }
    }

    let grid = Grid::from_fn(d, d, |r, c| cells[r][c]).unwrap();
    (grid, completed, settled)
}
