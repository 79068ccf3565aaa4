//! The wire type carried between workers.

use settle_core::{IterationId, WorkerId};

/// One worker's relaxed row block, in flight between workers.
///
/// Blocks are self-describing: they carry the iteration they were
/// computed in, the worker that computed them, and where their rows
/// sit in the padded grid. Receivers use the first two to catch a peer
/// that has fallen out of lockstep or produced a misshapen block.
#[derive(Clone, Debug, PartialEq)]
pub struct RowBlock {
    /// Iteration this block was computed in.
    pub iteration: IterationId,
    /// Worker that computed the block.
    pub worker: WorkerId,
    /// First padded-grid row the block covers.
    pub start_row: usize,
    /// Width of each row.
    pub cols: usize,
    /// Row-major cell values, `rows * cols` long.
    pub values: Vec<f64>,
}

impl RowBlock {
    /// Build a block, checking that `values` tiles into whole rows.
    ///
    /// # Panics
    ///
    /// Panics if `cols` is zero or `values.len()` is not a multiple of
    /// `cols`.
    pub fn new(
        iteration: IterationId,
        worker: WorkerId,
        start_row: usize,
        cols: usize,
        values: Vec<f64>,
    ) -> Self {
        assert!(cols > 0, "a block row cannot be zero cells wide");
        assert_eq!(
            values.len() % cols,
            0,
            "{} values do not tile into {cols}-wide rows",
            values.len()
        );
        Self {
            iteration,
            worker,
            start_row,
            cols,
            values,
        }
    }

    /// Number of whole rows in the block.
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.values.len() / self.cols
        }
    }

    /// One past the last padded-grid row the block covers.
    pub fn end_row(&self) -> usize {
        self.start_row + self.rows()
    }
}
