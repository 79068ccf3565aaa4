//! Worker assignment table and the padding arithmetic behind it.

use settle_core::{WorkerId, WorkerSet};

/// One worker's slice of the padded grid.
///
/// Assignments are contiguous, ordered by worker, and all the same
/// size: worker `i` owns rows `[i * rows, (i + 1) * rows)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerAssignment {
    /// The worker that owns this row range.
    pub worker: WorkerId,
    /// First row of the range (inclusive).
    pub start_row: usize,
    /// Number of rows in the range.
    pub rows: usize,
}

impl WorkerAssignment {
    /// One past the last row of the range.
    pub fn end_row(&self) -> usize {
        self.start_row + self.rows
    }
}

/// The result of decomposing a square grid across a worker group.
///
/// Computed once per solve and immutable afterwards. Every quantity
/// the exchange and the engine need — effective worker count, uniform
/// block size, padded row total, per-worker offsets — comes from here,
/// so no other component re-derives the arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    dimension: usize,
    requested_workers: usize,
    rows_per_worker: usize,
    padded_rows: usize,
    assignments: Vec<WorkerAssignment>,
}

impl Partition {
    /// Decompose a `dimension`-row grid across up to
    /// `requested_workers` workers.
    ///
    /// More workers than rows are clamped to the row count. If the
    /// dimension does not divide evenly by the (clamped) worker count,
    /// each block grows by one row and the grid is padded up to the
    /// next multiple of the block size; the effective worker count is
    /// then `padded / block`, which can drop below the request. All
    /// surviving workers own exactly the same number of rows.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` or `requested_workers` is zero, or if the
    /// effective worker count does not fit in a `u32`. Callers validate
    /// their configuration before partitioning.
    pub fn compute(dimension: usize, requested_workers: usize) -> Self {
        assert!(dimension >= 1, "cannot partition an empty grid");
        assert!(requested_workers >= 1, "cannot partition across zero workers");

        let clamped = requested_workers.min(dimension);
        let leftover = dimension % clamped;

        let (rows_per_worker, padded_rows) = if leftover == 0 {
            (dimension / clamped, dimension)
        } else {
            let rows = dimension / clamped + 1;
            (rows, dimension.div_ceil(rows) * rows)
        };
        let worker_count = padded_rows / rows_per_worker;
        assert!(
            u32::try_from(worker_count).is_ok(),
            "worker count {worker_count} exceeds the id space"
        );

        let assignments = (0..worker_count)
            .map(|i| WorkerAssignment {
                worker: WorkerId(i as u32),
                start_row: i * rows_per_worker,
                rows: rows_per_worker,
            })
            .collect();

        Self {
            dimension,
            requested_workers,
            rows_per_worker,
            padded_rows,
            assignments,
        }
    }

    /// The problem dimension this partition was computed for.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The worker count that was asked for, before clamping.
    pub fn requested_workers(&self) -> usize {
        self.requested_workers
    }

    /// Number of workers that actually participate.
    pub fn worker_count(&self) -> usize {
        self.assignments.len()
    }

    /// Rows owned by each participating worker (uniform).
    pub fn rows_per_worker(&self) -> usize {
        self.rows_per_worker
    }

    /// Total rows including padding; always `worker_count * rows_per_worker`.
    pub fn padded_rows(&self) -> usize {
        self.padded_rows
    }

    /// Number of padding rows appended below the problem grid.
    pub fn padding_rows(&self) -> usize {
        self.padded_rows - self.dimension
    }

    /// All assignments, ordered by worker.
    pub fn assignments(&self) -> &[WorkerAssignment] {
        &self.assignments
    }

    /// The assignment for one worker, or `None` if the worker was
    /// excluded by clamping.
    pub fn assignment(&self, worker: WorkerId) -> Option<&WorkerAssignment> {
        self.assignments.get(worker.0 as usize)
    }

    /// Whether a worker participates in this solve.
    pub fn is_active(&self, worker: WorkerId) -> bool {
        (worker.0 as usize) < self.assignments.len()
    }

    /// The participating workers, in order.
    pub fn active_workers(&self) -> WorkerSet {
        self.assignments.iter().map(|a| a.worker).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn even_division_needs_no_padding() {
        let p = Partition::compute(10, 5);
        assert_eq!(p.worker_count(), 5);
        assert_eq!(p.rows_per_worker(), 2);
        assert_eq!(p.padded_rows(), 10);
        assert_eq!(p.padding_rows(), 0);
    }

    #[test]
    fn uneven_division_pads_to_block_multiple() {
        // 5 rows over 3 workers: blocks of 2, padded to 6 rows.
        let p = Partition::compute(5, 3);
        assert_eq!(p.rows_per_worker(), 2);
        assert_eq!(p.padded_rows(), 6);
        assert_eq!(p.worker_count(), 3);
        assert_eq!(p.padding_rows(), 1);
    }

    #[test]
    fn padding_can_shrink_the_worker_group() {
        // 4 rows over 3 workers: blocks of 2, padded total stays 4,
        // so only 2 workers survive.
        let p = Partition::compute(4, 3);
        assert_eq!(p.rows_per_worker(), 2);
        assert_eq!(p.padded_rows(), 4);
        assert_eq!(p.worker_count(), 2);
        assert!(p.is_active(WorkerId(1)));
        assert!(!p.is_active(WorkerId(2)));
        assert!(p.assignment(WorkerId(2)).is_none());
    }

    #[test]
    fn more_workers_than_rows_clamps() {
        let p = Partition::compute(3, 10);
        assert_eq!(p.worker_count(), 3);
        assert_eq!(p.rows_per_worker(), 1);
        assert_eq!(p.padded_rows(), 3);
    }

    #[test]
    fn single_worker_owns_everything() {
        let p = Partition::compute(7, 1);
        assert_eq!(p.worker_count(), 1);
        assert_eq!(p.rows_per_worker(), 7);
        assert_eq!(p.padded_rows(), 7);
        let a = p.assignment(WorkerId(0)).unwrap();
        assert_eq!(a.start_row, 0);
        assert_eq!(a.end_row(), 7);
    }

    #[test]
    fn assignments_are_contiguous_and_ordered() {
        let p = Partition::compute(10, 3);
        let mut expected_start = 0;
        for (i, a) in p.assignments().iter().enumerate() {
            assert_eq!(a.worker, WorkerId(i as u32));
            assert_eq!(a.start_row, expected_start);
            assert_eq!(a.rows, p.rows_per_worker());
            expected_start = a.end_row();
        }
        assert_eq!(expected_start, p.padded_rows());
    }

    #[test]
    fn active_workers_matches_assignment_table() {
        let p = Partition::compute(5, 3);
        let active = p.active_workers();
        assert_eq!(active.len(), 3);
        assert_eq!(active[0], WorkerId(0));
        assert_eq!(active[2], WorkerId(2));
    }

    #[test]
    #[should_panic(expected = "empty grid")]
    fn zero_dimension_panics() {
        let _ = Partition::compute(0, 1);
    }

    #[test]
    #[should_panic(expected = "zero workers")]
    fn zero_workers_panics() {
        let _ = Partition::compute(5, 0);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn blocks_tile_the_padded_grid(
            dimension in 1usize..500,
            requested in 1usize..64,
        ) {
            let p = Partition::compute(dimension, requested);
            prop_assert_eq!(
                p.worker_count() * p.rows_per_worker(),
                p.padded_rows()
            );
            // Contiguous, ordered, disjoint cover of [0, padded).
            let mut cursor = 0;
            for a in p.assignments() {
                prop_assert_eq!(a.start_row, cursor);
                cursor = a.end_row();
            }
            prop_assert_eq!(cursor, p.padded_rows());
        }

        #[test]
        fn padding_is_minimal(
            dimension in 1usize..500,
            requested in 1usize..64,
        ) {
            let p = Partition::compute(dimension, requested);
            // Smallest multiple of the block size that covers the grid.
            prop_assert!(p.padded_rows() >= dimension);
            prop_assert!(p.padded_rows() - dimension < p.rows_per_worker());
            prop_assert_eq!(p.padded_rows() % p.rows_per_worker(), 0);
        }

        #[test]
        fn worker_count_never_exceeds_request_or_rows(
            dimension in 1usize..500,
            requested in 1usize..64,
        ) {
            let p = Partition::compute(dimension, requested);
            prop_assert!(p.worker_count() <= requested.min(dimension));
            prop_assert!(p.worker_count() >= 1);
        }
    }
}
