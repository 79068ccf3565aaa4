//! Precision-bounded merge of gathered blocks.
//!
//! After each exchange every worker folds the full block set into its
//! own copy of the padded grid. A cell is overwritten only when the
//! incoming value differs from the held value by at least the working
//! precision, and the solve has converged exactly when an iteration
//! merges zero cells — so the verdict never hinges on bit-exact float
//! identity, and every worker reaches it from its own copy.

use settle_exchange::RowBlock;
use settle_grid::PaddedGrid;

/// Counters reported by one merge call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Interior cells whose incoming value replaced the held value.
    pub cells_merged: usize,
}

impl MergeOutcome {
    /// Whether the iteration that produced these blocks settled the
    /// grid: nothing anywhere moved by the working precision.
    pub fn converged(&self) -> bool {
        self.cells_merged == 0
    }
}

/// Fold a gathered block set into the authoritative padded grid.
///
/// `blocks` must be in worker order and tile the padded grid exactly,
/// which is what a successful gather hands back. Only interior cells
/// are examined; boundary rows, boundary columns, and padding rows
/// never change, and the sweep already ships them back verbatim.
///
/// # Panics
///
/// Panics if the blocks do not tile the padded grid exactly or a block
/// width does not match the grid.
pub fn merge_blocks(
    authoritative: &mut PaddedGrid,
    blocks: &[RowBlock],
    precision: f64,
) -> MergeOutcome {
    let dimension = authoritative.problem_rows();
    let cols = authoritative.cols();

    let mut expected_start = 0;
    let mut cells_merged = 0;
    for block in blocks {
        assert_eq!(
            block.start_row, expected_start,
            "gathered blocks do not tile the padded grid"
        );
        assert_eq!(block.cols, cols, "block width does not match the grid");
        expected_start = block.end_row();

        for local in 0..block.rows() {
            let r = block.start_row + local;
            if r == 0 || r + 1 >= dimension {
                continue;
            }
            let incoming = &block.values[local * cols..(local + 1) * cols];
            let held = authoritative.grid_mut().row_mut(r);
            for c in 1..cols - 1 {
                if (incoming[c] - held[c]).abs() >= precision {
                    held[c] = incoming[c];
                    cells_merged += 1;
                }
            }
        }
    }
    assert_eq!(
        expected_start,
        authoritative.padded_rows(),
        "gathered blocks do not tile the padded grid"
    );

    MergeOutcome { cells_merged }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settle_core::{IterationId, WorkerId};
    use settle_grid::Grid;

    fn padded(dim: usize) -> PaddedGrid {
        let seed = Grid::from_fn(dim, dim, |r, c| (r * dim + c) as f64).unwrap();
        PaddedGrid::from_seed(&seed, dim).unwrap()
    }

    fn block_of(grid: &PaddedGrid, worker: u32, start_row: usize, rows: usize) -> RowBlock {
        RowBlock::new(
            IterationId(1),
            WorkerId(worker),
            start_row,
            grid.cols(),
            grid.grid().block(start_row, rows).to_vec(),
        )
    }

    #[test]
    fn identical_blocks_merge_nothing() {
        let mut grid = padded(5);
        let blocks = vec![block_of(&grid, 0, 0, 3), block_of(&grid, 1, 3, 2)];
        let before = grid.clone();
        let outcome = merge_blocks(&mut grid, &blocks, 0.01);
        assert!(outcome.converged());
        assert_eq!(outcome.cells_merged, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn moved_interior_cell_is_copied() {
        let mut grid = padded(5);
        let mut block = block_of(&grid, 0, 0, 5);
        // Cell (2, 2) moves well past the precision bound.
        block.values[2 * 5 + 2] += 3.0;
        let outcome = merge_blocks(&mut grid, &[block], 0.01);
        assert_eq!(outcome.cells_merged, 1);
        assert!(!outcome.converged());
        assert_eq!(grid.grid().at(2, 2), (2 * 5 + 2) as f64 + 3.0);
    }

    #[test]
    fn movement_below_precision_is_held() {
        let mut grid = padded(5);
        let mut block = block_of(&grid, 0, 0, 5);
        block.values[2 * 5 + 2] += 0.004;
        let before = grid.clone();
        let outcome = merge_blocks(&mut grid, &[block], 0.01);
        assert!(outcome.converged());
        assert_eq!(grid, before, "a sub-precision wiggle must not be copied");
    }

    #[test]
    fn frame_and_padding_are_never_merged() {
        let seed = Grid::from_fn(5, 5, |r, c| (r * 5 + c) as f64).unwrap();
        let mut grid = PaddedGrid::from_seed(&seed, 6).unwrap();
        let mut block = block_of(&grid, 0, 0, 6);
        // Scribble over the frame and the padding row; none of it may
        // land.
        block.values[0] = 999.0;
        block.values[4 * 5] = 999.0;
        block.values[2 * 5] = 999.0;
        block.values[2 * 5 + 4] = 999.0;
        block.values[5 * 5 + 2] = 999.0;
        let before = grid.clone();
        let outcome = merge_blocks(&mut grid, &[block], 0.01);
        assert!(outcome.converged());
        assert_eq!(grid, before);
    }

    #[test]
    fn merge_counts_match_across_split_and_whole() {
        let mut whole = padded(6);
        let mut split = whole.clone();
        let mut moved = block_of(&whole, 0, 0, 6);
        for c in 1..5 {
            moved.values[2 * 6 + c] += 5.0;
        }

        let whole_outcome = merge_blocks(&mut whole, &[moved.clone()], 0.01);

        let halves = vec![
            RowBlock::new(IterationId(1), WorkerId(0), 0, 6, moved.values[..18].to_vec()),
            RowBlock::new(IterationId(1), WorkerId(1), 3, 6, moved.values[18..].to_vec()),
        ];
        let split_outcome = merge_blocks(&mut split, &halves, 0.01);

        assert_eq!(whole_outcome, split_outcome);
        assert_eq!(whole, split);
    }

    #[test]
    #[should_panic(expected = "do not tile")]
    fn gapped_blocks_panic() {
        let mut grid = padded(5);
        let blocks = vec![block_of(&grid, 0, 0, 2), block_of(&grid, 1, 3, 2)];
        let _ = merge_blocks(&mut grid, &blocks, 0.01);
    }

    #[test]
    #[should_panic(expected = "width does not match")]
    fn wrong_width_panics() {
        let mut grid = padded(5);
        let narrow = RowBlock::new(IterationId(1), WorkerId(0), 0, 4, vec![0.0; 20]);
        let _ = merge_blocks(&mut grid, &[narrow], 0.01);
    }
}
