//! Padded working copy of a problem grid.
//!
//! The partitioner may round the row count up so every worker owns an
//! equal number of rows. [`PaddedGrid`] is the problem grid plus those
//! appended padding rows: the padding is seeded to zero, shipped
//! through the exchange like any other rows, and never relaxed or
//! merged. Trimming the padding back off recovers the problem grid.

use crate::grid::{Grid, GridError};

/// A problem grid extended with zeroed padding rows.
///
/// Rows `[0, problem_rows)` hold problem data; rows
/// `[problem_rows, padded rows)` exist only so worker blocks have a
/// uniform shape. The stencil sweep copies padding verbatim and the
/// convergence merge ignores it, so the padding stays zero for the
/// lifetime of a solve.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddedGrid {
    grid: Grid,
    problem_rows: usize,
}

impl PaddedGrid {
    /// Build a padded copy of `seed` with `padded_rows` total rows.
    ///
    /// The seed's rows are copied verbatim; the appended rows are
    /// zero-filled.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CapacityOverflow`] if the padded shape
    /// overflows.
    ///
    /// # Panics
    ///
    /// Panics if `padded_rows < seed.rows()`. The partitioner always
    /// produces a padded row count at least as large as the dimension.
    pub fn from_seed(seed: &Grid, padded_rows: usize) -> Result<Self, GridError> {
        assert!(
            padded_rows >= seed.rows(),
            "padded row count {padded_rows} is below the problem's {} rows",
            seed.rows()
        );
        let mut grid = Grid::allocate(padded_rows, seed.cols())?;
        grid.block_mut(0, seed.rows())
            .copy_from_slice(seed.block(0, seed.rows()));
        Ok(Self {
            grid,
            problem_rows: seed.rows(),
        })
    }

    /// Number of problem rows (the original dimension).
    pub fn problem_rows(&self) -> usize {
        self.problem_rows
    }

    /// Total row count including padding.
    pub fn padded_rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// The underlying padded grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the underlying padded grid.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Trim the padding off, recovering a problem-shaped grid.
    pub fn into_problem_grid(self) -> Grid {
        if self.grid.rows() == self.problem_rows {
            return self.grid;
        }
        // Strictly smaller than the allocation that already succeeded.
        let mut trimmed = Grid::allocate(self.problem_rows, self.grid.cols())
            .expect("trimmed shape fits inside the padded allocation");
        trimmed
            .block_mut(0, self.problem_rows)
            .copy_from_slice(self.grid.block(0, self.problem_rows));
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_3x3() -> Grid {
        Grid::from_fn(3, 3, |r, c| (r * 3 + c) as f64).unwrap()
    }

    #[test]
    fn from_seed_copies_problem_rows() {
        let seed = seed_3x3();
        let padded = PaddedGrid::from_seed(&seed, 4).unwrap();
        assert_eq!(padded.problem_rows(), 3);
        assert_eq!(padded.padded_rows(), 4);
        for r in 0..3 {
            assert_eq!(padded.grid().row(r), seed.row(r));
        }
    }

    #[test]
    fn padding_rows_start_zeroed() {
        let seed = seed_3x3();
        let padded = PaddedGrid::from_seed(&seed, 6).unwrap();
        for r in 3..6 {
            assert!(
                padded.grid().row(r).iter().all(|&v| v == 0.0),
                "padding row {r} not zeroed"
            );
        }
    }

    #[test]
    fn no_padding_when_counts_match() {
        let seed = seed_3x3();
        let padded = PaddedGrid::from_seed(&seed, 3).unwrap();
        assert_eq!(padded.padded_rows(), 3);
        assert_eq!(padded.into_problem_grid(), seed);
    }

    #[test]
    fn into_problem_grid_trims_padding() {
        let seed = seed_3x3();
        let mut padded = PaddedGrid::from_seed(&seed, 5).unwrap();
        // Dirty the padding; trimming must discard it.
        padded.grid_mut().row_mut(4).fill(99.0);
        let trimmed = padded.into_problem_grid();
        assert_eq!(trimmed, seed);
    }

    #[test]
    #[should_panic(expected = "below the problem")]
    fn from_seed_rejects_short_padding() {
        let seed = seed_3x3();
        let _ = PaddedGrid::from_seed(&seed, 2);
    }
}
