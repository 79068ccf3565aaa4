//! Row-major grid storage with row and block views.
//!
//! [`Grid`] owns one contiguous `Vec<f64>`. Rows are `cols`-wide
//! windows at fixed stride, so any run of consecutive rows is a single
//! flat slice — the guarantee the row exchange relies on when packing
//! and unpacking worker blocks.

use std::error::Error;
use std::fmt;

/// Errors from grid allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// `rows * cols` does not fit in memory arithmetic.
    CapacityOverflow {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { rows, cols } => {
                write!(f, "grid of {rows}x{cols} cells overflows capacity")
            }
        }
    }
}

impl Error for GridError {}

/// A dense row-major grid of `f64` values.
///
/// The storage is a single contiguous allocation. Cell `(r, c)` lives
/// at flat index `r * cols + c`. Row and block accessors hand out
/// slices into that allocation; there is no per-row indirection.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Contiguous row-major storage, `rows * cols` long.
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Allocate a zero-filled grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CapacityOverflow`] if `rows * cols`
    /// overflows `usize`.
    pub fn allocate(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::CapacityOverflow { rows, cols })?;
        Ok(Self {
            data: vec![0.0; len],
            rows,
            cols,
        })
    }

    /// Allocate a grid seeded cell by cell from `f(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CapacityOverflow`] if `rows * cols`
    /// overflows `usize`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut grid = Self::allocate(rows, cols)?;
        for r in 0..rows {
            let row = grid.row_mut(r);
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = f(r, c);
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows` or `c >= cols`.
    pub fn at(&self, r: usize, c: usize) -> f64 {
        assert!(r < self.rows && c < self.cols, "cell ({r}, {c}) out of bounds");
        self.data[r * self.cols + c]
    }

    /// Write a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows` or `c >= cols`.
    pub fn set(&mut self, r: usize, c: usize, value: f64) {
        assert!(r < self.rows && c < self.cols, "cell ({r}, {c}) out of bounds");
        self.data[r * self.cols + c] = value;
    }

    /// View one row.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    pub fn row(&self, r: usize) -> &[f64] {
        assert!(r < self.rows, "row {r} out of bounds ({} rows)", self.rows);
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Mutable view of one row.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        assert!(r < self.rows, "row {r} out of bounds ({} rows)", self.rows);
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// View a run of `count` consecutive rows starting at `start` as one
    /// flat slice of `count * cols` values.
    ///
    /// # Panics
    ///
    /// Panics if `start + count > rows`.
    pub fn block(&self, start: usize, count: usize) -> &[f64] {
        let end = start + count;
        assert!(
            end <= self.rows,
            "block rows [{start}, {end}) out of bounds ({} rows)",
            self.rows
        );
        &self.data[start * self.cols..end * self.cols]
    }

    /// Mutable view of a run of consecutive rows as one flat slice.
    ///
    /// # Panics
    ///
    /// Panics if `start + count > rows`.
    pub fn block_mut(&mut self, start: usize, count: usize) -> &mut [f64] {
        let end = start + count;
        assert!(
            end <= self.rows,
            "block rows [{start}, {end}) out of bounds ({} rows)",
            self.rows
        );
        &mut self.data[start * self.cols..end * self.cols]
    }

    /// The whole grid as one flat row-major slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Total memory usage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f64>()
    }
}

/// Exact-value comparison of two rows of equal width.
///
/// Bit-level float equality, no tolerance: this is for checking that a
/// row survived a round trip untouched, not for convergence decisions.
///
/// # Panics
///
/// Panics if the rows differ in width.
pub fn rows_equal(a: &[f64], b: &[f64]) -> bool {
    assert_eq!(a.len(), b.len(), "rows differ in width");
    a == b
}
