//! The relaxation sweep over one worker's row block.
//!
//! Each iteration computes, for every interior cell of the block:
//! ```text
//! mean = (prev[r-1][c] + prev[r+1][c] + prev[r][c-1] + prev[r][c+1]) / 4
//! out[r][c] = if |mean - prev[r][c]| >= precision { mean } else { prev[r][c] }
//! ```
//! All reads come from the frozen iteration-start grid, so a block's
//! contents depend only on that snapshot, never on sweep order or on
//! how rows were divided among workers.

use settle_grid::PaddedGrid;
use settle_partition::WorkerAssignment;

/// Counters reported by one sweep call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Interior cells whose refreshed mean replaced the old value.
    pub cells_updated: usize,
}

/// Relax one worker's row block against the frozen authoritative grid.
///
/// Writes the block's next-iteration contents into `out`, a flat
/// row-major buffer of `assignment.rows * cols` values. The first and
/// last problem rows, all padding rows, and the first and last column
/// pass through verbatim. An interior cell takes the mean of its four
/// neighbours only when that mean differs from the old value by at
/// least `precision`; otherwise the old value is kept bit for bit, so
/// a fully settled block reproduces the authoritative contents exactly.
///
/// Interior rows sit strictly above the last problem row, so their
/// neighbour reads never reach into the padding.
///
/// # Panics
///
/// Panics if `out` is not exactly `assignment.rows * cols` long, or if
/// the assignment reaches past the padded grid.
pub fn sweep_block(
    authoritative: &PaddedGrid,
    assignment: &WorkerAssignment,
    precision: f64,
    out: &mut [f64],
) -> SweepStats {
    let grid = authoritative.grid();
    let dimension = authoritative.problem_rows();
    let cols = authoritative.cols();

    assert_eq!(
        out.len(),
        assignment.rows * cols,
        "output buffer does not match the block shape"
    );
    assert!(
        assignment.end_row() <= grid.rows(),
        "assignment rows [{}, {}) reach past the padded grid ({} rows)",
        assignment.start_row,
        assignment.end_row(),
        grid.rows()
    );

    let mut cells_updated = 0;
    for local in 0..assignment.rows {
        let r = assignment.start_row + local;
        let out_row = &mut out[local * cols..(local + 1) * cols];

        // Boundary and padding rows pass through unchanged.
        if r == 0 || r + 1 >= dimension {
            out_row.copy_from_slice(grid.row(r));
            continue;
        }

        let above = grid.row(r - 1);
        let below = grid.row(r + 1);
        let here = grid.row(r);

        out_row[0] = here[0];
        out_row[cols - 1] = here[cols - 1];
        for c in 1..cols - 1 {
            let mean = (above[c] + below[c] + here[c - 1] + here[c + 1]) / 4.0;
            if (mean - here[c]).abs() >= precision {
                out_row[c] = mean;
                cells_updated += 1;
            } else {
                out_row[c] = here[c];
            }
        }
    }

    SweepStats { cells_updated }
}
