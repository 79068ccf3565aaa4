//! Solve configuration, validation, and error types.
//!
//! [`SolveConfig`] is the caller-facing knob set for one solve.
//! [`validate()`](SolveConfig::validate) checks it against the seed
//! grid before any thread is spawned, so every failure mode that can
//! be caught up front is caught up front.

use std::error::Error;
use std::fmt;

use settle_grid::Grid;

// ── SolveConfig ────────────────────────────────────────────────────

/// Complete configuration for one relaxation solve.
#[derive(Clone, Debug)]
pub struct SolveConfig {
    /// Worker group size. `None` = auto-detect from
    /// `available_parallelism`, clamped to `[1, 64]`.
    pub workers: Option<usize>,
    /// A cell is settled once its four-neighbour mean moves it by less
    /// than this. Must be finite and positive.
    pub precision: f64,
    /// Safety cap on iterations; a solve that has not converged by
    /// then stops and says so.
    pub max_iterations: u64,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            workers: None,
            precision: 0.01,
            max_iterations: 50_000,
        }
    }
}

impl SolveConfig {
    /// Resolve the worker count, applying auto-detection if `None`.
    ///
    /// Explicit values pass through untouched — the partitioner clamps
    /// to the grid dimension later, and `validate()` rejects an
    /// explicit zero.
    pub fn resolved_workers(&self) -> usize {
        match self.workers {
            Some(n) => n,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        }
    }

    /// Validate the configuration against the grid it will relax.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found; nothing about the
    /// solve has started when this fails.
    pub fn validate(&self, seed: &Grid) -> Result<(), ConfigError> {
        // 1. Rows are what gets divided among workers; columns ride
        //    along. Only square grids are supported.
        if seed.rows() != seed.cols() {
            return Err(ConfigError::SeedNotSquare {
                rows: seed.rows(),
                cols: seed.cols(),
            });
        }
        // 2. Below 3x3 there are no interior cells to relax.
        if seed.rows() < 3 {
            return Err(ConfigError::DimensionTooSmall {
                dimension: seed.rows(),
            });
        }
        // 3. A NaN or infinity anywhere would spread through the means.
        for r in 0..seed.rows() {
            for (c, &value) in seed.row(r).iter().enumerate() {
                if !value.is_finite() {
                    return Err(ConfigError::NonFiniteSeed { row: r, col: c, value });
                }
            }
        }
        // 4. Precision must be finite and positive.
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(ConfigError::InvalidPrecision {
                value: self.precision,
            });
        }
        // 5. An explicit worker count of zero cannot make progress.
        if self.workers == Some(0) {
            return Err(ConfigError::NoWorkers);
        }
        // 6. The cap must allow at least one iteration.
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SolveConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The seed grid is not square.
    SeedNotSquare {
        /// Rows in the rejected grid.
        rows: usize,
        /// Columns in the rejected grid.
        cols: usize,
    },
    /// The seed grid is too small to have interior cells.
    DimensionTooSmall {
        /// The rejected dimension.
        dimension: usize,
    },
    /// The seed grid contains a NaN or infinity.
    NonFiniteSeed {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The offending value.
        value: f64,
    },
    /// Precision is NaN, infinite, zero, or negative.
    InvalidPrecision {
        /// The invalid value.
        value: f64,
    },
    /// An explicit worker count of zero was requested.
    NoWorkers,
    /// The iteration cap is zero.
    ZeroIterationCap,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedNotSquare { rows, cols } => {
                write!(f, "seed grid is {rows}x{cols}, must be square")
            }
            Self::DimensionTooSmall { dimension } => {
                write!(f, "dimension {dimension} is below the minimum of 3")
            }
            Self::NonFiniteSeed { row, col, value } => {
                write!(f, "seed cell ({row}, {col}) is not finite: {value}")
            }
            Self::InvalidPrecision { value } => {
                write!(f, "precision must be finite and positive, got {value}")
            }
            Self::NoWorkers => write!(f, "worker count must be at least 1"),
            Self::ZeroIterationCap => write!(f, "max_iterations must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(dim: usize) -> Grid {
        Grid::from_fn(dim, dim, |r, c| (r + c) as f64).unwrap()
    }

    #[test]
    fn default_config_validates_against_a_sane_grid() {
        let config = SolveConfig::default();
        assert_eq!(config.validate(&square(10)), Ok(()));
    }

    #[test]
    fn non_square_grid_is_rejected() {
        let grid = Grid::allocate(4, 5).unwrap();
        match SolveConfig::default().validate(&grid) {
            Err(ConfigError::SeedNotSquare { rows: 4, cols: 5 }) => {}
            other => panic!("expected SeedNotSquare, got {other:?}"),
        }
    }

    #[test]
    fn tiny_grid_is_rejected() {
        match SolveConfig::default().validate(&square(2)) {
            Err(ConfigError::DimensionTooSmall { dimension: 2 }) => {}
            other => panic!("expected DimensionTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_seed_is_rejected_with_location() {
        let mut grid = square(4);
        grid.set(2, 3, f64::NAN);
        match SolveConfig::default().validate(&grid) {
            Err(ConfigError::NonFiniteSeed { row: 2, col: 3, .. }) => {}
            other => panic!("expected NonFiniteSeed, got {other:?}"),
        }
    }

    #[test]
    fn bad_precision_is_rejected() {
        for precision in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = SolveConfig {
                precision,
                ..SolveConfig::default()
            };
            match config.validate(&square(5)) {
                Err(ConfigError::InvalidPrecision { .. }) => {}
                other => panic!("precision {precision}: expected InvalidPrecision, got {other:?}"),
            }
        }
    }

    #[test]
    fn explicit_zero_workers_is_rejected() {
        let config = SolveConfig {
            workers: Some(0),
            ..SolveConfig::default()
        };
        match config.validate(&square(5)) {
            Err(ConfigError::NoWorkers) => {}
            other => panic!("expected NoWorkers, got {other:?}"),
        }
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let config = SolveConfig {
            max_iterations: 0,
            ..SolveConfig::default()
        };
        match config.validate(&square(5)) {
            Err(ConfigError::ZeroIterationCap) => {}
            other => panic!("expected ZeroIterationCap, got {other:?}"),
        }
    }

    #[test]
    fn resolved_workers_passes_explicit_values_through() {
        let config = SolveConfig {
            workers: Some(7),
            ..SolveConfig::default()
        };
        assert_eq!(config.resolved_workers(), 7);
    }

    #[test]
    fn resolved_workers_auto_detect_stays_in_bounds() {
        let resolved = SolveConfig::default().resolved_workers();
        assert!((1..=64).contains(&resolved));
    }
}
