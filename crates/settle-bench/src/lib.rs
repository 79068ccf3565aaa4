//! Benchmark profiles for the Settle relaxation solver.
//!
//! Provides pre-built seed grids and configurations shared by the
//! criterion benches:
//!
//! - [`reference_seed`]: 100x100 benchmark grid (10K cells)
//! - [`stress_seed`]: 316x316 benchmark grid (~100K cells)
//! - [`profile_config`]: the matching solve configuration

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use settle_engine::SolveConfig;
use settle_grid::Grid;

/// Reference profile dimension: 100x100 (10K cells).
pub const REFERENCE_DIM: usize = 100;

/// Stress profile dimension: 316x316 (~100K cells).
pub const STRESS_DIM: usize = 316;

/// The reference seed: the canonical tiled benchmark grid at
/// [`REFERENCE_DIM`]. Bit-identical on every machine, so results are
/// comparable across runs.
pub fn reference_seed() -> Grid {
    settle_problem::tiled(REFERENCE_DIM).expect("reference profile always fits")
}

/// The stress seed: the same tiled grid at 10x the cell count.
pub fn stress_seed() -> Grid {
    settle_problem::tiled(STRESS_DIM).expect("stress profile always fits")
}

/// Solve configuration used by the profiles.
///
/// A coarse precision keeps full-solve benches bounded; the cap is a
/// backstop, never the expected exit.
pub fn profile_config(workers: usize) -> SolveConfig {
    SolveConfig {
        workers: Some(workers),
        precision: 0.1,
        max_iterations: 50_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_have_the_advertised_shapes() {
        let reference = reference_seed();
        assert_eq!(reference.rows(), REFERENCE_DIM);
        assert_eq!(reference.cols(), REFERENCE_DIM);

        let stress = stress_seed();
        assert_eq!(stress.rows(), STRESS_DIM);
    }

    #[test]
    fn profile_config_validates() {
        let config = profile_config(4);
        assert_eq!(config.validate(&reference_seed()), Ok(()));
    }
}
