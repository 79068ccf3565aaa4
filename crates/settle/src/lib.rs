//! Settle: a distributed Jacobi relaxation solver for square boundary-value grids.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Settle sub-crates. For most users, adding `settle` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use settle::prelude::*;
//!
//! // The canonical benchmark grid at dimension 10.
//! let seed = settle::problem::tiled(10).unwrap();
//!
//! let config = SolveConfig {
//!     workers: Some(2),
//!     precision: 0.01,
//!     max_iterations: 10_000,
//! };
//! let solution = solve(&config, &seed).unwrap();
//!
//! assert!(solution.termination.is_converged());
//! // Every interior cell now sits within precision of its
//! // four-neighbour mean.
//! assert!(settle::sweep::within_precision(&solution.grid, 0.01));
//! // The boundary frame is untouched.
//! assert_eq!(solution.grid.row(0), seed.row(0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `settle-core` | Worker and iteration IDs, transport errors |
//! | [`grid`] | `settle-grid` | Contiguous grid storage, padded working copies |
//! | [`partition`] | `settle-partition` | Row-range domain decomposition |
//! | [`sweep`] | `settle-sweep` | The Jacobi sweep and residual checks |
//! | [`exchange`] | `settle-exchange` | The collective exchange and channel mesh |
//! | [`engine`] | `settle-engine` | Configuration, the solve driver, metrics |
//! | [`problem`] | `settle-problem` | Deterministic seed grid generators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Worker and iteration IDs, worker sets, transport errors (`settle-core`).
pub use settle_core as types;

/// Contiguous grid storage (`settle-grid`).
///
/// [`grid::Grid`] is the problem-shaped grid; [`grid::PaddedGrid`] is the
/// working shape with zeroed rows appended for uniform worker blocks.
pub use settle_grid as grid;

/// Row-range domain decomposition (`settle-partition`).
///
/// [`partition::Partition::compute`] decides block size, padding, and the
/// active worker subset once per solve.
pub use settle_partition as partition;

/// The Jacobi sweep and residual checks (`settle-sweep`).
pub use settle_sweep as sweep;

/// The collective exchange contract and channel-mesh transport
/// (`settle-exchange`).
///
/// Implement [`exchange::Collective`] to run the solver over a different
/// transport.
pub use settle_exchange as exchange;

/// Configuration, the solve driver, and metrics (`settle-engine`).
pub use settle_engine as engine;

/// Deterministic seed grid generators (`settle-problem`).
pub use settle_problem as problem;

/// Common imports for typical Settle usage.
///
/// ```rust
/// use settle::prelude::*;
/// ```
///
/// This imports the solve entry point, its configuration and outcome types,
/// the grid types, and the IDs that appear in errors.
pub mod prelude {
    // Grids
    pub use settle_grid::{Grid, GridError, PaddedGrid};

    // IDs and transport errors
    pub use settle_core::{IterationId, TransportError, WorkerId};

    // Partitioning
    pub use settle_partition::{Partition, WorkerAssignment};

    // Driver
    pub use settle_engine::{
        solve, ConfigError, Solution, SolveConfig, SolveError, SolveStats, Termination,
    };
}
