//! Jacobi relaxation sweep and residual checks.
//!
//! The sweep is the numeric heart of the solver: it recomputes one
//! worker's row block from the frozen iteration-start grid, averaging
//! each interior cell with its four neighbours and holding every cell
//! whose mean moved by less than the configured precision. Residual
//! helpers measure how far a finished grid sits from that fixed point.
//!
//! Everything here is pure computation over [`settle_grid`] storage.
//! Scheduling, exchange, and convergence live in the engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod residual;
pub mod sweep;

pub use residual::{max_residual, within_precision};
pub use sweep::{sweep_block, SweepStats};
