//! Worker orchestration and convergence for the Settle solver.
//!
//! This crate turns the pure pieces — partitioning, sweeping, the
//! collective exchange — into a running solve: [`solve`] validates a
//! [`SolveConfig`] against a seed grid, spawns one thread per active
//! worker, and joins the group into a [`Solution`] or a [`SolveError`].
//!
//! The loop each worker runs lives in [`worker`]; the precision-bounded
//! merge that decides convergence lives in [`convergence`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod convergence;
pub mod metrics;
pub mod solve;
pub mod worker;

pub use config::{ConfigError, SolveConfig};
pub use convergence::{merge_blocks, MergeOutcome};
pub use metrics::{IterationMetrics, SolveStats};
pub use solve::{solve, Solution, SolveError, Termination};
pub use worker::{run_worker, WorkerFailure, WorkerOutcome};
