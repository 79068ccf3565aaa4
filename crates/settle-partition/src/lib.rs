//! Row-range domain decomposition for the Settle relaxation solver.
//!
//! [`Partition::compute`] maps a square grid's rows onto a worker
//! group. When the dimension does not divide evenly, the row count is
//! rounded up to the next multiple of the per-worker block size and the
//! surplus becomes padding rows; workers that would own nothing but
//! padding are excluded from the solve entirely.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod partition;

pub use partition::{Partition, WorkerAssignment};
