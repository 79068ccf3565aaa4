//! Core types for the Settle relaxation solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers and error types shared by every other crate in the
//! workspace: worker and iteration IDs, the small-set alias for worker
//! groups, and the transport failure taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::TransportError;
pub use id::{IterationId, WorkerId, WorkerSet};
