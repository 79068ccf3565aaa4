//! Contiguous grid storage for the Settle relaxation solver.
//!
//! Provides [`Grid`], a single contiguous row-major block of `f64`
//! values addressed through row views, and [`PaddedGrid`], the working
//! shape with extra zeroed rows appended so every worker transfers an
//! identically sized block.
//!
//! All grid memory in a solve is allocated here; release is `Drop`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod padded;

pub use grid::{rows_equal, Grid, GridError};
pub use padded::PaddedGrid;
