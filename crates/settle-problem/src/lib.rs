//! Seed grid generators.
//!
//! Three ways to populate the square grid a solve starts from: the
//! canonical tiled benchmark grid, a reproducible random grid, and a
//! hot-edge Dirichlet grid. All three are deterministic — the random
//! generator takes an explicit seed — so a solve can be replayed
//! exactly from its command line.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod generate;

pub use generate::{dirichlet, random, tiled, ProblemError};
