//! Collective row-block exchange between solver workers.
//!
//! After each sweep, every worker publishes its freshly relaxed block
//! and collects every other worker's block for the same iteration.
//! [`Collective::all_gather`] is that contract; [`ChannelMesh`] is the
//! in-process implementation, a full mesh of dedicated bounded
//! channels with one endpoint per worker.
//!
//! The gather is blocking and collective: no worker proceeds to the
//! next iteration until it holds the complete set of blocks, and a
//! worker that drops out surfaces as a [`TransportError`] on every
//! surviving endpoint rather than as a hang.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod collective;
pub mod mesh;

pub use block::RowBlock;
pub use collective::Collective;
pub use mesh::{ChannelCollective, ChannelMesh};
