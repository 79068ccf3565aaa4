//! The collective exchange contract.

use crate::block::RowBlock;
use settle_core::{TransportError, WorkerId};

/// A blocking all-gather over a fixed worker group.
///
/// One endpoint belongs to one worker for the lifetime of a solve.
/// Implementations are moved into their worker's thread, so the trait
/// requires [`Send`] but never `Sync`.
pub trait Collective: Send {
    /// The worker this endpoint belongs to.
    fn worker(&self) -> WorkerId;

    /// Publish `own` and collect the full block set for its iteration.
    ///
    /// On success `into` holds exactly one block per group member,
    /// ordered by worker id, with `own` slotted into place. The call
    /// blocks until every peer's block has arrived.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] naming the offending peer when the
    /// group can no longer complete the iteration together: a peer is
    /// gone, sent a block for a different iteration, or sent a block
    /// whose shape does not match. `into` is left partially filled and
    /// must not be merged.
    fn all_gather(
        &mut self,
        own: RowBlock,
        into: &mut Vec<RowBlock>,
    ) -> Result<(), TransportError>;
}
