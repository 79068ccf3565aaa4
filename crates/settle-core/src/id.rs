//! Strongly-typed identifiers and the [`WorkerSet`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a worker within a solve.
///
/// Workers are assigned sequential IDs by the partitioner. `WorkerId(n)`
/// owns the n-th row block of the padded grid; worker 0 additionally
/// delivers the final solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub u32);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WorkerId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing iteration counter.
///
/// Incremented once per sweep/exchange/merge cycle. Iteration 0 is the
/// seeded state before any relaxation; the first sweep produces
/// iteration 1. Exchanged row blocks are tagged with the iteration they
/// belong to so lockstep violations are detectable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IterationId(pub u64);

impl IterationId {
    /// The iteration that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for IterationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for IterationId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// An ordered set of worker IDs.
///
/// Uses `SmallVec<[WorkerId; 8]>` to avoid heap allocation for the
/// common case of a handful of workers (one per core). Larger worker
/// groups spill to the heap transparently.
pub type WorkerSet = SmallVec<[WorkerId; 8]>;
