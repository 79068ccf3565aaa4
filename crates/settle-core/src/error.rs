//! Transport failure taxonomy for the row exchange.
//!
//! Every variant carries the peer it implicates and maps to a stable
//! numeric code surfaced as the process exit status by the CLI. A
//! transport failure is fatal for the solve: there are no retries, and
//! the last successfully merged grid is preserved for best-effort
//! output.

use std::error::Error;
use std::fmt;

use crate::id::{IterationId, WorkerId};

/// Errors raised by the collective row exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// A peer's channel endpoint is gone — the peer thread exited or
    /// panicked mid-solve. Exit code 10.
    Disconnected {
        /// The peer that can no longer be reached.
        worker: WorkerId,
    },
    /// A received block does not have the agreed uniform shape. Exit
    /// code 11.
    BlockShape {
        /// The peer that sent the malformed block.
        worker: WorkerId,
        /// Rows expected per block.
        expected_rows: usize,
        /// Rows actually received.
        got_rows: usize,
        /// Columns expected per block.
        expected_cols: usize,
        /// Columns actually received.
        got_cols: usize,
    },
    /// A received block is tagged with a different iteration than the
    /// collective in progress — the lockstep contract was violated.
    /// Exit code 12.
    IterationSkew {
        /// The peer whose block was mis-tagged.
        worker: WorkerId,
        /// The iteration this collective is gathering.
        expected: IterationId,
        /// The iteration the block was tagged with.
        got: IterationId,
    },
}

impl TransportError {
    /// Stable numeric code for this failure class.
    ///
    /// Used as the process exit status when a solve dies on a transport
    /// failure: 10 disconnect, 11 block shape, 12 iteration skew.
    pub fn code(&self) -> i32 {
        match self {
            Self::Disconnected { .. } => 10,
            Self::BlockShape { .. } => 11,
            Self::IterationSkew { .. } => 12,
        }
    }

    /// The peer worker this failure implicates.
    pub fn worker(&self) -> WorkerId {
        match self {
            Self::Disconnected { worker }
            | Self::BlockShape { worker, .. }
            | Self::IterationSkew { worker, .. } => *worker,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected { worker } => {
                write!(f, "worker {worker} disconnected during row exchange")
            }
            Self::BlockShape {
                worker,
                expected_rows,
                got_rows,
                expected_cols,
                got_cols,
            } => {
                write!(
                    f,
                    "worker {worker} sent a {got_rows}x{got_cols} block, \
                     expected {expected_rows}x{expected_cols}"
                )
            }
            Self::IterationSkew {
                worker,
                expected,
                got,
            } => {
                write!(
                    f,
                    "worker {worker} sent a block for iteration {got}, \
                     expected iteration {expected}"
                )
            }
        }
    }
}

impl Error for TransportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_and_distinct() {
        let disconnected = TransportError::Disconnected {
            worker: WorkerId(1),
        };
        let shape = TransportError::BlockShape {
            worker: WorkerId(2),
            expected_rows: 4,
            got_rows: 3,
            expected_cols: 10,
            got_cols: 10,
        };
        let skew = TransportError::IterationSkew {
            worker: WorkerId(3),
            expected: IterationId(7),
            got: IterationId(6),
        };
        assert_eq!(disconnected.code(), 10);
        assert_eq!(shape.code(), 11);
        assert_eq!(skew.code(), 12);
    }

    #[test]
    fn worker_accessor_names_the_peer() {
        let err = TransportError::IterationSkew {
            worker: WorkerId(5),
            expected: IterationId(2),
            got: IterationId(9),
        };
        assert_eq!(err.worker(), WorkerId(5));
    }

    #[test]
    fn display_includes_peer_and_detail() {
        let err = TransportError::BlockShape {
            worker: WorkerId(2),
            expected_rows: 4,
            got_rows: 3,
            expected_cols: 10,
            got_cols: 8,
        };
        let msg = format!("{err}");
        assert!(msg.contains("worker 2"));
        assert!(msg.contains("3x8"));
        assert!(msg.contains("4x10"));
    }
}
