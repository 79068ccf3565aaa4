//! In-process full-mesh transport over crossbeam channels.

use crate::block::RowBlock;
use crate::collective::Collective;
use crossbeam_channel::{bounded, Receiver, Sender};
use indexmap::IndexMap;
use settle_core::{TransportError, WorkerId};

/// Blocks a single link can hold before a send would wait.
///
/// Lockstep peers are never more than one iteration apart, so at most
/// two blocks are ever in flight on one link and sends never block.
const LINK_DEPTH: usize = 2;

/// Connector for a group of in-process workers.
///
/// [`ChannelMesh::connect`] wires a dedicated bounded channel for
/// every ordered peer pair and hands back one [`ChannelCollective`]
/// endpoint per worker, in worker order. Dropping an endpoint closes
/// all of its links, which every surviving peer observes as
/// [`TransportError::Disconnected`] on its next gather.
pub struct ChannelMesh;

impl ChannelMesh {
    /// Build endpoints for `workers`, one per entry, in the same order.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is empty or contains a duplicate id.
    pub fn connect(workers: &[WorkerId]) -> Vec<ChannelCollective> {
        assert!(!workers.is_empty(), "a mesh needs at least one worker");

        let mut peers: Vec<IndexMap<WorkerId, Sender<RowBlock>>> =
            workers.iter().map(|_| IndexMap::new()).collect();
        let mut inboxes: Vec<IndexMap<WorkerId, Receiver<RowBlock>>> =
            workers.iter().map(|_| IndexMap::new()).collect();

        for (si, &src) in workers.iter().enumerate() {
            for (di, &dst) in workers.iter().enumerate() {
                if si == di {
                    continue;
                }
                let (tx, rx) = bounded(LINK_DEPTH);
                let clash = peers[si].insert(dst, tx);
                assert!(clash.is_none(), "duplicate worker {dst} in mesh");
                inboxes[di].insert(src, rx);
            }
        }

        workers
            .iter()
            .zip(peers.into_iter().zip(inboxes))
            .map(|(&worker, (peers, inbox))| ChannelCollective {
                worker,
                peers,
                inbox,
            })
            .collect()
    }
}

/// One worker's endpoint in a [`ChannelMesh`].
///
/// Holds a dedicated send handle and a dedicated receive handle per
/// peer, both tables ordered by worker id. A single-worker mesh has
/// empty tables and gathers are pure loopback.
pub struct ChannelCollective {
    worker: WorkerId,
    peers: IndexMap<WorkerId, Sender<RowBlock>>,
    inbox: IndexMap<WorkerId, Receiver<RowBlock>>,
}

impl Collective for ChannelCollective {
    fn worker(&self) -> WorkerId {
        self.worker
    }

    fn all_gather(
        &mut self,
        own: RowBlock,
        into: &mut Vec<RowBlock>,
    ) -> Result<(), TransportError> {
        let expected_iteration = own.iteration;
        let expected_rows = own.rows();
        let expected_cols = own.cols;

        // Publish to every peer before receiving from any. Links never
        // fill in lockstep, so the sends complete without waiting and
        // no pair of workers can deadlock on each other.
        for (&peer, tx) in &self.peers {
            if tx.send(own.clone()).is_err() {
                return Err(TransportError::Disconnected { worker: peer });
            }
        }

        into.clear();
        let mut own = Some(own);
        for (&peer, rx) in &self.inbox {
            // The inbox is in worker order; our own block slots in
            // just before the first higher-numbered peer.
            if peer > self.worker {
                if let Some(block) = own.take() {
                    into.push(block);
                }
            }

            let block = rx
                .recv()
                .map_err(|_| TransportError::Disconnected { worker: peer })?;
            if block.iteration != expected_iteration {
                return Err(TransportError::IterationSkew {
                    worker: peer,
                    expected: expected_iteration,
                    got: block.iteration,
                });
            }
            if block.rows() != expected_rows || block.cols != expected_cols {
                return Err(TransportError::BlockShape {
                    worker: peer,
                    expected_rows,
                    got_rows: block.rows(),
                    expected_cols,
                    got_cols: block.cols,
                });
            }
            into.push(block);
        }
        if let Some(block) = own.take() {
            into.push(block);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settle_core::IterationId;
    use std::thread;

    fn block(iteration: u64, worker: u32, start_row: usize, fill: f64) -> RowBlock {
        RowBlock::new(
            IterationId(iteration),
            WorkerId(worker),
            start_row,
            3,
            vec![fill; 6],
        )
    }

    #[test]
    fn connect_hands_back_one_endpoint_per_worker() {
        let workers = [WorkerId(0), WorkerId(1), WorkerId(2)];
        let endpoints = ChannelMesh::connect(&workers);
        assert_eq!(endpoints.len(), 3);
        for (endpoint, &worker) in endpoints.iter().zip(&workers) {
            assert_eq!(endpoint.worker(), worker);
        }
    }

    #[test]
    fn single_worker_gathers_only_itself() {
        let mut endpoints = ChannelMesh::connect(&[WorkerId(0)]);
        let mut gathered = Vec::new();
        endpoints[0]
            .all_gather(block(1, 0, 0, 5.0), &mut gathered)
            .unwrap();
        assert_eq!(gathered.len(), 1);
        assert_eq!(gathered[0].worker, WorkerId(0));
        assert_eq!(gathered[0].values, vec![5.0; 6]);
    }

    #[test]
    fn gather_orders_blocks_by_worker() {
        let workers = [WorkerId(0), WorkerId(1), WorkerId(2)];
        let endpoints = ChannelMesh::connect(&workers);

        let handles: Vec<_> = endpoints
            .into_iter()
            .enumerate()
            .map(|(i, mut endpoint)| {
                thread::spawn(move || {
                    let own = block(7, i as u32, i * 2, i as f64);
                    let mut gathered = Vec::new();
                    endpoint.all_gather(own, &mut gathered).unwrap();
                    gathered
                })
            })
            .collect();

        for handle in handles {
            let gathered = handle.join().unwrap();
            assert_eq!(gathered.len(), 3);
            for (i, b) in gathered.iter().enumerate() {
                assert_eq!(b.worker, WorkerId(i as u32));
                assert_eq!(b.start_row, i * 2);
                assert_eq!(b.values, vec![i as f64; 6]);
            }
        }
    }

    #[test]
    fn consecutive_iterations_flow_without_blocking() {
        let workers = [WorkerId(0), WorkerId(1)];
        let endpoints = ChannelMesh::connect(&workers);

        let handles: Vec<_> = endpoints
            .into_iter()
            .enumerate()
            .map(|(i, mut endpoint)| {
                thread::spawn(move || {
                    let mut gathered = Vec::new();
                    for iteration in 0..50u64 {
                        endpoint
                            .all_gather(block(iteration, i as u32, i, 1.0), &mut gathered)
                            .unwrap();
                        assert_eq!(gathered.len(), 2);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn dropped_peer_surfaces_as_disconnected() {
        let mut endpoints = ChannelMesh::connect(&[WorkerId(0), WorkerId(1)]);
        drop(endpoints.pop());

        let mut gathered = Vec::new();
        match endpoints[0].all_gather(block(0, 0, 0, 1.0), &mut gathered) {
            Err(TransportError::Disconnected { worker }) => {
                assert_eq!(worker, WorkerId(1));
            }
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }

    #[test]
    fn iteration_skew_names_the_peer() {
        let endpoints = ChannelMesh::connect(&[WorkerId(0), WorkerId(1)]);
        let mut iter = endpoints.into_iter();
        let mut zero = iter.next().unwrap();
        let mut one = iter.next().unwrap();

        // Worker 1 runs one iteration ahead of worker 0.
        let skewed = thread::spawn(move || {
            let mut gathered = Vec::new();
            one.all_gather(block(2, 1, 2, 1.0), &mut gathered)
        });

        let mut gathered = Vec::new();
        match zero.all_gather(block(1, 0, 0, 0.0), &mut gathered) {
            Err(TransportError::IterationSkew {
                worker,
                expected,
                got,
            }) => {
                assert_eq!(worker, WorkerId(1));
                assert_eq!(expected, IterationId(1));
                assert_eq!(got, IterationId(2));
            }
            other => panic!("expected IterationSkew, got {other:?}"),
        }

        // The skewed side sees the mirror image.
        match skewed.join().unwrap() {
            Err(TransportError::IterationSkew { worker, .. }) => {
                assert_eq!(worker, WorkerId(0));
            }
            other => panic!("expected IterationSkew, got {other:?}"),
        }
    }

    #[test]
    fn misshapen_block_names_the_peer() {
        let endpoints = ChannelMesh::connect(&[WorkerId(0), WorkerId(1)]);
        let mut iter = endpoints.into_iter();
        let mut zero = iter.next().unwrap();
        let mut one = iter.next().unwrap();

        let short = thread::spawn(move || {
            let mut gathered = Vec::new();
            // One row instead of two.
            let stub = RowBlock::new(IterationId(0), WorkerId(1), 2, 3, vec![0.0; 3]);
            one.all_gather(stub, &mut gathered)
        });

        let mut gathered = Vec::new();
        match zero.all_gather(block(0, 0, 0, 0.0), &mut gathered) {
            Err(TransportError::BlockShape {
                worker,
                expected_rows,
                got_rows,
                ..
            }) => {
                assert_eq!(worker, WorkerId(1));
                assert_eq!(expected_rows, 2);
                assert_eq!(got_rows, 1);
            }
            other => panic!("expected BlockShape, got {other:?}"),
        }
        // The short sender sees the mismatch from its own side.
        assert!(short.join().unwrap().is_err());
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn empty_mesh_panics() {
        let _ = ChannelMesh::connect(&[]);
    }
}
