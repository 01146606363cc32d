use super::{Communicator, Packet};
use crate::error::CommError;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// Fixed-size group of ranks backed by scoped threads.
pub struct ProcessGroup;

impl ProcessGroup {
    /// Build `size` connected endpoints, one per rank.
    pub fn communicators(size: usize) -> Vec<Communicator> {
        let mut outboxes: Vec<Vec<Sender<Packet>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();
        let mut inboxes: Vec<Vec<Receiver<Packet>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();
        for outbox in outboxes.iter_mut() {
            for inbox in inboxes.iter_mut() {
                let (tx, rx) = mpsc::channel();
                outbox.push(tx);
                inbox.push(rx);
            }
        }
        outboxes
            .into_iter()
            .zip(inboxes)
            .enumerate()
            .map(|(rank, (outbox, inbox))| Communicator::new(rank, outbox, inbox))
            .collect()
    }

    /// Run `f` once per rank, each on its own thread, and collect the results
    /// in rank order. Returns after every rank has finished.
    pub fn run<R, F>(size: usize, f: F) -> Result<Vec<R>, CommError>
    where
        F: Fn(Communicator) -> R + Sync,
        R: Send,
    {
        let comms = Self::communicators(size);
        let joined: Vec<thread::Result<R>> = thread::scope(|scope| {
            let handles: Vec<_> = comms
                .into_iter()
                .map(|comm| {
                    let f = &f;
                    scope.spawn(move || f(comm))
                })
                .collect();
            handles.into_iter().map(|h| h.join()).collect()
        });

        joined
            .into_iter()
            .enumerate()
            .map(|(rank, res)| res.map_err(|_| CommError::WorkerPanicked { rank }))
            .collect()
    }
}
