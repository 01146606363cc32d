//! In-process process group: `W` ranks, one thread each, talking only through
//! point-to-point channels.
//!
//! Every ordered pair of ranks `(src, dst)` has a dedicated unbounded channel,
//! so `recv(src)` sees exactly the packets `src` sent to this rank, in order.
//! Nothing else is shared between ranks; buffers move by value. Collective
//! operations (`collective.rs`) are built from these sends and receives and
//! finish with a barrier, which gives them rendezvous semantics.
//!
//! A rank that exits (normally, with an error, or by panicking) drops its
//! senders. Peers blocked on it see `CommError::Disconnected` instead of
//! hanging, and the failure cascades through the group.

mod collective;
mod group;

pub use collective::Halo;
pub use group::ProcessGroup;

use crate::error::CommError;
use crate::image::GridShape;
use std::sync::mpsc::{Receiver, Sender};

/// Rank that owns full grids unless a call says otherwise.
pub const COORDINATOR: usize = 0;

/// Unit of traffic between two ranks.
#[derive(Debug)]
pub enum Packet {
    Shape(GridShape),
    Rows(Vec<u8>),
    Barrier,
    Abort { code: i32 },
}

impl Packet {
    fn kind(&self) -> &'static str {
        match self {
            Packet::Shape(_) => "shape",
            Packet::Rows(_) => "rows",
            Packet::Barrier => "barrier",
            Packet::Abort { .. } => "abort",
        }
    }
}

/// One rank's endpoint in a process group.
pub struct Communicator {
    rank: usize,
    size: usize,
    /// Indexed by destination rank.
    outbox: Vec<Sender<Packet>>,
    /// Indexed by source rank.
    inbox: Vec<Receiver<Packet>>,
}

impl Communicator {
    pub(crate) fn new(
        rank: usize,
        outbox: Vec<Sender<Packet>>,
        inbox: Vec<Receiver<Packet>>,
    ) -> Self {
        debug_assert_eq!(outbox.len(), inbox.len());
        Self {
            rank,
            size: outbox.len(),
            outbox,
            inbox,
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_coordinator(&self) -> bool {
        self.rank == COORDINATOR
    }

    pub fn send(&self, dest: usize, packet: Packet) -> Result<(), CommError> {
        self.check_rank(dest)?;
        self.outbox[dest]
            .send(packet)
            .map_err(|_| CommError::Disconnected { peer: dest })
    }

    /// Blocking receive from `src`. An abort packet surfaces as an error.
    pub fn recv(&self, src: usize) -> Result<Packet, CommError> {
        self.check_rank(src)?;
        match self.inbox[src].recv() {
            Ok(Packet::Abort { code }) => Err(CommError::Aborted { code, origin: src }),
            Ok(packet) => Ok(packet),
            Err(_) => Err(CommError::Disconnected { peer: src }),
        }
    }

    fn recv_rows(&self, src: usize) -> Result<Vec<u8>, CommError> {
        match self.recv(src)? {
            Packet::Rows(bytes) => Ok(bytes),
            other => Err(self.unexpected(src, "rows", &other)),
        }
    }

    fn unexpected(&self, peer: usize, expected: &'static str, got: &Packet) -> CommError {
        log::debug!(
            "rank {} expected {expected} from rank {peer}, got {}",
            self.rank,
            got.kind()
        );
        CommError::UnexpectedPacket {
            rank: self.rank,
            peer,
            expected,
        }
    }

    fn check_rank(&self, rank: usize) -> Result<(), CommError> {
        if rank < self.size {
            Ok(())
        } else {
            Err(CommError::InvalidRank {
                rank,
                size: self.size,
            })
        }
    }

    fn check_root(&self, root: usize) -> Result<(), CommError> {
        if root < self.size {
            Ok(())
        } else {
            Err(CommError::InvalidRoot {
                root,
                size: self.size,
            })
        }
    }

    fn peers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&r| r != self.rank)
    }
}

impl std::fmt::Debug for Communicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Communicator")
            .field("rank", &self.rank)
            .field("size", &self.size)
            .finish()
    }
}
