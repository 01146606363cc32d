//! Collective operations over a `Communicator`.
//!
//! All ranks must call the same collective with the same `root` and the same
//! block list; the caller guarantees that by deriving blocks from the
//! broadcast shape. `broadcast_shape`, `scatter_rows` and `gather_rows` end
//! with a barrier.
use super::{Communicator, Packet, COORDINATOR};
use crate::error::CommError;
use crate::image::{GrayImageU8, GridShape};
use crate::partition::Block;
use log::{debug, error};

/// Rows bordering a block, received from the neighbouring ranks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Halo {
    /// The row just above the block's first row.
    pub above: Option<Vec<u8>>,
    /// The row just below the block's last row.
    pub below: Option<Vec<u8>>,
}

impl Halo {
    pub fn rows(&self) -> usize {
        usize::from(self.above.is_some()) + usize::from(self.below.is_some())
    }
}

impl Communicator {
    /// Block until every rank has called `barrier`.
    ///
    /// Arrivals are collected at the coordinator, which then releases all
    /// ranks; a rank that has exited turns into `Disconnected` here.
    pub fn barrier(&self) -> Result<(), CommError> {
        if self.rank == COORDINATOR {
            for peer in self.peers() {
                match self.recv(peer)? {
                    Packet::Barrier => {}
                    other => return Err(self.unexpected(peer, "barrier", &other)),
                }
            }
            for peer in self.peers() {
                self.send(peer, Packet::Barrier)?;
            }
        } else {
            self.send(COORDINATOR, Packet::Barrier)?;
            match self.recv(COORDINATOR)? {
                Packet::Barrier => {}
                other => return Err(self.unexpected(COORDINATOR, "barrier", &other)),
            }
        }
        Ok(())
    }

    /// Tell every other rank to stop, then return the error this rank should
    /// propagate. Peers see `CommError::Aborted` from their next receive.
    pub fn abort_all(&self, code: i32) -> CommError {
        error!("rank {} aborting the group with code {code}", self.rank);
        for peer in self.peers() {
            // A peer that already exited has nothing left to abort.
            let _ = self.send(peer, Packet::Abort { code });
        }
        CommError::Aborted {
            code,
            origin: self.rank,
        }
    }

    /// Share the grid shape held by `root` with every rank.
    ///
    /// `shape` is only read on `root`, where it must be `Some`. Returns once
    /// every rank has received the shape.
    pub fn broadcast_shape(
        &self,
        shape: Option<GridShape>,
        root: usize,
    ) -> Result<GridShape, CommError> {
        self.check_root(root)?;
        let shape = if self.rank == root {
            let shape = shape.ok_or(CommError::MissingRootData { rank: root })?;
            for peer in self.peers() {
                self.send(peer, Packet::Shape(shape))?;
            }
            shape
        } else {
            match self.recv(root)? {
                Packet::Shape(shape) => shape,
                other => return Err(self.unexpected(root, "shape", &other)),
            }
        };
        self.barrier()?;
        Ok(shape)
    }

    /// Deliver to each rank the bytes of its own block of `grid`.
    ///
    /// `grid` is only read on `root`. The returned buffer holds
    /// `block.height * shape.cols` bytes, row-major.
    pub fn scatter_rows(
        &self,
        grid: Option<&GrayImageU8>,
        shape: GridShape,
        blocks: &[Block],
        root: usize,
    ) -> Result<Vec<u8>, CommError> {
        self.check_root(root)?;
        self.check_blocks(blocks)?;
        let own = blocks[self.rank];
        let local = if self.rank == root {
            let grid = grid.ok_or(CommError::MissingRootData { rank: root })?;
            if grid.shape() != shape {
                return Err(CommError::SizeMismatch {
                    peer: root,
                    expected: shape.len(),
                    actual: grid.as_bytes().len(),
                });
            }
            for block in blocks.iter().filter(|b| b.rank != root) {
                let bytes = grid.as_bytes()[block.byte_range(shape.cols)].to_vec();
                self.send(block.rank, Packet::Rows(bytes))?;
            }
            grid.as_bytes()[own.byte_range(shape.cols)].to_vec()
        } else {
            let bytes = self.recv_rows(root)?;
            if bytes.len() != own.byte_len(shape.cols) {
                return Err(CommError::SizeMismatch {
                    peer: root,
                    expected: own.byte_len(shape.cols),
                    actual: bytes.len(),
                });
            }
            bytes
        };
        debug!(
            "rank {} holds rows {:?} ({} bytes)",
            self.rank,
            own.rows(),
            local.len()
        );
        self.barrier()?;
        Ok(local)
    }

    /// Collect every rank's processed block at `root`, each placed at the rows
    /// it was scattered from. Rows no block covers stay zero.
    ///
    /// Returns `Some(grid)` on `root` and `None` elsewhere.
    pub fn gather_rows(
        &self,
        local: Vec<u8>,
        shape: GridShape,
        blocks: &[Block],
        root: usize,
    ) -> Result<Option<GrayImageU8>, CommError> {
        self.check_root(root)?;
        self.check_blocks(blocks)?;
        let own = blocks[self.rank];
        if local.len() != own.byte_len(shape.cols) {
            return Err(CommError::SizeMismatch {
                peer: self.rank,
                expected: own.byte_len(shape.cols),
                actual: local.len(),
            });
        }

        let gathered = if self.rank == root {
            let mut out = GrayImageU8::zeros(shape.cols, shape.rows);
            out.as_bytes_mut()[own.byte_range(shape.cols)].copy_from_slice(&local);
            for block in blocks.iter().filter(|b| b.rank != root) {
                let bytes = self.recv_rows(block.rank)?;
                if bytes.len() != block.byte_len(shape.cols) {
                    return Err(CommError::SizeMismatch {
                        peer: block.rank,
                        expected: block.byte_len(shape.cols),
                        actual: bytes.len(),
                    });
                }
                out.as_bytes_mut()[block.byte_range(shape.cols)].copy_from_slice(&bytes);
            }
            Some(out)
        } else {
            self.send(root, Packet::Rows(local))?;
            None
        };
        self.barrier()?;
        Ok(gathered)
    }

    /// Swap boundary rows with the neighbouring ranks.
    ///
    /// A rank sends its first row up and its last row down, and receives the
    /// matching rows back, but only with neighbours whose block is non-empty.
    /// Both sides decide from the same block list, so every send is paired
    /// with a receive.
    pub fn exchange_halo(
        &self,
        local: &[u8],
        blocks: &[Block],
        cols: usize,
    ) -> Result<Halo, CommError> {
        self.check_blocks(blocks)?;
        let own = blocks[self.rank];
        if local.len() != own.byte_len(cols) {
            return Err(CommError::SizeMismatch {
                peer: self.rank,
                expected: own.byte_len(cols),
                actual: local.len(),
            });
        }
        if own.is_empty() || cols == 0 {
            return Ok(Halo::default());
        }
        let up = self
            .rank
            .checked_sub(1)
            .filter(|&r| !blocks[r].is_empty());
        let down = Some(self.rank + 1).filter(|&r| r < self.size && !blocks[r].is_empty());

        // Channels are unbounded, so sending before receiving cannot block.
        if let Some(peer) = up {
            self.send(peer, Packet::Rows(local[..cols].to_vec()))?;
        }
        if let Some(peer) = down {
            self.send(peer, Packet::Rows(local[local.len() - cols..].to_vec()))?;
        }

        let mut halo = Halo::default();
        if let Some(peer) = up {
            halo.above = Some(self.recv_halo_row(peer, cols)?);
        }
        if let Some(peer) = down {
            halo.below = Some(self.recv_halo_row(peer, cols)?);
        }
        debug!(
            "rank {} received {} halo row(s) for rows {:?}",
            self.rank,
            halo.rows(),
            own.rows()
        );
        Ok(halo)
    }

    fn recv_halo_row(&self, peer: usize, cols: usize) -> Result<Vec<u8>, CommError> {
        let row = self.recv_rows(peer)?;
        if row.len() != cols {
            return Err(CommError::SizeMismatch {
                peer,
                expected: cols,
                actual: row.len(),
            });
        }
        Ok(row)
    }

    fn check_blocks(&self, blocks: &[Block]) -> Result<(), CommError> {
        if blocks.len() == self.size {
            Ok(())
        } else {
            Err(CommError::TopologyMismatch {
                blocks: blocks.len(),
                size: self.size,
            })
        }
    }
}
