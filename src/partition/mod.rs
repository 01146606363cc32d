//! Static row-block partitioning of a grid across a fixed worker count.
//!
//! Worker `r` of `W` owns rows `[r*k, r*k + k)` with `k = floor(rows / W)`.
//! The `rows mod W` leftover rows are handled per `RemainderPolicy`: dropped
//! (nobody convolves them) or appended to the last block.
//!
//! Blocks never overlap and are ordered by rank, so `Block::start` grows with
//! the rank and a gather can place each block purely by position.

pub mod options;

pub use options::{HaloMode, PartitionOptions, RemainderPolicy};

use crate::error::PartitionError;
use std::ops::Range;

/// Contiguous row range owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub rank: usize,
    pub start: usize,
    pub height: usize,
}

impl Block {
    /// One past the last row.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.height
    }

    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Byte range of this block inside a row-major grid `cols` wide.
    #[inline]
    pub fn byte_range(&self, cols: usize) -> Range<usize> {
        self.start * cols..self.end() * cols
    }

    #[inline]
    pub fn byte_len(&self, cols: usize) -> usize {
        self.height * cols
    }

    /// True for rows on the block's first or last line; with no halo these
    /// are convolved as image borders.
    #[inline]
    pub fn is_edge_row(&self, row: usize) -> bool {
        !self.is_empty() && (row == self.start || row + 1 == self.end())
    }
}

/// Split `rows` into one block per worker.
pub fn partition_rows(
    rows: usize,
    workers: usize,
    policy: RemainderPolicy,
) -> Result<Vec<Block>, PartitionError> {
    if workers == 0 {
        return Err(PartitionError::NoWorkers);
    }
    let base = rows / workers;
    let remainder = rows % workers;
    let blocks = (0..workers)
        .map(|rank| {
            let extra = match policy {
                RemainderPolicy::ExtendLast if rank + 1 == workers => remainder,
                _ => 0,
            };
            Block {
                rank,
                start: rank * base,
                height: base + extra,
            }
        })
        .collect();
    Ok(blocks)
}

/// Number of rows covered by the blocks.
pub fn covered_rows(blocks: &[Block]) -> usize {
    blocks.iter().map(|b| b.height).sum()
}

/// Rows of `0..rows` no block covers, in ascending order.
pub fn dropped_rows(rows: usize, blocks: &[Block]) -> Range<usize> {
    let end = blocks.iter().map(Block::end).max().unwrap_or(0);
    end.min(rows)..rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heights(blocks: &[Block]) -> Vec<usize> {
        blocks.iter().map(|b| b.height).collect()
    }

    fn assert_contiguous(blocks: &[Block]) {
        for pair in blocks.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start, "blocks {pair:?} not adjacent");
            assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }

    #[test]
    fn ten_rows_three_workers_drop_policy() {
        let blocks = partition_rows(10, 3, RemainderPolicy::Drop).unwrap();
        assert_eq!(heights(&blocks), vec![3, 3, 3]);
        assert_eq!(blocks[2].start, 6);
        assert_contiguous(&blocks);
        assert_eq!(covered_rows(&blocks), 9);
        assert_eq!(dropped_rows(10, &blocks), 9..10);
    }

    #[test]
    fn ten_rows_three_workers_extend_last_policy() {
        let blocks = partition_rows(10, 3, RemainderPolicy::ExtendLast).unwrap();
        assert_eq!(heights(&blocks), vec![3, 3, 4]);
        assert_contiguous(&blocks);
        assert_eq!(covered_rows(&blocks), 10);
        assert!(dropped_rows(10, &blocks).is_empty());
    }

    #[test]
    fn even_split_is_policy_independent() {
        let drop = partition_rows(12, 4, RemainderPolicy::Drop).unwrap();
        let extend = partition_rows(12, 4, RemainderPolicy::ExtendLast).unwrap();
        assert_eq!(drop, extend);
        assert_eq!(heights(&drop), vec![3, 3, 3, 3]);
    }

    #[test]
    fn fewer_rows_than_workers() {
        let drop = partition_rows(2, 4, RemainderPolicy::Drop).unwrap();
        assert!(drop.iter().all(Block::is_empty));
        assert_eq!(dropped_rows(2, &drop), 0..2);

        let extend = partition_rows(2, 4, RemainderPolicy::ExtendLast).unwrap();
        assert_eq!(heights(&extend), vec![0, 0, 0, 2]);
        assert_eq!(extend[3].rows(), 0..2);
    }

    #[test]
    fn zero_workers_is_an_error() {
        assert_eq!(
            partition_rows(10, 0, RemainderPolicy::Drop),
            Err(PartitionError::NoWorkers)
        );
    }

    #[test]
    fn byte_ranges_follow_rows() {
        let blocks = partition_rows(7, 2, RemainderPolicy::ExtendLast).unwrap();
        assert_eq!(blocks[0].byte_range(5), 0..15);
        assert_eq!(blocks[1].byte_range(5), 15..35);
        assert_eq!(blocks[1].byte_len(5), 20);
        assert!(blocks[0].is_edge_row(0));
        assert!(blocks[0].is_edge_row(2));
        assert!(!blocks[1].is_edge_row(4));
    }
}
