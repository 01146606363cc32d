//! Per-image row-block protocol: distribute, convolve, recombine.
//!
//! 1. `distribute` broadcasts the grid shape from the coordinator, cuts it into
//!    blocks, scatters each block's rows and (optionally) swaps halo rows.
//! 2. `convolve_block` runs the Sobel operator on one rank's rows alone.
//! 3. `recombine` gathers the processed blocks back at the coordinator.
//!
//! Without halo rows every block boundary is convolved as an image border and
//! left unwritten, so rows next to a boundary can differ from a whole-image
//! pass. Interior rows of a block always match it.

pub mod compute;
pub mod gather;
pub mod scatter;

pub use compute::convolve_block;
pub use gather::recombine;
pub use scatter::{distribute, Distribution, LocalBlock};
