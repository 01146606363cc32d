use crate::comm::{Communicator, Halo};
use crate::error::PipelineError;
use crate::image::{GrayImageU8, GridShape};
use crate::partition::{partition_rows, Block, HaloMode, PartitionOptions};
use log::debug;

/// Everything one rank holds for the current image after distribution.
#[derive(Clone, Debug)]
pub struct LocalBlock {
    /// Shape of the full grid.
    pub shape: GridShape,
    /// Blocks of every rank, in rank order.
    pub blocks: Vec<Block>,
    /// This rank's block.
    pub block: Block,
    /// Row-major bytes of `block`.
    pub rows: Vec<u8>,
    /// Neighbour rows, empty unless halo exchange is enabled.
    pub halo: Halo,
}

#[derive(Debug)]
pub enum Distribution {
    /// The grid is too small for the 3×3 operator; every rank skips it.
    Skipped(GridShape),
    Assigned(LocalBlock),
}

/// Broadcast the shape of `grid`, partition it and scatter its rows.
///
/// `grid` is only read on `root`. All ranks return the same variant, since
/// the decision to skip is taken from the broadcast shape.
pub fn distribute(
    comm: &Communicator,
    grid: Option<&GrayImageU8>,
    options: PartitionOptions,
    root: usize,
) -> Result<Distribution, PipelineError> {
    let shape = comm.broadcast_shape(grid.map(GrayImageU8::shape), root)?;
    if !shape.fits_kernel() {
        debug!("rank {} skipping {shape} grid", comm.rank());
        return Ok(Distribution::Skipped(shape));
    }

    let blocks = partition_rows(shape.rows, comm.size(), options.remainder)?;
    let rows = comm.scatter_rows(grid, shape, &blocks, root)?;
    let halo = match options.halo {
        HaloMode::None => Halo::default(),
        HaloMode::Exchange => comm.exchange_halo(&rows, &blocks, shape.cols)?,
    };
    let block = blocks[comm.rank()];
    Ok(Distribution::Assigned(LocalBlock {
        shape,
        blocks,
        block,
        rows,
        halo,
    }))
}
