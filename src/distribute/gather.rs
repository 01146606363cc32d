use super::LocalBlock;
use crate::comm::Communicator;
use crate::error::CommError;
use crate::image::GrayImageU8;

/// Send this rank's processed rows to `root` and, on `root`, assemble the
/// full output grid. Other ranks get `None` and their buffer is dropped.
pub fn recombine(
    comm: &Communicator,
    processed: Vec<u8>,
    local: &LocalBlock,
    root: usize,
) -> Result<Option<GrayImageU8>, CommError> {
    comm.gather_rows(processed, local.shape, &local.blocks, root)
}
