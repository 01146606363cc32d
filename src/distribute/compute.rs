use super::LocalBlock;
use crate::edges::sobel_magnitude;
use crate::error::KernelError;
use crate::image::ImageU8;
use log::debug;
use std::borrow::Cow;

/// Run the Sobel operator over one rank's rows and return the processed rows.
///
/// Halo rows, when present, are stacked above and below the block so its
/// boundary rows get real neighbours; they are not part of the result. A
/// stack shorter than three rows has no interior and comes back all zero.
pub fn convolve_block(local: &LocalBlock) -> Result<Vec<u8>, KernelError> {
    let cols = local.shape.cols;
    let block = local.block;
    let top = usize::from(local.halo.above.is_some());
    let stacked_rows = block.height + local.halo.rows();

    if stacked_rows < 3 || cols < 3 {
        debug!(
            "block {:?} has {stacked_rows} row(s) with halo, nothing to convolve",
            block.rows()
        );
        return Ok(vec![0; block.byte_len(cols)]);
    }

    let stacked: Cow<'_, [u8]> = if local.halo.rows() == 0 {
        Cow::Borrowed(&local.rows)
    } else {
        let mut buf = Vec::with_capacity(stacked_rows * cols);
        if let Some(above) = &local.halo.above {
            buf.extend_from_slice(above);
        }
        buf.extend_from_slice(&local.rows);
        if let Some(below) = &local.halo.below {
            buf.extend_from_slice(below);
        }
        Cow::Owned(buf)
    };

    let out = sobel_magnitude(ImageU8::packed(cols, stacked_rows, &stacked))?;
    Ok(out.row_span(top, block.height).to_vec())
}
