//! Row-block pass: every rank runs this in lock-step for each image.
use crate::comm::{Communicator, COORDINATOR};
use crate::diagnostics::{duration_ms, ImageOutcome, PassReport};
use crate::distribute::{convolve_block, distribute, recombine, Distribution};
use crate::error::{KernelError, PipelineError};
use crate::image::io::{load_grayscale_image, output_path, save_grayscale_u8};
use crate::image::{GrayImageU8, GridShape};
use crate::partition::PartitionOptions;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Exit code used when the coordinator cannot decode an image mid-run.
pub const DECODE_ABORT_CODE: i32 = 1;

/// Result of one image's distributed pass on one rank.
#[derive(Debug)]
pub enum BlockPass {
    /// The broadcast shape was smaller than 3×3; nothing was scattered.
    Skipped(GridShape),
    /// `Some` on the coordinator, `None` on every other rank.
    Gathered(Option<GrayImageU8>),
}

/// Distribute `grid`, convolve the local block and gather the result.
///
/// `grid` is only read on the coordinator.
pub fn distributed_image(
    comm: &Communicator,
    grid: Option<&GrayImageU8>,
    options: PartitionOptions,
) -> Result<BlockPass, PipelineError> {
    let local = match distribute(comm, grid, options, COORDINATOR)? {
        Distribution::Skipped(shape) => return Ok(BlockPass::Skipped(shape)),
        Distribution::Assigned(local) => local,
    };
    let processed = convolve_block(&local)?;
    let gathered = recombine(comm, processed, &local, COORDINATOR)?;
    Ok(BlockPass::Gathered(gathered))
}

/// Run the distributed pass over `images` in order.
///
/// The coordinator decodes each image; if that fails the whole group is
/// aborted, since the other ranks cannot detect it on their own. Returns the
/// pass report on the coordinator and `None` elsewhere.
pub fn run_distributed(
    comm: &Communicator,
    images: &[PathBuf],
    options: PartitionOptions,
    out_dir: &Path,
) -> Result<Option<PassReport>, PipelineError> {
    let coordinator = comm.is_coordinator();
    let mut report = PassReport::default();
    let pass_start = Instant::now();

    for input in images {
        let start = Instant::now();
        let grid = if coordinator {
            match load_grayscale_image(input) {
                Ok(grid) => Some(grid),
                Err(err) => {
                    error!("distributed: {err}");
                    return Err(comm.abort_all(DECODE_ABORT_CODE).into());
                }
            }
        } else {
            None
        };

        let pass = distributed_image(comm, grid.as_ref(), options)?;
        drop(grid);
        if !coordinator {
            continue;
        }

        let outcome = match pass {
            BlockPass::Skipped(shape) => {
                let err = KernelError::Dimension {
                    width: shape.cols,
                    height: shape.rows,
                };
                warn!("distributed: skipping {}: {err}", input.display());
                ImageOutcome::Skipped {
                    reason: err.to_string(),
                }
            }
            BlockPass::Gathered(Some(edges)) => {
                let output = output_path(out_dir, input);
                match save_grayscale_u8(&edges, &output) {
                    Ok(()) => ImageOutcome::Written { output },
                    Err(err) => {
                        warn!("distributed: {err}");
                        ImageOutcome::EncodeFailed {
                            output,
                            reason: err.to_string(),
                        }
                    }
                }
            }
            BlockPass::Gathered(None) => return Err(PipelineError::MissingResult),
        };
        let elapsed_ms = duration_ms(start.elapsed());
        debug!("distributed: {} in {elapsed_ms:.3} ms", input.display());
        report.record(input.clone(), outcome, elapsed_ms);
    }

    if !coordinator {
        return Ok(None);
    }
    report.timing.total_ms = duration_ms(pass_start.elapsed());
    info!(
        "distributed pass ({} workers): {} written, {} skipped in {:.3} ms",
        comm.size(),
        report.written(),
        report.skipped(),
        report.timing.total_ms
    );
    Ok(Some(report))
}
