//! Orchestrates the two passes over one ordered image list.
//!
//! Per run, every rank executes `run_rank`:
//!
//! 1. the coordinator runs the single-worker baseline over all images, timed;
//! 2. all ranks meet at a barrier;
//! 3. all ranks run the row-block pass image by image, in lock-step, timed on
//!    the coordinator.
//!
//! The coordinator then derives speed-up and efficiency from the two totals.
//! `baseline_edges` and `distributed_edges` run the same two computations on
//! an in-memory grid, without files or timing.

pub mod baseline;
pub mod distributed;

pub use baseline::{baseline_image, run_baseline};
pub use distributed::{distributed_image, run_distributed, BlockPass, DECODE_ABORT_CODE};

use crate::comm::{Communicator, ProcessGroup};
use crate::config::BenchConfig;
use crate::diagnostics::RunReport;
use crate::edges::sobel_magnitude;
use crate::error::{KernelError, PipelineError};
use crate::image::io::read_manifest;
use crate::image::GrayImageU8;
use crate::partition::PartitionOptions;
use log::info;
use std::path::PathBuf;

/// One rank's share of a run. Returns the report on the coordinator.
pub fn run_rank(
    comm: &Communicator,
    images: &[PathBuf],
    config: &BenchConfig,
) -> Result<Option<RunReport>, PipelineError> {
    let baseline = comm
        .is_coordinator()
        .then(|| run_baseline(images, &config.output.baseline_dir));

    comm.barrier()?;

    let distributed = run_distributed(
        comm,
        images,
        config.partition,
        &config.output.distributed_dir,
    )?;

    Ok(match (baseline, distributed) {
        (Some(baseline), Some(distributed)) => Some(RunReport::new(
            comm.size(),
            config.partition,
            baseline,
            distributed,
        )),
        _ => None,
    })
}

/// Read the manifest, run both passes on `config.workers` ranks and return
/// the coordinator's report.
pub fn run(config: &BenchConfig) -> Result<RunReport, PipelineError> {
    config.validate()?;
    let images = read_manifest(&config.manifest)?;
    info!(
        "running {} image(s) on {} worker(s), partition {:?}",
        images.len(),
        config.workers,
        config.partition
    );
    let results = ProcessGroup::run(config.workers, |comm| run_rank(&comm, &images, config))?;
    collect_coordinator(results)
}

/// Baseline result for an in-memory grid.
pub fn baseline_edges(grid: &GrayImageU8) -> Result<GrayImageU8, PipelineError> {
    Ok(sobel_magnitude(grid.as_view())?)
}

/// Row-block result for an in-memory grid, on `workers` ranks.
pub fn distributed_edges(
    grid: &GrayImageU8,
    workers: usize,
    options: PartitionOptions,
) -> Result<GrayImageU8, PipelineError> {
    let results = ProcessGroup::run(workers, |comm| {
        let local = comm.is_coordinator().then_some(grid);
        distributed_image(&comm, local, options)
    })?;
    let mut results = results.into_iter();
    match results.next() {
        Some(Ok(BlockPass::Gathered(Some(edges)))) => Ok(edges),
        Some(Ok(BlockPass::Skipped(shape))) => Err(KernelError::Dimension {
            width: shape.cols,
            height: shape.rows,
        }
        .into()),
        Some(Err(err)) => Err(err),
        Some(Ok(BlockPass::Gathered(None))) | None => Err(PipelineError::MissingResult),
    }
}

/// The coordinator's error wins; otherwise the first failing rank's.
fn collect_coordinator(
    results: Vec<Result<Option<RunReport>, PipelineError>>,
) -> Result<RunReport, PipelineError> {
    let mut results = results.into_iter();
    let coordinator = results.next().ok_or(PipelineError::MissingResult)?;
    let report = coordinator?;
    if let Some(err) = results.find_map(Result::err) {
        return Err(err);
    }
    report.ok_or(PipelineError::MissingResult)
}
