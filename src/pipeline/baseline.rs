//! Single-worker pass: every image is convolved whole, no partitioning.
use crate::diagnostics::{duration_ms, ImageOutcome, PassReport};
use crate::edges::sobel_magnitude;
use crate::error::PipelineError;
use crate::image::io::{load_grayscale_image, output_path, save_grayscale_u8};
use crate::image::GrayImageU8;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Decode `path` to grayscale and run the Sobel operator over the whole grid.
pub fn baseline_image(path: &Path) -> Result<GrayImageU8, PipelineError> {
    let gray = load_grayscale_image(path)?;
    Ok(sobel_magnitude(gray.as_view())?)
}

/// Run the baseline over `images` in order, writing each result under
/// `out_dir`. Unreadable and too-small images are skipped; encode failures
/// are recorded and the pass continues.
pub fn run_baseline(images: &[PathBuf], out_dir: &Path) -> PassReport {
    let mut report = PassReport::default();
    let pass_start = Instant::now();

    for input in images {
        let start = Instant::now();
        let outcome = match baseline_image(input) {
            Ok(edges) => {
                let output = output_path(out_dir, input);
                match save_grayscale_u8(&edges, &output) {
                    Ok(()) => ImageOutcome::Written { output },
                    Err(err) => {
                        warn!("baseline: {err}");
                        ImageOutcome::EncodeFailed {
                            output,
                            reason: err.to_string(),
                        }
                    }
                }
            }
            Err(err) => {
                warn!("baseline: skipping {}: {err}", input.display());
                ImageOutcome::Skipped {
                    reason: err.to_string(),
                }
            }
        };
        let elapsed_ms = duration_ms(start.elapsed());
        debug!("baseline: {} in {elapsed_ms:.3} ms", input.display());
        report.record(input.clone(), outcome, elapsed_ms);
    }

    report.timing.total_ms = duration_ms(pass_start.elapsed());
    info!(
        "baseline pass: {} written, {} skipped in {:.3} ms",
        report.written(),
        report.skipped(),
        report.timing.total_ms
    );
    report
}
