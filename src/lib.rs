#![doc = include_str!("../README.md")]

// Building blocks.
pub mod edges;
pub mod error;
pub mod image;
pub mod partition;

// Process group and the per-image row-block protocol.
pub mod comm;
pub mod distribute;

// Orchestration, reporting and configuration.
pub mod config;
pub mod diagnostics;
pub mod pipeline;

// --- High-level re-exports -------------------------------------------------

pub use crate::comm::{Communicator, ProcessGroup, COORDINATOR};
pub use crate::config::BenchConfig;
pub use crate::diagnostics::{efficiency, speedup, RunReport};
pub use crate::error::PipelineError;
pub use crate::image::{GrayImageU8, GridShape, ImageU8};
pub use crate::partition::{partition_rows, Block, HaloMode, PartitionOptions, RemainderPolicy};
pub use crate::pipeline::{baseline_edges, distributed_edges, run};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use rowblock_sobel::prelude::*;
///
/// # fn main() -> Result<(), PipelineError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = GrayImageU8::new(w, h, vec![0u8; w * h]);
///
/// let base = baseline_edges(&gray)?;
/// let dist = distributed_edges(&gray, 4, PartitionOptions::exact())?;
/// assert_eq!(base, dist);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayImageU8, ImageU8};
    pub use crate::{
        baseline_edges, distributed_edges, HaloMode, PartitionOptions, PipelineError,
        RemainderPolicy,
    };
}
