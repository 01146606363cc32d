//! Error types for every stage of the run.
//!
//! Each stage gets its own enum so callers can tell a recoverable per-image
//! failure (decode, encode, dimension) from one that ends the whole run
//! (abort, disconnect). `PipelineError` wraps them for the orchestrator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("failed to read manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write JSON {path}: {message}")]
    Json { path: PathBuf, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("grid {width}x{height} is smaller than the 3x3 kernel")]
    Dimension { width: usize, height: usize },

    #[error("output grid {output_width}x{output_height} does not match input {width}x{height}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        output_width: usize,
        output_height: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("cannot partition rows across zero workers")]
    NoWorkers,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommError {
    #[error("run aborted by rank {origin} with code {code}")]
    Aborted { code: i32, origin: usize },

    #[error("rank {peer} disconnected")]
    Disconnected { peer: usize },

    #[error("rank {rank} expected {expected} from rank {peer}")]
    UnexpectedPacket {
        rank: usize,
        peer: usize,
        expected: &'static str,
    },

    #[error("rank {peer} sent {actual} bytes, block expects {expected}")]
    SizeMismatch {
        peer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("rank {rank} out of range for group of {size}")]
    InvalidRank { rank: usize, size: usize },

    #[error("root rank {root} out of range for group of {size}")]
    InvalidRoot { root: usize, size: usize },

    #[error("root rank {rank} has no data to distribute")]
    MissingRootData { rank: usize },

    #[error("{blocks} blocks given for a group of {size}")]
    TopologyMismatch { blocks: usize, size: usize },

    #[error("worker rank {rank} panicked")]
    WorkerPanicked { rank: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] ImageIoError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Comm(CommError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("distributed pass aborted with code {code}")]
    Aborted { code: i32 },

    #[error("coordinator holds no result")]
    MissingResult,
}

impl From<CommError> for PipelineError {
    fn from(err: CommError) -> Self {
        match err {
            CommError::Aborted { code, .. } => PipelineError::Aborted { code },
            other => PipelineError::Comm(other),
        }
    }
}
