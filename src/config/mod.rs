//! JSON configuration for the benchmark binary.
pub mod bench;

pub use bench::{load_config, BenchConfig, OutputConfig};
