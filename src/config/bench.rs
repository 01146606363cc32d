use crate::error::ConfigError;
use crate::partition::PartitionOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct BenchConfig {
    /// Text file listing one input image per line.
    pub manifest: PathBuf,
    /// Worker count for the distributed pass (>= 1).
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub partition: PartitionOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the single-worker pass writes its edge images.
    pub baseline_dir: PathBuf,
    /// Where the distributed pass writes its edge images.
    pub distributed_dir: PathBuf,
    /// Optional JSON dump of the run report.
    pub report_json: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            baseline_dir: PathBuf::from("output/serial"),
            distributed_dir: PathBuf::from("output/parallel"),
            report_json: None,
        }
    }
}

fn default_workers() -> usize {
    num_cpus::get().max(1)
}

impl BenchConfig {
    pub fn new(manifest: impl Into<PathBuf>, workers: usize) -> Self {
        Self {
            manifest: manifest.into(),
            workers,
            partition: PartitionOptions::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn with_partition(mut self, partition: PartitionOptions) -> Self {
        self.partition = partition;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.output.baseline_dir == self.output.distributed_dir {
            return Err(ConfigError::Invalid(format!(
                "baseline and distributed passes both write to {}",
                self.output.baseline_dir.display()
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<BenchConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: BenchConfig = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{HaloMode, RemainderPolicy};

    #[test]
    fn shipped_sample_config_parses() {
        let cfg: BenchConfig =
            serde_json::from_str(include_str!("../../config/bench.json")).unwrap();
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.partition, PartitionOptions::default());
        assert_eq!(cfg.output.report_json, Some(PathBuf::from("output/report.json")));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: BenchConfig = serde_json::from_str(r#"{ "manifest": "list.txt" }"#).unwrap();
        assert_eq!(cfg.manifest, PathBuf::from("list.txt"));
        assert!(cfg.workers >= 1);
        assert_eq!(cfg.partition, PartitionOptions::default());
        assert_eq!(cfg.partition.remainder, RemainderPolicy::Drop);
        assert_eq!(cfg.partition.halo, HaloMode::None);
        assert_eq!(cfg.output.baseline_dir, PathBuf::from("output/serial"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn full_config_parses() {
        let cfg: BenchConfig = serde_json::from_str(
            r#"{
                "manifest": "list.txt",
                "workers": 4,
                "partition": { "remainder": "extend_last", "halo": "exchange" },
                "output": { "baseline_dir": "a", "distributed_dir": "b", "report_json": "r.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.partition, PartitionOptions::exact());
        assert_eq!(cfg.output.report_json, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn zero_workers_rejected() {
        let cfg = BenchConfig::new("list.txt", 0);
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn shared_output_dir_rejected() {
        let cfg = BenchConfig::new("list.txt", 2).with_output(OutputConfig {
            baseline_dir: "same".into(),
            distributed_dir: "same".into(),
            report_json: None,
        });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let res: Result<BenchConfig, _> = serde_json::from_str(
            r#"{ "manifest": "l", "partition": { "remainder": "spread" } }"#,
        );
        assert!(res.is_err());
    }
}
