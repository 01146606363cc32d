use super::timing::TimingBreakdown;
use crate::partition::PartitionOptions;
use serde::Serialize;
use std::path::PathBuf;

/// What happened to one image in one pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ImageOutcome {
    Written { output: PathBuf },
    Skipped { reason: String },
    EncodeFailed { output: PathBuf, reason: String },
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub input: PathBuf,
    #[serde(flatten)]
    pub outcome: ImageOutcome,
}

/// Timing and per-image outcomes of one pass.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    pub timing: TimingBreakdown,
    pub images: Vec<ImageRecord>,
}

impl PassReport {
    pub fn record(&mut self, input: PathBuf, outcome: ImageOutcome, elapsed_ms: f64) {
        self.timing.push(input.display().to_string(), elapsed_ms);
        self.images.push(ImageRecord { input, outcome });
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Skipped { .. }))
    }

    pub fn encode_failures(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::EncodeFailed { .. }))
    }

    fn count(&self, pred: impl Fn(&ImageOutcome) -> bool) -> usize {
        self.images.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Baseline vs. distributed comparison over one image list.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub workers: usize,
    pub partition: PartitionOptions,
    pub baseline: PassReport,
    pub distributed: PassReport,
    pub speedup: f64,
    pub efficiency: f64,
}

impl RunReport {
    pub fn new(
        workers: usize,
        partition: PartitionOptions,
        baseline: PassReport,
        distributed: PassReport,
    ) -> Self {
        let speedup = speedup(baseline.timing.total_ms, distributed.timing.total_ms);
        let efficiency = efficiency(speedup, workers);
        Self {
            workers,
            partition,
            baseline,
            distributed,
            speedup,
            efficiency,
        }
    }
}

/// `baseline / distributed`; infinite when the distributed time is zero.
pub fn speedup(baseline: f64, distributed: f64) -> f64 {
    baseline / distributed
}

/// Speed-up per worker.
pub fn efficiency(speedup: f64, workers: usize) -> f64 {
    speedup / workers as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speedup_and_efficiency_arithmetic() {
        let s = speedup(10.0, 4.0);
        assert!((s - 2.5).abs() < f64::EPSILON);
        assert!((efficiency(s, 4) - 0.625).abs() < f64::EPSILON);
    }

    #[test]
    fn report_derives_ratios_from_pass_totals() {
        let baseline = PassReport {
            timing: TimingBreakdown::with_total(10.0),
            images: Vec::new(),
        };
        let distributed = PassReport {
            timing: TimingBreakdown::with_total(4.0),
            images: Vec::new(),
        };
        let report = RunReport::new(4, PartitionOptions::default(), baseline, distributed);
        assert!((report.speedup - 2.5).abs() < 1e-12);
        assert!((report.efficiency - 0.625).abs() < 1e-12);
    }

    #[test]
    fn pass_counts_outcomes() {
        let mut pass = PassReport::default();
        pass.record(
            "a.png".into(),
            ImageOutcome::Written {
                output: "out/a.png".into(),
            },
            1.0,
        );
        pass.record(
            "b.png".into(),
            ImageOutcome::Skipped {
                reason: "missing".into(),
            },
            0.5,
        );
        assert_eq!(pass.written(), 1);
        assert_eq!(pass.skipped(), 1);
        assert_eq!(pass.encode_failures(), 0);
        assert_eq!(pass.timing.stages.len(), 2);
    }

    #[test]
    fn report_serializes_camel_case() {
        let mut pass = PassReport::default();
        pass.record(
            "a.png".into(),
            ImageOutcome::Written {
                output: "out/a.png".into(),
            },
            1.0,
        );
        let report = RunReport::new(2, PartitionOptions::exact(), pass.clone(), pass);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["workers"], 2);
        assert_eq!(json["partition"]["remainder"], "extend_last");
        assert_eq!(json["baseline"]["images"][0]["status"], "written");
        assert!(json["baseline"]["timing"]["totalMs"].is_number());
    }
}
