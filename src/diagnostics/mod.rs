//! Timing and run reports.
//!
//! `RunReport` is what the coordinator returns after both passes: per-pass
//! timing breakdowns, a record per image, and the derived speed-up and
//! parallel efficiency. Everything here serializes to camelCase JSON.

pub mod report;
pub mod timing;

pub use report::{efficiency, speedup, ImageOutcome, ImageRecord, PassReport, RunReport};
pub use timing::{duration_ms, StageTiming, TimingBreakdown};
