//! Per-run bookkeeping: which stages ran, what they touched, and what they
//! skipped, so a run's outcome can be logged and summarized in one place.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    /// The stage ran against real input.
    Applied {
        rows_touched: usize,
        /// Source rows whose code matched nothing in the main table.
        unmatched: usize,
    },
    /// The stage had nothing to do (no file supplied, sheet empty, ...).
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: String,
    pub status: StageStatus,
}

impl StageReport {
    #[must_use]
    pub fn applied(stage: impl Into<String>, rows_touched: usize, unmatched: usize) -> Self {
        Self {
            stage: stage.into(),
            status: StageStatus::Applied {
                rows_touched,
                unmatched,
            },
        }
    }

    #[must_use]
    pub fn skipped(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            status: StageStatus::Skipped {
                reason: reason.into(),
            },
        }
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            StageStatus::Applied {
                rows_touched,
                unmatched,
            } => write!(
                f,
                "{}: applied ({rows_touched} rows, {unmatched} unmatched)",
                self.stage
            ),
            StageStatus::Skipped { reason } => write!(f, "{}: skipped ({reason})", self.stage),
        }
    }
}

/// Accumulated outcome of one end-to-end run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub stages: Vec<StageReport>,
    /// Main-sheet rows dropped because the primary product code was empty.
    pub rows_skipped_empty_code: usize,
}

impl RunReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: StageReport) {
        self.stages.push(report);
    }

    /// Total unmatched rows across all applied stages.
    #[must_use]
    pub fn total_unmatched(&self) -> usize {
        self.stages
            .iter()
            .map(|s| match s.status {
                StageStatus::Applied { unmatched, .. } => unmatched,
                StageStatus::Skipped { .. } => 0,
            })
            .sum()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in &self.stages {
            writeln!(f, "{stage}")?;
        }
        if self.rows_skipped_empty_code > 0 {
            writeln!(
                f,
                "rows skipped for empty product code: {}",
                self.rows_skipped_empty_code
            )?;
        }
        Ok(())
    }
}
