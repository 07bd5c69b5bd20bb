// McProd - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};

use crate::util::constants;

// =============================================================================
// Summary log results
// =============================================================================

/// One recognised step block of a job summary log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Step name as written after `step=` (e.g. `SIM`, `RECO`).
    pub name: String,

    /// Exit status. 0 is success, anything else is a failure,
    /// `STATUS_UNSET` means the log never recorded one.
    pub status: i64,

    /// Wall-clock runtime in seconds.
    pub runtime_s: u64,

    /// Trimmed text following the first `events=` after this step's marker.
    pub events: Option<String>,
}

impl StepResult {
    pub fn new(name: impl Into<String>, status: i64, runtime_s: u64) -> Self {
        Self {
            name: name.into(),
            status,
            runtime_s,
            events: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == constants::STATUS_OK
    }
}

/// Everything parsed from one `job_<label>_summary.log`.
///
/// `success` and `total_runtime_s` are derived from `steps` at construction
/// and never recomputed; build through [`JobResult::new`]. Runtime sums
/// saturate at `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Label taken from the file name, or the file stem as a fallback.
    pub label: String,

    /// Steps in order of appearance in the log text.
    pub steps: Vec<StepResult>,

    /// True iff at least one step exists and every step succeeded.
    pub success: bool,

    /// Sum of all step runtimes.
    pub total_runtime_s: u64,
}

impl JobResult {
    pub fn new(label: impl Into<String>, steps: Vec<StepResult>) -> Self {
        let success = !steps.is_empty() && steps.iter().all(StepResult::succeeded);
        let total_runtime_s = steps
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.runtime_s));
        Self {
            label: label.into(),
            steps,
            success,
            total_runtime_s,
        }
    }

    /// Names of the steps whose status is non-zero, in log order.
    pub fn failed_steps(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| !s.succeeded())
            .map(|s| s.name.as_str())
            .collect()
    }
}

// =============================================================================
// Step statistics
// =============================================================================

/// Cross-job counters for a single step name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub total: u64,
    pub ok: u64,
    pub fail: u64,
    pub runtime_s: u64,
}

impl StepStats {
    pub fn record(&mut self, step: &StepResult) {
        self.total += 1;
        self.runtime_s = self.runtime_s.saturating_add(step.runtime_s);
        if step.succeeded() {
            self.ok += 1;
        } else {
            self.fail += 1;
        }
    }

    /// Mean runtime in seconds; 0.0 when the step never ran.
    pub fn average_runtime(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.runtime_s as f64 / self.total as f64
        }
    }
}

// =============================================================================
// Job manifest
// =============================================================================

/// One `<label> <uri>` line of a job manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Job label, always `block_`-prefixed.
    pub label: String,

    /// Fully resolved input URI.
    pub uri: String,
}

impl ManifestEntry {
    pub fn new(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            uri: uri.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_success_requires_steps() {
        let job = JobResult::new("empty", Vec::new());
        assert!(!job.success, "a job with no steps is never successful");
        assert_eq!(job.total_runtime_s, 0);
    }

    #[test]
    fn test_job_success_and_runtime_derived_from_steps() {
        let job = JobResult::new(
            "00010",
            vec![StepResult::new("SIM", 0, 120), StepResult::new("RECO", 0, 30)],
        );
        assert!(job.success);
        assert_eq!(job.total_runtime_s, 150);

        let failed = JobResult::new(
            "00020",
            vec![StepResult::new("SIM", 0, 120), StepResult::new("RECO", 2, 5)],
        );
        assert!(!failed.success);
        assert_eq!(failed.failed_steps(), vec!["RECO"]);
    }

    #[test]
    fn test_unset_status_counts_as_failure() {
        let step = StepResult::new("DIGI", constants::STATUS_UNSET, 0);
        assert!(!step.succeeded());
    }

    #[test]
    fn test_runtime_sums_saturate() {
        let steps = vec![
            StepResult::new("SIM", 0, u64::MAX),
            StepResult::new("RECO", 0, 1),
        ];
        let job = JobResult::new("huge", steps.clone());
        assert_eq!(job.total_runtime_s, u64::MAX);

        let mut stats = StepStats::default();
        stats.record(&steps[0]);
        stats.record(&steps[0]);
        assert_eq!(stats.runtime_s, u64::MAX);
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_step_stats_average() {
        let mut stats = StepStats::default();
        assert_eq!(stats.average_runtime(), 0.0);
        stats.record(&StepResult::new("SIM", 0, 10));
        stats.record(&StepResult::new("SIM", 1, 5));
        assert_eq!(stats.total, 2);
        assert_eq!(stats.ok, 1);
        assert_eq!(stats.fail, 1);
        assert_eq!(stats.average_runtime(), 7.5);
    }
}
