// McProd - core/report.rs
//
// Production report: cross-job statistics and fixed-width text rendering.
// Core layer: builds strings only; printing and persistence belong to app.
//
// The rendered layout is a downstream contract (reports are diffed across
// runs), so every width comes from util::constants.

use crate::core::model::{JobResult, StepStats};
use crate::util::constants::{
    AVG_TIME_WIDTH, COUNT_WIDTH, REPORT_TITLE, REPORT_WIDTH, STEP_NAME_WIDTH, STEP_ORDER,
};
use std::collections::HashMap;

/// Aggregate counts over a set of jobs.
#[derive(Debug, Clone, Default)]
pub struct ProductionSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Keyed by step name; includes steps outside `STEP_ORDER`.
    pub step_stats: HashMap<String, StepStats>,
}

impl ProductionSummary {
    pub fn from_results(results: &[JobResult]) -> Self {
        let total = results.len();
        let succeeded = results.iter().filter(|r| r.success).count();

        let mut step_stats: HashMap<String, StepStats> = HashMap::new();
        for job in results {
            for step in &job.steps {
                step_stats.entry(step.name.clone()).or_default().record(step);
            }
        }

        Self {
            total,
            succeeded,
            failed: total - succeeded,
            step_stats,
        }
    }

    /// Table rows in `STEP_ORDER`, skipping steps that never ran.
    pub fn step_rows(&self) -> Vec<StepRow> {
        STEP_ORDER
            .iter()
            .filter_map(|name| {
                let stats = self.step_stats.get(*name)?;
                if stats.total == 0 {
                    return None;
                }
                Some(StepRow {
                    name: (*name).to_string(),
                    total: stats.total,
                    ok: stats.ok,
                    fail: stats.fail,
                    avg_runtime_s: stats.average_runtime(),
                })
            })
            .collect()
    }
}

/// One line of the step statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub name: String,
    pub total: u64,
    pub ok: u64,
    pub fail: u64,
    pub avg_runtime_s: f64,
}

impl StepRow {
    fn render(&self) -> String {
        format!(
            "{:<nw$} {:>cw$} {:>cw$} {:>cw$} {:>aw$.1}s",
            self.name,
            self.total,
            self.ok,
            self.fail,
            self.avg_runtime_s,
            nw = STEP_NAME_WIDTH,
            cw = COUNT_WIDTH,
            aw = AVG_TIME_WIDTH - 1,
        )
    }
}

fn table_header() -> String {
    format!(
        "{:<nw$} {:>cw$} {:>cw$} {:>cw$} {:>aw$}",
        "Step",
        "Total",
        "OK",
        "Fail",
        "Avg Time",
        nw = STEP_NAME_WIDTH,
        cw = COUNT_WIDTH,
        aw = AVG_TIME_WIDTH,
    )
}

/// Render the production report for `results`, in aggregation order.
///
/// Lines are joined with `\n` and the text has no trailing newline.
pub fn render_report(results: &[JobResult]) -> String {
    let summary = ProductionSummary::from_results(results);
    let banner = "=".repeat(REPORT_WIDTH);
    let rule = "-".repeat(REPORT_WIDTH);

    let mut lines: Vec<String> = vec![
        banner.clone(),
        REPORT_TITLE.to_string(),
        banner.clone(),
        format!("Total Jobs:     {}", summary.total),
        format!("Successful:     {}", summary.succeeded),
        format!("Failed:         {}", summary.failed),
        String::new(),
        "Step Statistics:".to_string(),
        rule.clone(),
        table_header(),
        rule.clone(),
    ];

    lines.extend(summary.step_rows().iter().map(StepRow::render));
    lines.push(rule.clone());
    lines.push(String::new());

    if summary.failed > 0 {
        lines.push("Failed Jobs:".to_string());
        lines.push(rule);
        for job in results.iter().filter(|j| !j.success) {
            lines.push(format!("  {}: {}", job.label, job.failed_steps().join(", ")));
        }
        lines.push(String::new());
    }

    lines.push(banner);
    lines.join("\n")
}

/// Read the step statistics table back out of a rendered report.
///
/// Returns the rows between the table header's closing rule and the next
/// rule. Lines that do not have the five expected columns are skipped.
pub fn parse_step_table(report: &str) -> Vec<StepRow> {
    let rule = "-".repeat(REPORT_WIDTH);
    let header = table_header();

    let mut lines = report.lines().skip_while(|l| *l != header);
    // header, then its closing rule
    if lines.next().is_none() || lines.next() != Some(rule.as_str()) {
        return Vec::new();
    }

    lines
        .take_while(|l| *l != rule)
        .filter_map(parse_step_row)
        .collect()
}

fn parse_step_row(line: &str) -> Option<StepRow> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, total, ok, fail, avg] = fields.as_slice() else {
        return None;
    };
    Some(StepRow {
        name: (*name).to_string(),
        total: total.parse().ok()?,
        ok: ok.parse().ok()?,
        fail: fail.parse().ok()?,
        avg_runtime_s: avg.strip_suffix('s')?.parse().ok()?,
    })
}

// =============================================================================
// Tests
// =============================================================================
