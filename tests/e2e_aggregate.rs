// McProd - tests/e2e_aggregate.rs
//
// End-to-end tests for the log aggregation pipeline.
//
// These tests exercise the real filesystem, the checked-in fixture logs,
// and the compiled `aggregate-logs` binary. No mocks, no stubs.

use mcprod::app::aggregate::{aggregate_logs, parse_summary_log};
use mcprod::core::discovery::DiscoveryConfig;
use mcprod::core::model::JobResult;
use mcprod::core::report::{parse_step_table, render_report, ProductionSummary, StepRow};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

// =============================================================================
// Helpers
// =============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("production")
}

fn fixture_results() -> Vec<JobResult> {
    aggregate_logs(&fixtures_dir(), &DiscoveryConfig::default())
        .unwrap()
        .results
}

/// Copy the fixture logs into a fresh temp dir so report writes stay local.
fn copy_fixtures() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(fixtures_dir()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

fn empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("mcprod-test-config.toml");
    fs::write(&path, "").unwrap();
    path
}

fn row(name: &str, total: u64, ok: u64, fail: u64, avg: f64) -> StepRow {
    StepRow {
        name: name.to_string(),
        total,
        ok,
        fail,
        avg_runtime_s: avg,
    }
}

// =============================================================================
// Library pipeline
// =============================================================================

#[test]
fn e2e_aggregates_fixture_logs_in_name_order() {
    let results = fixture_results();
    let labels: Vec<_> = results.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["00010", "00020", "00030"]);

    assert!(results[0].success);
    assert_eq!(results[0].steps.len(), 7);
    assert_eq!(results[0].total_runtime_s, 2100);

    assert!(!results[1].success);
    assert_eq!(results[1].failed_steps(), vec!["RECO"]);

    assert!(results[2].steps.is_empty());
    assert!(!results[2].success);
}

#[test]
fn e2e_events_annotations_from_fixture() {
    let job = parse_summary_log(&fixtures_dir().join("job_00010_summary.log"))
        .unwrap()
        .unwrap();
    assert_eq!(
        job.steps[0].events.as_deref(),
        Some("5000 generated, 4982 passed filter")
    );
    assert_eq!(job.steps[1].events.as_deref(), Some("5000 generated"));
    assert_eq!(job.steps[2].events, None);
}

#[test]
fn e2e_step_table_matches_fixture_statistics() {
    let rows = parse_step_table(&render_report(&fixture_results()));
    assert_eq!(
        rows,
        vec![
            row("GEN_STANDARD", 2, 2, 0, 125.0),
            row("GEN_PHI", 2, 2, 0, 85.0),
            row("DPS_MIX", 2, 2, 0, 45.0),
            row("SIM", 2, 2, 0, 950.0),
            row("DIGI", 2, 2, 0, 305.0),
            row("RECO", 2, 1, 1, 322.5),
            row("MINIAOD", 1, 1, 0, 60.0),
        ]
    );
}

#[test]
fn e2e_report_round_trip_recovers_statistics() {
    let results = fixture_results();
    let summary = ProductionSummary::from_results(&results);
    assert_eq!(parse_step_table(&render_report(&results)), summary.step_rows());
    // HARVEST is counted but never tabulated.
    assert_eq!(summary.step_stats["HARVEST"].total, 1);
}

#[test]
fn e2e_report_failed_jobs_section() {
    let report = render_report(&fixture_results());
    assert!(report.contains("Total Jobs:     3"));
    assert!(report.contains("Successful:     1"));
    assert!(report.contains("Failed:         2"));
    assert!(report.contains("Failed Jobs:\n------"));
    assert!(report.contains("\n  00020: RECO\n  00030: \n"));
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn e2e_binary_writes_default_report() {
    let dir = copy_fixtures();
    let config = empty_config(dir.path());

    let out = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let report_path = dir.path().join("production_summary.txt");
    let written = fs::read_to_string(&report_path).unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();

    assert!(stdout.starts_with(&written), "stdout must carry the report verbatim");
    assert!(stdout.ends_with(&format!(
        "\n\nSummary written to {}\n",
        report_path.display()
    )));
}

#[test]
fn e2e_binary_output_flag_and_exports() {
    let dir = copy_fixtures();
    let config = empty_config(dir.path());
    let report = dir.path().join("reports").join("summary.txt");
    let json = dir.path().join("exports").join("jobs.json");
    let csv = dir.path().join("exports").join("jobs.csv");

    let status = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(dir.path())
        .arg("-o")
        .arg(&report)
        .arg("--json")
        .arg(&json)
        .arg("--csv")
        .arg(&csv)
        .arg("--config")
        .arg(&config)
        .status()
        .unwrap();
    assert!(status.success());

    assert!(report.exists());
    let jobs: Vec<JobResult> = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(jobs.len(), 3);
    assert_eq!(fs::read_to_string(&csv).unwrap().lines().count(), 4);
}

#[test]
fn e2e_binary_fails_on_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = empty_config(dir.path());
    let out = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(dir.path().join("missing"))
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("is not a directory"));
}

#[test]
fn e2e_binary_fails_when_no_logs_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = empty_config(dir.path());
    let out = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("No job logs found"));
    assert!(!dir.path().join("production_summary.txt").exists());
}

#[test]
fn e2e_round_trip_recovers_one_decimal_average() {
    let dir = tempfile::tempdir().unwrap();
    for (label, runtime) in [("a", 10), ("b", 10), ("c", 11)] {
        fs::write(
            dir.path().join(format!("job_{label}_summary.log")),
            format!("step=SIM\nstatus=0\nruntime_s={runtime}\n"),
        )
        .unwrap();
    }
    let results = aggregate_logs(dir.path(), &DiscoveryConfig::default())
        .unwrap()
        .results;

    let rows = parse_step_table(&render_report(&results));
    assert_eq!(rows, vec![row("SIM", 3, 3, 0, 10.3)]);
    let exact = ProductionSummary::from_results(&results).step_stats["SIM"].average_runtime();
    assert!((exact - 10.3).abs() < 0.05 && exact != 10.3);
}

#[cfg(unix)]
#[test]
fn e2e_binary_reads_symlinked_logs() {
    let dir = tempfile::tempdir().unwrap();
    let config = empty_config(dir.path());
    let logs = dir.path().join("logs");
    fs::create_dir(&logs).unwrap();
    std::os::unix::fs::symlink(
        fixtures_dir().join("job_00010_summary.log"),
        logs.join("job_00010_summary.log"),
    )
    .unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(&logs)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Total Jobs:     1"));
}

#[cfg(unix)]
#[test]
fn e2e_binary_reports_skipped_logs() {
    let dir = copy_fixtures();
    let config = empty_config(dir.path());
    std::os::unix::fs::symlink(
        dir.path().join("does_not_exist.log"),
        dir.path().join("job_00040_summary.log"),
    )
    .unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("skipped 1 unreadable summary log(s)"));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Total Jobs:     3"));
}

#[test]
fn e2e_binary_uses_configured_pattern() {
    let dir = copy_fixtures();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[discovery]\npattern = \"job_0001*_summary.log\"\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Total Jobs:     1"));
}

#[test]
fn e2e_binary_rejects_invalid_configured_pattern() {
    let dir = copy_fixtures();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[discovery]\npattern = \"job_[\"\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_aggregate-logs"))
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid summary log pattern"));
}
