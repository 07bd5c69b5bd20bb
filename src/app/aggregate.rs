// McProd - app/aggregate.rs
//
// Log aggregation lifecycle: discover summary logs, read and parse each one,
// and persist the rendered report and optional exports.
//
// Strictly sequential. Per-file read errors are non-fatal; the file is
// skipped and reported as a warning.

use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::export;
use crate::core::model::JobResult;
use crate::core::parser;
use crate::platform::fs;
use crate::util::error::{DiscoveryError, ExportError};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Results of one aggregation run, in file-name order.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub results: Vec<JobResult>,
    /// Human-readable notes about skipped files.
    pub warnings: Vec<String>,
}

/// Read and parse a single summary log.
///
/// A missing file yields `Ok(None)`; any other read failure is returned.
pub fn parse_summary_log(path: &Path) -> io::Result<Option<JobResult>> {
    let content = match fs::read_file_lossy(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(file = %path.display(), "Summary log vanished; skipping");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    Ok(Some(parser::parse_summary(&content, path)))
}

/// Parse every summary log in `log_dir`.
///
/// Fails only when `log_dir` itself cannot be used; see
/// [`discovery::discover_summary_logs`].
pub fn aggregate_logs(
    log_dir: &Path,
    config: &DiscoveryConfig,
) -> Result<Aggregation, DiscoveryError> {
    let (files, mut warnings) = discovery::discover_summary_logs(log_dir, config)?;
    let mut results = Vec::with_capacity(files.len());

    for file in &files {
        match parse_summary_log(file) {
            Ok(Some(job)) => results.push(job),
            Ok(None) => {}
            Err(e) => {
                let msg = format!("Skipping unreadable log '{}': {e}", file.display());
                tracing::warn!("{}", msg);
                warnings.push(msg);
            }
        }
    }

    tracing::info!(
        dir = %log_dir.display(),
        jobs = results.len(),
        skipped = warnings.len(),
        "Aggregation complete"
    );

    Ok(Aggregation { results, warnings })
}

/// Where the report goes when no `--output` is given.
pub fn default_report_path(log_dir: &Path, file_name: &str) -> PathBuf {
    log_dir.join(file_name)
}

/// Persist the rendered report verbatim, creating parent directories.
pub fn write_report(report: &str, path: &Path) -> Result<(), ExportError> {
    fs::write_text(path, report).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), bytes = report.len(), "Report written");
    Ok(())
}

/// Write the per-job results as pretty JSON.
pub fn write_json(results: &[JobResult], path: &Path) -> Result<usize, ExportError> {
    let file = open_for_export(path)?;
    export::export_jobs_json(results, BufWriter::new(file), path)
}

/// Write the per-job results as CSV.
pub fn write_csv(results: &[JobResult], path: &Path) -> Result<usize, ExportError> {
    let file = open_for_export(path)?;
    export::export_jobs_csv(results, BufWriter::new(file), path)
}

fn open_for_export(path: &Path) -> Result<std::fs::File, ExportError> {
    fs::create_file(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
