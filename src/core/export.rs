// McProd - core/export.rs
//
// Writers for the job manifest text format and the per-job JSON/CSV exports.
// Core layer: writes to any Write trait object; the path is for error context.

use crate::core::model::{JobResult, ManifestEntry};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Write one `<label> <uri>` line per entry, in order.
pub fn write_manifest<W: Write>(
    entries: &[ManifestEntry],
    mut writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    for entry in entries {
        writeln!(writer, "{} {}", entry.label, entry.uri).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(entries.len())
}

/// Export per-job results to CSV.
///
/// Writes: label, success, steps, total_runtime_s, failed_steps
/// (`failed_steps` is `;`-separated).
pub fn export_jobs_csv<W: Write>(
    results: &[JobResult],
    writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["label", "success", "steps", "total_runtime_s", "failed_steps"])
        .map_err(csv_err)?;

    for job in results {
        let steps = job.steps.len().to_string();
        let runtime = job.total_runtime_s.to_string();
        let failed = job.failed_steps().join(";");
        csv_writer
            .write_record([
                job.label.as_str(),
                if job.success { "true" } else { "false" },
                steps.as_str(),
                runtime.as_str(),
                failed.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(results.len())
}

/// Export per-job results to JSON (array of objects, steps included).
pub fn export_jobs_json<W: Write>(
    results: &[JobResult],
    mut writer: W,
    path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, results).map_err(|e| ExportError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(results.len())
}
