// McProd - app/prepare.rs
//
// Manifest preparation: turn a list file or a block range into manifest
// entries and write them out.

use crate::core::export;
use crate::core::manifest;
use crate::core::model::ManifestEntry;
use crate::platform::fs;
use crate::util::error::{ExportError, ManifestError};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Where the manifest entries come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    /// Text file with one LHE entry per line.
    List(PathBuf),
    /// Block numbers `start..=end` stepping by `step`.
    Range { start: i64, end: i64, step: i64 },
}

/// Build the manifest entries for `source`, resolving against `eos_base`.
pub fn build_jobs(source: &JobSource, eos_base: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    let jobs = match source {
        JobSource::List(path) => {
            let text = fs::read_file_lossy(path).map_err(|e| ManifestError::ListRead {
                path: path.clone(),
                source: e,
            })?;
            let lines: Vec<&str> = text.lines().collect();
            manifest::build_from_list(&lines, eos_base)
        }
        JobSource::Range { start, end, step } => {
            manifest::build_from_range(*start, *end, *step, eos_base)?
        }
    };

    tracing::info!(source = ?source, jobs = jobs.len(), "Manifest built");
    Ok(jobs)
}

/// Write `jobs` to `output`, creating parent directories.
pub fn write_jobs(jobs: &[ManifestEntry], output: &Path) -> Result<usize, ExportError> {
    let file = fs::create_file(output).map_err(|e| ExportError::Io {
        path: output.to_path_buf(),
        source: e,
    })?;
    export::write_manifest(jobs, BufWriter::new(file), output)
}
