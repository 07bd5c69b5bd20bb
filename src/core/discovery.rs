// McProd - core/discovery.rs
//
// Summary log discovery inside a single log directory.
//
// Reads directory metadata only, never file contents. Only the top level of
// the directory is listed; subdirectories are not descended into.
// Symlinks are resolved, so a linked summary log counts as a file.
// Per-entry I/O errors are non-fatal and collected as warnings.

use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

/// Configuration for a discovery operation.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob (file name only) a summary log must match.
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: constants::SUMMARY_LOG_GLOB.to_string(),
        }
    }
}

/// List summary logs directly under `root`, sorted by file name.
///
/// Only regular files whose name matches `config.pattern` are returned.
/// Entries that cannot be inspected are reported in the warnings vector.
///
/// # Fatal errors
/// Returns `Err` if `root` does not exist, is not a directory, cannot be
/// listed, or the configured pattern is not a valid glob.
pub fn discover_summary_logs(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<PathBuf>, Vec<String>), DiscoveryError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    }

    let pattern = glob::Pattern::new(&config.pattern).map_err(|e| DiscoveryError::InvalidPattern {
        pattern: config.pattern.clone(),
        source: e,
    })?;

    let mut files = Vec::new();
    let mut warnings = Vec::new();

    let walker = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                // The root itself failing to list is fatal; a single entry
                // failing is not.
                if e.depth() == 0 {
                    return Err(DiscoveryError::Traversal {
                        path: root.to_path_buf(),
                        source: e,
                    });
                }
                let msg = format!("Skipping unreadable entry: {e}");
                tracing::warn!("{}", msg);
                warnings.push(msg);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if pattern.matches(&entry.file_name().to_string_lossy()) {
            tracing::debug!(file = %entry.path().display(), "Summary log found");
            files.push(entry.into_path());
        }
    }

    tracing::info!(
        root = %root.display(),
        found = files.len(),
        "Summary log discovery complete"
    );

    Ok((files, warnings))
}

// =============================================================================
// Tests
// =============================================================================
