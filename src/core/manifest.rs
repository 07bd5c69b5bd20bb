// McProd - core/manifest.rs
//
// Job manifest construction: LHE entries to (label, URI) pairs.
// Core layer: operates on in-memory lines and integers only.

use crate::core::model::ManifestEntry;
use crate::util::constants;
use crate::util::error::ManifestError;
use regex::Regex;
use std::sync::OnceLock;

fn block_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(constants::BLOCK_FILE_PATTERN).expect("BLOCK_FILE_PATTERN: invalid regex")
    })
}

/// Join `entry` onto `base`, dropping one trailing `/` from the base and one
/// leading `/` from the entry.
pub fn join_base(base: &str, entry: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let entry = entry.strip_prefix('/').unwrap_or(entry);
    format!("{base}/{entry}")
}

/// Resolve one list entry to a full URI.
///
/// - `root://`, `srm://` and `file:` entries pass through unchanged.
/// - `/eos/...` paths get the EOS host prefix.
/// - Anything else is treated as relative to `eos_base`.
pub fn resolve_uri(entry: &str, eos_base: &str) -> String {
    let passthrough = constants::REMOTE_URI_SCHEMES
        .iter()
        .any(|scheme| entry.starts_with(scheme))
        || entry.starts_with(constants::LOCAL_URI_SCHEME);

    if passthrough {
        entry.to_string()
    } else if entry.starts_with(constants::EOS_PATH_PREFIX) {
        format!("{}{entry}", constants::EOS_HOST_PREFIX)
    } else {
        join_base(eos_base, entry)
    }
}

/// The 5-digit block number at the end of `uri`, if it names a block file.
pub fn block_number(uri: &str) -> Option<&str> {
    block_file_regex()
        .captures(uri)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Canonical LHE file name for a block number.
pub fn block_file_name(block: i64) -> String {
    format!("MC_Jpsi_block_{block:05}.lhe")
}

/// Build manifest entries from the lines of an LHE list file.
///
/// Blank lines and `#` comments are skipped. Each remaining line is trimmed,
/// resolved with [`resolve_uri`], and labelled from its block number; entries
/// without one get `job_<NNNNN>`, numbered by how many entries precede it.
pub fn build_from_list<S: AsRef<str>>(lines: &[S], eos_base: &str) -> Vec<ManifestEntry> {
    let mut entries: Vec<ManifestEntry> = Vec::new();

    for raw in lines {
        let entry = raw.as_ref().trim();
        if entry.is_empty() || entry.starts_with(constants::LIST_COMMENT_PREFIX) {
            continue;
        }

        let uri = resolve_uri(entry, eos_base);
        let label = match block_number(&uri) {
            Some(block) => block.to_string(),
            None => {
                let fallback = format!("job_{:05}", entries.len());
                tracing::debug!(uri = %uri, label = %fallback, "No block number in URI");
                fallback
            }
        };

        entries.push(ManifestEntry::new(
            format!("{}{label}", constants::BLOCK_LABEL_PREFIX),
            uri,
        ));
    }

    entries
}

/// Build manifest entries for every block in `start..=end` stepping by `step`.
///
/// `end` is included only when the stride lands on it exactly.
pub fn build_from_range(
    start: i64,
    end: i64,
    step: i64,
    eos_base: &str,
) -> Result<Vec<ManifestEntry>, ManifestError> {
    if start > end {
        return Err(ManifestError::InvalidRange { start, end });
    }
    let stride = usize::try_from(step)
        .ok()
        .filter(|s| *s >= 1)
        .ok_or(ManifestError::InvalidStep { step })?;

    Ok((start..=end)
        .step_by(stride)
        .map(|block| {
            let uri = join_base(eos_base, &block_file_name(block));
            ManifestEntry::new(
                format!("{}{block:05}", constants::BLOCK_LABEL_PREFIX),
                uri,
            )
        })
        .collect())
}

/// Read `<label> <uri>` manifest lines back into entries.
///
/// Blank lines are skipped; a line without a space becomes a label with an
/// empty URI.
pub fn parse_manifest(text: &str) -> Vec<ManifestEntry> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| match l.split_once(' ') {
            Some((label, uri)) => ManifestEntry::new(label, uri),
            None => ManifestEntry::new(l, ""),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
