// McProd - core/parser.rs
//
// Job summary log parsing.
// Core layer: accepts log text and a file path, never touches the filesystem.
//
// Parsing is best-effort: malformed content yields fewer steps, never an
// error.

use crate::core::model::{JobResult, StepResult};
use crate::util::constants;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn step_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(constants::STEP_BLOCK_PATTERN).expect("STEP_BLOCK_PATTERN: invalid regex")
    })
}

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(constants::SUMMARY_LOG_LABEL_PATTERN)
            .expect("SUMMARY_LOG_LABEL_PATTERN: invalid regex")
    })
}

/// Parse one summary log into a [`JobResult`].
///
/// The label comes from `file_path` (see [`derive_label`]); `content` is the
/// full log text. A log with no recognised step blocks still yields a result,
/// with no steps and `success == false`.
pub fn parse_summary(content: &str, file_path: &Path) -> JobResult {
    let label = derive_label(file_path);
    let steps = parse_steps(content);
    tracing::debug!(
        file = %file_path.display(),
        label = %label,
        steps = steps.len(),
        "Parsed summary log"
    );
    JobResult::new(label, steps)
}

/// Extract every `step=` / `status=` / `runtime_s=` block, in text order.
///
/// Each step also receives the events annotation found by [`find_events`].
/// Blocks whose numbers overflow are skipped.
pub fn parse_steps(content: &str) -> Vec<StepResult> {
    step_block_regex()
        .captures_iter(content)
        .filter_map(|caps| {
            let name = &caps[1];
            let status = caps[2].parse::<i64>().ok();
            let runtime = caps[3].parse::<u64>().ok();
            match (status, runtime) {
                (Some(status), Some(runtime_s)) => {
                    let mut step = StepResult::new(name, status, runtime_s);
                    step.events = find_events(content, name);
                    Some(step)
                }
                _ => {
                    tracing::debug!(step = name, "Skipping step block with out-of-range number");
                    None
                }
            }
        })
        .collect()
}

/// Find the events annotation for `step_name` anywhere in `content`.
///
/// Searches the whole document for the first `step=<name>` that is followed,
/// at any distance, by `events=<non-empty text>`, and returns that text
/// trimmed. The search is not scoped to the step's own block: with repeated
/// or prefix-sharing step names the first textual match wins.
pub fn find_events(content: &str, step_name: &str) -> Option<String> {
    let marker = format!("step={step_name}");
    let after_marker = &content[content.find(&marker)? + marker.len()..];

    let mut offset = 0;
    while let Some(pos) = after_marker[offset..].find(constants::EVENTS_MARKER) {
        let value_start = offset + pos + constants::EVENTS_MARKER.len();
        let tail = &after_marker[value_start..];
        let value = tail.find('\n').map_or(tail, |end| &tail[..end]);
        if !value.is_empty() {
            return Some(value.trim().to_string());
        }
        offset = value_start;
    }
    None
}

/// Job label for a summary log path.
///
/// `job_<label>_summary.log` yields `<label>`; any other name falls back to
/// the file name without its extension.
pub fn derive_label(file_path: &Path) -> String {
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(caps) = label_regex().captures(&file_name) {
        return caps[1].to_string();
    }

    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!(file = %file_name, label = %stem, "File name has no job label, using stem");
    stem
}

// =============================================================================
// Tests
// =============================================================================
