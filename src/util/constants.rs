// McProd - util/constants.rs
//
// Single source of truth for all named constants, patterns, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "McProd";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "mcprod";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Summary logs
// =============================================================================

/// Glob selecting per-job summary logs inside a log directory.
pub const SUMMARY_LOG_GLOB: &str = "job_*_summary.log";

/// Extracts the job label from a summary log file name.
pub const SUMMARY_LOG_LABEL_PATTERN: &str = r"job_(\S+)_summary\.log";

/// One step block: three consecutive lines, in this order, nothing between.
pub const STEP_BLOCK_PATTERN: &str = r"step=(\w+)\nstatus=(-?\d+)\nruntime_s=(\d+)";

/// Marker preceding a step's free-text events annotation.
pub const EVENTS_MARKER: &str = "events=";

/// Status code recorded by a successful step.
pub const STATUS_OK: i64 = 0;

/// Status code of a step whose status was never recorded.
pub const STATUS_UNSET: i64 = -1;

// =============================================================================
// Production report
// =============================================================================

/// Report heading printed between the two banner rules.
pub const REPORT_TITLE: &str = "JJP DPS Production Summary";

/// Width of the `=` banner and `-` separator rules.
pub const REPORT_WIDTH: usize = 60;

/// Width of the left-justified step name column.
pub const STEP_NAME_WIDTH: usize = 15;

/// Width of each right-justified count column.
pub const COUNT_WIDTH: usize = 8;

/// Width of the average runtime column, including the trailing `s`.
pub const AVG_TIME_WIDTH: usize = 12;

/// Steps reported in the statistics table, in table order. Steps not listed
/// here never get a row even if they appear in the logs.
pub const STEP_ORDER: &[&str] = &[
    "GEN_STANDARD",
    "GEN_PHI",
    "DPS_MIX",
    "SIM",
    "DIGI",
    "RECO",
    "MINIAOD",
];

/// Default report file name, written inside the scanned log directory.
pub const DEFAULT_REPORT_FILE_NAME: &str = "production_summary.txt";

// =============================================================================
// Job manifest
// =============================================================================

/// Remote storage prefix for bare `/eos/...` paths.
pub const EOS_HOST_PREFIX: &str = "root://eosuser.cern.ch";

/// Absolute path prefix that gets `EOS_HOST_PREFIX` prepended.
pub const EOS_PATH_PREFIX: &str = "/eos/";

/// Base URI for relative list entries and range-generated file names.
pub const DEFAULT_EOS_BASE: &str =
    "root://eosuser.cern.ch//eos/user/x/xcheng/learn_MC/SPS-Jpsi_blocks";

/// Remote schemes passed through unchanged.
pub const REMOTE_URI_SCHEMES: &[&str] = &["root://", "srm://"];

/// Local-file scheme passed through unchanged.
pub const LOCAL_URI_SCHEME: &str = "file:";

/// Prefix marking a comment line in an LHE list file.
pub const LIST_COMMENT_PREFIX: &str = "#";

/// Matches the 5-digit block number at the end of a resolved LHE URI.
pub const BLOCK_FILE_PATTERN: &str = r"MC_Jpsi_block_(\d{5})\.lhe$";

/// Prefix applied to every manifest label.
pub const BLOCK_LABEL_PREFIX: &str = "block_";

/// Default stride for range mode.
pub const DEFAULT_RANGE_STEP: i64 = 10;

/// Default manifest path, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "config/lhe_jobs.txt";

// =============================================================================
// Logging and configuration
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
