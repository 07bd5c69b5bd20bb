// McProd - platform/config.rs
//
// config.toml resolution, loading, and validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance. Precedence for every setting is:
// CLI flag > config.toml > built-in constant.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Path of the platform default config.toml, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", constants::APP_ID)?;
    let path = dirs.config_dir().join(constants::CONFIG_FILE_NAME);
    tracing::debug!(path = %path.display(), "Platform config path resolved");
    Some(path)
}

// =============================================================================
// Raw config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[manifest]` section.
    pub manifest: ManifestSection,
    /// `[discovery]` section.
    pub discovery: DiscoverySection,
    /// `[report]` section.
    pub report: ReportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[manifest]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ManifestSection {
    /// Base URI for relative LHE entries and range mode.
    pub eos_base: Option<String>,
    /// Manifest destination path.
    pub output: Option<String>,
}

/// `[discovery]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Glob selecting summary logs inside the log directory.
    pub pattern: Option<String>,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Report file name written inside the log directory.
    pub file_name: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated config
// =============================================================================

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub eos_base: String,
    pub manifest_output: PathBuf,
    /// Checked as a glob only at discovery time.
    pub summary_log_glob: String,
    pub report_file_name: String,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            eos_base: constants::DEFAULT_EOS_BASE.to_string(),
            manifest_output: PathBuf::from(constants::DEFAULT_MANIFEST_PATH),
            summary_log_glob: constants::SUMMARY_LOG_GLOB.to_string(),
            report_file_name: constants::DEFAULT_REPORT_FILE_NAME.to_string(),
            log_level: None,
        }
    }
}

/// Load the configuration for a binary.
///
/// An explicit `--config` path must exist and parse; any failure is fatal.
/// The platform default path is optional: a missing file yields defaults, and
/// an unreadable or malformed one yields defaults plus a warning.
pub fn resolve_config(explicit: Option<&Path>) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }

    let Some(path) = default_config_path() else {
        return Ok((AppConfig::default(), Vec::new()));
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return Ok((AppConfig::default(), Vec::new()));
    }

    match load_config_file(&path) {
        Ok(loaded) => Ok(loaded),
        Err(e) => Ok((
            AppConfig::default(),
            vec![format!("{e}. Using defaults.")],
        )),
    }
}

/// Read, parse, and validate a config.toml.
///
/// Returns the validated config and a list of non-fatal warnings for values
/// that were rejected in favour of defaults.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// Validate each field, accumulating warnings for rejected values.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Manifest: eos_base --
    if let Some(base) = raw.manifest.eos_base {
        if base.trim().is_empty() {
            warnings.push(format!(
                "[manifest] eos_base is empty. Using default ({}).",
                constants::DEFAULT_EOS_BASE
            ));
        } else {
            config.eos_base = base.trim().to_string();
        }
    }

    // -- Manifest: output --
    if let Some(output) = raw.manifest.output {
        if output.trim().is_empty() {
            warnings.push(format!(
                "[manifest] output is empty. Using default ({}).",
                constants::DEFAULT_MANIFEST_PATH
            ));
        } else {
            config.manifest_output = PathBuf::from(output.trim());
        }
    }

    // -- Discovery: pattern --
    if let Some(pattern) = raw.discovery.pattern {
        if pattern.trim().is_empty() {
            warnings.push(format!(
                "[discovery] pattern is empty. Using default ({}).",
                constants::SUMMARY_LOG_GLOB
            ));
        } else {
            config.summary_log_glob = pattern.trim().to_string();
        }
    }

    // -- Report: file_name --
    if let Some(name) = raw.report.file_name {
        let name = name.trim();
        if name.is_empty() || name.contains(|c| c == '/' || c == '\\') {
            warnings.push(format!(
                "[report] file_name = \"{name}\" must be a plain file name. Using default ({}).",
                constants::DEFAULT_REPORT_FILE_NAME
            ));
        } else {
            config.report_file_name = name.to_string();
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(text).unwrap())
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_values_applied() {
        let (config, warnings) = parse(
            r#"
            [manifest]
            eos_base = "root://h//eos/blocks"
            output = "out/jobs.txt"

            [discovery]
            pattern = "job_*_summary.txt"

            [report]
            file_name = "summary.txt"

            [logging]
            level = "DEBUG"

            [unknown]
            ignored = true
            "#,
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.eos_base, "root://h//eos/blocks");
        assert_eq!(config.manifest_output, PathBuf::from("out/jobs.txt"));
        assert_eq!(config.summary_log_glob, "job_*_summary.txt");
        assert_eq!(config.report_file_name, "summary.txt");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_with_warnings() {
        let (config, warnings) = parse(
            r#"
            [manifest]
            eos_base = "  "

            [discovery]
            pattern = ""

            [report]
            file_name = "sub/summary.txt"

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = resolve_config(Some(Path::new("/nonexistent/mcprod/config.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_explicit_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[manifest\n").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(ConfigError::TomlParse { .. })
        ));
    }
}
