// LogAnalyzer - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows) and Library (macOS) compliance.

use crate::core::report::ReportOptions;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for analyser configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/loganalyzer/).
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[report]` section.
    pub report: ReportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Busiest dates listed in the summary.
    pub summary_top_dates: Option<usize>,
    /// Most frequent messages listed in the summary.
    pub summary_top_messages: Option<usize>,
    /// Display width of messages in the top-N report.
    pub top_message_width: Option<usize>,
    /// Display width of messages in the summary.
    pub summary_message_width: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Renderer settings.
    pub report: ReportOptions,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Validate an optional value against an inclusive range, recording a
/// warning and keeping `target` unchanged when it is out of range.
fn apply_in_range(
    field: &str,
    value: Option<usize>,
    range: std::ops::RangeInclusive<usize>,
    target: &mut usize,
    warnings: &mut Vec<String>,
) {
    let Some(value) = value else {
        return;
    };
    if range.contains(&value) {
        *target = value;
    } else {
        let err = ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("{}-{}", range.start(), range.end()),
        };
        warnings.push(format!("{err}. Using default ({}).", *target));
    }
}

/// Load and validate config.toml at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings.
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::debug!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();
    let top_range = constants::MIN_SUMMARY_TOP..=constants::MAX_SUMMARY_TOP;
    let width_range = constants::MIN_MESSAGE_WIDTH..=constants::MAX_MESSAGE_WIDTH;

    apply_in_range(
        "[report] summary_top_dates",
        raw.report.summary_top_dates,
        top_range.clone(),
        &mut config.report.summary_top_dates,
        &mut warnings,
    );
    apply_in_range(
        "[report] summary_top_messages",
        raw.report.summary_top_messages,
        top_range,
        &mut config.report.summary_top_messages,
        &mut warnings,
    );
    apply_in_range(
        "[report] top_message_width",
        raw.report.top_message_width,
        width_range.clone(),
        &mut config.report.top_message_width,
        &mut warnings,
    );
    apply_in_range(
        "[report] summary_message_width",
        raw.report.summary_message_width,
        width_range,
        &mut config.report.summary_message_width,
        &mut warnings,
    );

    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL
            ));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("absent.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config.report, ReportOptions::default());
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_valid_values_are_applied() {
        let (_dir, path) = write_config(
            "[report]\nsummary_top_dates = 3\ntop_message_width = 80\n\
             [logging]\nlevel = \"DEBUG\"\n",
        );
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.report.summary_top_dates, 3);
        assert_eq!(config.report.top_message_width, 80);
        assert_eq!(config.report.summary_top_messages, 5);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_fall_back() {
        let (_dir, path) =
            write_config("[report]\nsummary_top_messages = 0\nsummary_message_width = 9999\n");
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("summary_top_messages"));
        assert_eq!(config.report, ReportOptions::default());
    }

    #[test]
    fn test_unknown_log_level_warns() {
        let (_dir, path) = write_config("[logging]\nlevel = \"loud\"\n");
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_unparseable_file_warns_and_uses_defaults() {
        let (_dir, path) = write_config("[report\nbroken");
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
        assert_eq!(config.report, ReportOptions::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (_dir, path) = write_config("[future]\nknob = true\n");
        let (_, warnings) = load_config(&path);
        assert!(warnings.is_empty());
    }
}
