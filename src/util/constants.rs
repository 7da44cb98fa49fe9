// LogAnalyzer - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "loganalyzer";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "LogAnalyzer";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Line layout
// =============================================================================

/// Width of the leading `YYYY-MM-DD` date on a log line.
pub const DATE_PREFIX_LEN: usize = 10;

/// Width of the leading `YYYY-MM-DD HH` date-and-hour prefix on a log line.
pub const HOUR_PREFIX_LEN: usize = 13;

/// Suffix appended to an hourly bucket so it reads as `YYYY-MM-DD HH:00`.
pub const HOUR_BUCKET_SUFFIX: &str = ":00";

/// Date format of the leading line prefix and of `--from` / `--to`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Filter limits
// =============================================================================

/// Maximum regex pattern length to prevent ReDoS.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// Report defaults
// =============================================================================

/// Messages longer than this are truncated in the top-N report.
pub const DEFAULT_TOP_MESSAGE_WIDTH: usize = 47;

/// Messages longer than this are truncated in the summary report.
pub const DEFAULT_SUMMARY_MESSAGE_WIDTH: usize = 45;

/// Marker appended to truncated messages.
pub const ELLIPSIS: &str = "...";

/// Number of busiest dates listed by the summary report.
pub const DEFAULT_SUMMARY_TOP_DATES: usize = 5;

/// Number of most frequent messages listed by the summary report.
pub const DEFAULT_SUMMARY_TOP_MESSAGES: usize = 5;

/// Bounds for the configurable summary list lengths.
pub const MIN_SUMMARY_TOP: usize = 1;
pub const MAX_SUMMARY_TOP: usize = 100;

/// Bounds for the configurable message display widths.
pub const MIN_MESSAGE_WIDTH: usize = 10;
pub const MAX_MESSAGE_WIDTH: usize = 500;

/// Error rate (percent) above which the summary raises a high alert.
pub const HIGH_ERROR_RATE_PCT: f64 = 20.0;

/// Error rate (percent) above which the summary flags an elevated rate.
pub const ELEVATED_ERROR_RATE_PCT: f64 = 10.0;

/// Message printed by every statistics report when nothing survived the filters.
pub const NO_LOGS_MESSAGE: &str = "No logs to analyze.";

// =============================================================================
// Logging
// =============================================================================

/// Default diagnostic log level. Kept quiet so stderr only carries problems.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
