// LogAnalyzer - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Building the invocation and mapping its outcome to an exit code

use chrono::NaiveDate;
use clap::{ArgGroup, Parser};
use loganalyzer::app::invocation::{Invocation, ReportRequest};
use loganalyzer::platform::config::{self, AppConfig, PlatformPaths};
use loganalyzer::util::{self, error::Result};
use std::io::{self, Write};
use std::path::PathBuf;

/// Analyse a log file: count lines, filter by level, date, text or regex,
/// and report level, time, message and summary statistics.
#[derive(Parser, Debug)]
#[command(name = "loganalyzer", version, about)]
#[command(group(
    ArgGroup::new("report")
        .args(["stats", "time_stats", "top", "summary"])
        .multiple(false)
))]
struct Cli {
    /// Path to the log file to analyse.
    log_file: PathBuf,

    /// Display total line count.
    #[arg(short = 'c', long = "count")]
    count: bool,

    /// Filter by log level (ERROR, WARN, INFO, DEBUG, TRACE, FATAL).
    #[arg(short = 'l', long = "level")]
    level: Option<String>,

    /// Keep lines containing this text (case-insensitive).
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Keep lines matching this regex (case-insensitive).
    #[arg(short = 'r', long = "regex")]
    regex: Option<String>,

    /// Keep lines dated on or after this day.
    #[arg(long = "from", value_name = "YYYY-MM-DD")]
    from: Option<NaiveDate>,

    /// Keep lines dated on or before this day.
    #[arg(long = "to", value_name = "YYYY-MM-DD")]
    to: Option<NaiveDate>,

    /// Show log level statistics.
    #[arg(long = "stats")]
    stats: bool,

    /// Show counts per time period (hourly or daily).
    #[arg(long = "time-stats", value_name = "hourly|daily")]
    time_stats: Option<String>,

    /// Show the N most frequent messages.
    #[arg(long = "top", value_name = "N", allow_negative_numbers = true)]
    top: Option<i64>,

    /// Show a summary report.
    #[arg(long = "summary")]
    summary: bool,

    /// Export the selected report to a CSV file (or JSON for a .json path).
    #[arg(short = 'o', long = "export", value_name = "FILE", requires = "report")]
    export: Option<PathBuf>,

    /// Read settings from this config.toml instead of the platform default.
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    fn report(&self) -> Option<ReportRequest> {
        if self.stats {
            Some(ReportRequest::Levels)
        } else if let Some(ref granularity) = self.time_stats {
            Some(ReportRequest::Time(granularity.clone()))
        } else if let Some(n) = self.top {
            Some(ReportRequest::Top(n))
        } else if self.summary {
            Some(ReportRequest::Summary)
        } else {
            None
        }
    }

    /// Resolve the filter configuration once, compiling the regex up front.
    fn into_invocation(self, config: AppConfig) -> Result<Invocation> {
        let report = self.report();
        let mut invocation = Invocation::new(self.log_file);
        invocation.count = self.count;
        invocation.report = report;
        invocation.export = self.export;
        invocation.options = config.report;

        let filter = &mut invocation.filter;
        if let Some(ref level) = self.level {
            filter.set_level(level);
        }
        if let Some(ref search) = self.search {
            filter.set_search(search);
        }
        if let Some(ref pattern) = self.regex {
            filter.set_regex(pattern)?;
        }
        filter.date_from = self.from;
        filter.date_to = self.to;

        Ok(invocation)
    }
}

fn execute(cli: Cli, config: AppConfig) -> Result<()> {
    let invocation = cli.into_invocation(config)?;
    let mut out = io::BufWriter::new(io::stdout().lock());
    invocation.run(&mut out)?;
    out.flush().map_err(|source| util::error::AnalyzerError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "flush",
        source,
    })
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (config, mut warnings) = config::load_config(&config_path);
    if cli.config.is_some() && !config_path.exists() {
        warnings.push(format!(
            "Config file '{}' does not exist. Using defaults.",
            config_path.display()
        ));
    }

    util::logging::init(cli.debug, config.log_level.as_deref());
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    tracing::debug!(
        version = util::constants::APP_VERSION,
        file = %cli.log_file.display(),
        "Starting analysis"
    );

    if let Err(e) = execute(cli, config) {
        tracing::debug!(error = ?e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
