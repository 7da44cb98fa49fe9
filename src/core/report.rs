// LogAnalyzer - core/report.rs
//
// Report renderers: pure presentation over a finished aggregate.
// Output goes to any `Write` sink so callers choose stdout, a buffer, etc.
// Rendering never mutates aggregate state.

use crate::core::aggregate::SummaryCollector;
use crate::core::model::{CountMap, Granularity, Level, ReportRow};
use crate::util::constants;
use crate::util::format::{percentage, truncate_display};
use serde::Serialize;
use std::io::{self, Write};

const RULE_WIDTH: usize = 40;

/// Display knobs for the renderers, normally taken from config.toml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_message_width: usize,
    pub summary_message_width: usize,
    pub summary_top_dates: usize,
    pub summary_top_messages: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_message_width: constants::DEFAULT_TOP_MESSAGE_WIDTH,
            summary_message_width: constants::DEFAULT_SUMMARY_MESSAGE_WIDTH,
            summary_top_dates: constants::DEFAULT_SUMMARY_TOP_DATES,
            summary_top_messages: constants::DEFAULT_SUMMARY_TOP_MESSAGES,
        }
    }
}

// =============================================================================
// Row builders (shared by renderers and exporters)
// =============================================================================

fn to_rows(entries: Vec<(&str, u64)>, total: u64) -> Vec<ReportRow> {
    entries
        .into_iter()
        .map(|(key, count)| ReportRow {
            key: key.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Rows by count descending (ties in first-seen order).
pub fn ranked_rows(counts: &CountMap) -> Vec<ReportRow> {
    to_rows(counts.ranked(), counts.total())
}

/// Rows by key ascending, which is chronological for bucket keys.
pub fn chronological_rows(counts: &CountMap) -> Vec<ReportRow> {
    to_rows(counts.sorted_by_key(), counts.total())
}

/// The `n` highest-count rows. Percentages use the full total.
pub fn top_rows(counts: &CountMap, n: usize) -> Vec<ReportRow> {
    let mut rows = ranked_rows(counts);
    rows.truncate(n);
    rows
}

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

// =============================================================================
// Level report
// =============================================================================

/// Level distribution, most frequent first.
pub fn render_level_report<W: Write>(out: &mut W, counts: &CountMap) -> io::Result<()> {
    if counts.total() == 0 {
        return writeln!(out, "{}", constants::NO_LOGS_MESSAGE);
    }

    writeln!(out, "=== Log Level Statistics ===")?;
    writeln!(out, "{:<10} {:>10} {:>12}", "Level", "Count", "Percentage")?;
    rule(out)?;
    for row in ranked_rows(counts) {
        writeln!(
            out,
            "{:<10} {:>10} {:>11.2}%",
            row.key, row.count, row.percentage
        )?;
    }
    rule(out)?;
    writeln!(out, "{:<10} {:>10}", "Total", counts.total())
}

// =============================================================================
// Time report
// =============================================================================

/// Counts per time bucket in chronological order.
pub fn render_time_report<W: Write>(
    out: &mut W,
    granularity: Granularity,
    counts: &CountMap,
) -> io::Result<()> {
    if counts.total() == 0 {
        return writeln!(out, "{}", constants::NO_LOGS_MESSAGE);
    }

    let title = match granularity {
        Granularity::Hourly => "Hourly",
        Granularity::Daily => "Daily",
    };
    writeln!(out, "=== {title} Log Statistics ===")?;
    writeln!(
        out,
        "{:<16} {:>10} {:>12}",
        granularity.label(),
        "Count",
        "Percentage"
    )?;
    rule(out)?;
    for row in chronological_rows(counts) {
        writeln!(
            out,
            "{:<16} {:>10} {:>11.2}%",
            row.key, row.count, row.percentage
        )?;
    }
    rule(out)?;
    writeln!(out, "{:<16} {:>10}", "Total", counts.total())
}

// =============================================================================
// Top-N report
// =============================================================================

/// The `n` most frequent messages. Long messages are shortened for display
/// only; the footer reports the whole analysed total, not the row count.
pub fn render_top_report<W: Write>(
    out: &mut W,
    counts: &CountMap,
    n: usize,
    options: &ReportOptions,
) -> io::Result<()> {
    if counts.total() == 0 {
        return writeln!(out, "{}", constants::NO_LOGS_MESSAGE);
    }

    let width = options.top_message_width + constants::ELLIPSIS.len();
    writeln!(out, "=== Top {n} Most Frequent Messages ===")?;
    writeln!(
        out,
        "{:>4}  {:<width$} {:>8} {:>12}",
        "#", "Message", "Count", "Percentage"
    )?;
    rule(out)?;
    for (rank, row) in top_rows(counts, n).iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<width$} {:>8} {:>11.2}%",
            rank + 1,
            truncate_display(&row.key, options.top_message_width),
            row.count,
            row.percentage
        )?;
    }
    rule(out)?;
    writeln!(out, "Total logs analyzed: {}", counts.total())
}

// =============================================================================
// Summary report
// =============================================================================

/// Three-tier reading of the error rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    HighAlert,
    Elevated,
    Normal,
}

impl Health {
    /// `> 20%` is a high alert, `> 10%` is elevated, anything else is normal.
    pub fn classify(error_rate: f64) -> Self {
        if error_rate > constants::HIGH_ERROR_RATE_PCT {
            Health::HighAlert
        } else if error_rate > constants::ELEVATED_ERROR_RATE_PCT {
            Health::Elevated
        } else {
            Health::Normal
        }
    }

    pub fn marker(&self) -> String {
        match self {
            Health::HighAlert => format!(
                "[!!] HIGH ALERT: error rate above {:.0}%",
                constants::HIGH_ERROR_RATE_PCT
            ),
            Health::Elevated => "[!] Elevated error rate".to_string(),
            Health::Normal => "[OK] Error rate normal".to_string(),
        }
    }
}

/// Snapshot of a [`SummaryCollector`], ready to render or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total: u64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub unique_dates: usize,
    pub unique_messages: usize,
    pub levels: Vec<ReportRow>,
    pub busiest_dates: Vec<ReportRow>,
    pub top_messages: Vec<ReportRow>,
    pub error_rate: f64,
    pub warning_rate: f64,
    pub health: Health,
}

impl SummaryReport {
    pub fn build(summary: &SummaryCollector, options: &ReportOptions) -> Self {
        let error_rate = summary.level_rate(Level::Error);
        Self {
            total: summary.total(),
            first_date: summary.first_date().map(str::to_string),
            last_date: summary.last_date().map(str::to_string),
            unique_dates: summary.dates().len(),
            unique_messages: summary.messages().len(),
            levels: ranked_rows(summary.levels()),
            busiest_dates: top_rows(summary.dates(), options.summary_top_dates),
            top_messages: top_rows(summary.messages(), options.summary_top_messages),
            error_rate,
            warning_rate: summary.level_rate(Level::Warn),
            health: Health::classify(error_rate),
        }
    }
}

/// Multi-section overview: totals, levels, busiest dates, frequent
/// messages and health indicators.
pub fn render_summary<W: Write>(
    out: &mut W,
    report: &SummaryReport,
    options: &ReportOptions,
) -> io::Result<()> {
    if report.total == 0 {
        return writeln!(out, "{}", constants::NO_LOGS_MESSAGE);
    }

    writeln!(out, "=== Log Summary Report ===")?;
    writeln!(out)?;

    writeln!(out, "Overview")?;
    rule(out)?;
    writeln!(out, "  Total log entries: {}", report.total)?;
    match (&report.first_date, &report.last_date) {
        (Some(first), Some(last)) => writeln!(out, "  Date range:        {first} to {last}")?,
        _ => writeln!(out, "  Date range:        N/A")?,
    }
    writeln!(out, "  Unique dates:      {}", report.unique_dates)?;
    writeln!(out, "  Unique messages:   {}", report.unique_messages)?;
    writeln!(out)?;

    writeln!(out, "Level Distribution")?;
    rule(out)?;
    if report.levels.is_empty() {
        writeln!(out, "  (no levels detected)")?;
    }
    for row in &report.levels {
        writeln!(
            out,
            "  {:<8} {:>8} {:>9.2}%",
            row.key, row.count, row.percentage
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Top {} Busiest Dates", options.summary_top_dates)?;
    rule(out)?;
    for row in &report.busiest_dates {
        writeln!(out, "  {:<12} {:>8}", row.key, row.count)?;
    }
    writeln!(out)?;

    writeln!(out, "Top {} Most Frequent Messages", options.summary_top_messages)?;
    rule(out)?;
    for (rank, row) in report.top_messages.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} ({})",
            rank + 1,
            truncate_display(&row.key, options.summary_message_width),
            row.count
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Health Indicators")?;
    rule(out)?;
    writeln!(out, "  Error rate:   {:>6.2}%", report.error_rate)?;
    writeln!(out, "  Warning rate: {:>6.2}%", report.warning_rate)?;
    writeln!(out, "  Status: {}", report.health.marker())
}
