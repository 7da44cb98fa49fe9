// LogAnalyzer - core/export.rs
//
// CSV and JSON export of finished reports.
// Core layer: writes to any Write trait object; the caller owns the file.

use crate::core::model::{Granularity, ReportRow};
use crate::core::report::SummaryReport;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format of an export, picked from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` (any case) selects JSON; everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Rows plus the denominator they were computed against.
#[derive(Debug, Serialize)]
struct RowsDocument<'a> {
    report: &'static str,
    total: u64,
    rows: &'a [ReportRow],
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    // Fields are pre-formatted (message quoting, percent sign), so the
    // writer must not add quoting of its own.
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer)
}

fn csv_error(path: &Path) -> impl Fn(csv::Error) -> ExportError + '_ {
    move |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn finish<W: Write>(mut writer: csv::Writer<W>, path: &Path) -> Result<(), ExportError> {
    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn pct(row: &ReportRow) -> String {
    format!("{:.2}%", row.percentage)
}

/// Level statistics: `Level,Count,Percentage`.
pub fn export_level_csv<W: Write>(
    rows: &[ReportRow],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv_writer(writer);
    csv_writer
        .write_record(["Level", "Count", "Percentage"])
        .map_err(csv_error(export_path))?;
    for row in rows {
        let count = row.count.to_string();
        let percentage = pct(row);
        csv_writer
            .write_record([row.key.as_str(), count.as_str(), percentage.as_str()])
            .map_err(csv_error(export_path))?;
    }
    finish(csv_writer, export_path)?;
    Ok(rows.len())
}

/// Time statistics: `<Hour|Date>,Count`, rows already in chronological order.
pub fn export_time_csv<W: Write>(
    rows: &[ReportRow],
    granularity: Granularity,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv_writer(writer);
    csv_writer
        .write_record([granularity.label(), "Count"])
        .map_err(csv_error(export_path))?;
    for row in rows {
        let count = row.count.to_string();
        csv_writer
            .write_record([row.key.as_str(), count.as_str()])
            .map_err(csv_error(export_path))?;
    }
    finish(csv_writer, export_path)?;
    Ok(rows.len())
}

/// Top messages: `"<message>",Count,Percentage`. Commas inside the message
/// become semicolons and the message is always quoted. Embedded quotes are
/// written as-is.
pub fn export_messages_csv<W: Write>(
    rows: &[ReportRow],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv_writer(writer);
    csv_writer
        .write_record(["Message", "Count", "Percentage"])
        .map_err(csv_error(export_path))?;
    for row in rows {
        let message = format!("\"{}\"", row.key.replace(',', ";"));
        let count = row.count.to_string();
        let percentage = pct(row);
        csv_writer
            .write_record([message.as_str(), count.as_str(), percentage.as_str()])
            .map_err(csv_error(export_path))?;
    }
    finish(csv_writer, export_path)?;
    Ok(rows.len())
}

/// Any row-based report as a JSON document.
pub fn export_rows_json<W: Write>(
    report: &'static str,
    rows: &[ReportRow],
    total: u64,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let document = RowsDocument {
        report,
        total,
        rows,
    };
    serde_json::to_writer_pretty(writer, &document).map_err(|e| ExportError::Json {
        path: PathBuf::from(export_path),
        source: e,
    })?;
    Ok(rows.len())
}

/// The summary report as a JSON document.
pub fn export_summary_json<W: Write>(
    summary: &SummaryReport,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, summary).map_err(|e| ExportError::Json {
        path: PathBuf::from(export_path),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, count: u64, percentage: f64) -> ReportRow {
        ReportRow {
            key: key.to_string(),
            count,
            percentage,
        }
    }

    fn out_path() -> PathBuf {
        PathBuf::from("out.csv")
    }

    #[test]
    fn test_level_csv() {
        let rows = vec![row("ERROR", 2, 200.0 / 3.0), row("INFO", 1, 100.0 / 3.0)];
        let mut buf = Vec::new();
        let count = export_level_csv(&rows, &mut buf, &out_path()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Level,Count,Percentage\nERROR,2,66.67%\nINFO,1,33.33%\n"
        );
    }

    #[test]
    fn test_time_csv_header_follows_granularity() {
        let rows = vec![row("2024-01-01 10:00", 2, 0.0)];
        let mut buf = Vec::new();
        export_time_csv(&rows, Granularity::Hourly, &mut buf, &out_path()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Hour,Count\n2024-01-01 10:00,2\n"
        );
    }

    #[test]
    fn test_messages_csv_replaces_commas() {
        let rows = vec![row("disk full, retrying", 3, 75.0)];
        let mut buf = Vec::new();
        export_messages_csv(&rows, &mut buf, &out_path()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Message,Count,Percentage\n\"disk full; retrying\",3,75.00%\n"
        );
    }

    #[test]
    fn test_messages_csv_leaves_embedded_quotes_alone() {
        let rows = vec![row("user \"bob\" denied, retry", 1, 100.0)];
        let mut buf = Vec::new();
        export_messages_csv(&rows, &mut buf, &out_path()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Message,Count,Percentage\n\"user \"bob\" denied; retry\",1,100.00%\n"
        );
    }

    #[test]
    fn test_rows_json() {
        let rows = vec![row("failure X", 2, 100.0)];
        let mut buf = Vec::new();
        export_rows_json("top", &rows, 2, &mut buf, &PathBuf::from("out.json")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["report"], "top");
        assert_eq!(value["total"], 2);
        assert_eq!(value["rows"][0]["key"], "failure X");
        assert_eq!(value["rows"][0]["count"], 2);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("a.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), ExportFormat::Csv);
    }
}
