// LogAnalyzer - app/invocation.rs
//
// One analyser run: validate the request, check the file, print the header,
// then perform exactly one pass for the selected report or listing.
//
// Usage errors (bad granularity, non-positive top-N, unsupported export)
// are raised before the file is touched.

use crate::app::scan;
use crate::core::aggregate::{LevelCounter, MessageCounter, SummaryCollector, TimeBucketCounter};
use crate::core::export::{self, ExportFormat};
use crate::core::filter::FilterState;
use crate::core::model::{Granularity, ReportRow};
use crate::core::report::{self, ReportOptions, SummaryReport};
use crate::platform::fs;
use crate::util::error::{AnalyzerError, ExportError, ReportError, Result};
use crate::util::format::format_file_size;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The report asked for on the command line, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    /// `--stats`
    Levels,
    /// `--time-stats <hourly|daily>`
    Time(String),
    /// `--top <N>`
    Top(i64),
    /// `--summary`
    Summary,
}

/// A validated report selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Levels,
    Time(Granularity),
    Top(usize),
    Summary,
}

impl ReportRequest {
    fn resolve(&self) -> std::result::Result<Report, ReportError> {
        match self {
            ReportRequest::Levels => Ok(Report::Levels),
            ReportRequest::Time(value) => value.parse().map(Report::Time),
            ReportRequest::Top(n) if *n > 0 => usize::try_from(*n)
                .map(Report::Top)
                .map_err(|_| ReportError::NonPositiveTopN { value: *n }),
            ReportRequest::Top(n) => Err(ReportError::NonPositiveTopN { value: *n }),
            ReportRequest::Summary => Ok(Report::Summary),
        }
    }
}

/// Which row-based report an export carries.
#[derive(Debug, Clone, Copy)]
enum RowsExport {
    Levels,
    Time(Granularity),
    Messages,
}

impl RowsExport {
    fn name(&self) -> &'static str {
        match self {
            RowsExport::Levels => "levels",
            RowsExport::Time(_) => "time",
            RowsExport::Messages => "top_messages",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            RowsExport::Levels => "Statistics",
            RowsExport::Time(_) => "Time statistics",
            RowsExport::Messages => "Top messages",
        }
    }
}

/// Everything one run needs, resolved from the CLI and config.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Log file to analyse.
    pub path: PathBuf,
    /// Print the total line count (`-c`).
    pub count: bool,
    /// Line filters, AND-combined.
    pub filter: FilterState,
    /// Selected report, if any.
    pub report: Option<ReportRequest>,
    /// Export target for the selected report.
    pub export: Option<PathBuf>,
    /// Renderer settings.
    pub options: ReportOptions,
}

impl Invocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            count: false,
            filter: FilterState::default(),
            report: None,
            export: None,
            options: ReportOptions::default(),
        }
    }

    /// Check the report request without reading anything.
    fn validate(&self) -> Result<Option<Report>> {
        let Some(ref request) = self.report else {
            return Ok(None);
        };
        let report = request.resolve()?;
        if let Some(ref path) = self.export {
            if report == Report::Summary && ExportFormat::from_path(path) == ExportFormat::Csv {
                return Err(ReportError::UnsupportedExport {
                    report: "summary",
                    path: path.clone(),
                }
                .into());
            }
        }
        Ok(Some(report))
    }

    /// Perform the run, writing all console output to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let report = self.validate()?;
        let size = fs::check_log_file(&self.path)?;

        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        writeln!(out, "Analyzing: {name}").map_err(output_error)?;
        writeln!(out, "File size: {}", format_file_size(size)).map_err(output_error)?;

        if self.count {
            let lines = scan::count_lines(self.open()?).map_err(|e| self.read_error(e))?;
            writeln!(out, "Total lines: {lines}").map_err(output_error)?;
        }

        match report {
            Some(report) => {
                tracing::debug!(?report, path = %self.path.display(), "Running report");
                self.run_report(report, out)
            }
            None if !self.filter.is_empty() => self.run_listing(out),
            None if !self.count => {
                writeln!(
                    out,
                    "No filter or report requested. Run with --help to see the options."
                )
                .map_err(output_error)
            }
            None => Ok(()),
        }
    }

    fn open(&self) -> Result<BufReader<File>> {
        fs::open_log_file(&self.path).map_err(|source| AnalyzerError::Io {
            path: self.path.clone(),
            operation: "open",
            source,
        })
    }

    fn read_error(&self, source: io::Error) -> AnalyzerError {
        AnalyzerError::Io {
            path: self.path.clone(),
            operation: "read",
            source,
        }
    }

    fn run_report<W: Write>(&self, report: Report, out: &mut W) -> Result<()> {
        let reader = self.open()?;
        match report {
            Report::Levels => {
                let mut counter = LevelCounter::new();
                scan::aggregate(reader, &self.filter, &mut counter)
                    .map_err(|e| self.read_error(e))?;
                report::render_level_report(out, counter.counts()).map_err(output_error)?;
                let counts = counter.counts();
                self.export_rows(
                    RowsExport::Levels,
                    &report::ranked_rows(counts),
                    counts.total(),
                    out,
                )
            }
            Report::Time(granularity) => {
                let mut counter = TimeBucketCounter::new(granularity);
                scan::aggregate(reader, &self.filter, &mut counter)
                    .map_err(|e| self.read_error(e))?;
                report::render_time_report(out, granularity, counter.counts())
                    .map_err(output_error)?;
                let counts = counter.counts();
                self.export_rows(
                    RowsExport::Time(granularity),
                    &report::chronological_rows(counts),
                    counts.total(),
                    out,
                )
            }
            Report::Top(n) => {
                let mut counter = MessageCounter::new();
                scan::aggregate(reader, &self.filter, &mut counter)
                    .map_err(|e| self.read_error(e))?;
                report::render_top_report(out, counter.counts(), n, &self.options)
                    .map_err(output_error)?;
                let counts = counter.counts();
                self.export_rows(
                    RowsExport::Messages,
                    &report::top_rows(counts, n),
                    counts.total(),
                    out,
                )
            }
            Report::Summary => {
                let mut summary = SummaryCollector::new();
                scan::aggregate(reader, &self.filter, &mut summary)
                    .map_err(|e| self.read_error(e))?;
                let built = SummaryReport::build(&summary, &self.options);
                report::render_summary(out, &built, &self.options).map_err(output_error)?;
                self.export_summary(&built, out)
            }
        }
    }

    /// Print the lines that pass the filters, numbered when searching text.
    fn run_listing<W: Write>(&self, out: &mut W) -> Result<()> {
        let filter = &self.filter;
        if let Some(level) = filter.level() {
            writeln!(out, "Filtering by level: {level}").map_err(output_error)?;
        }
        if filter.date_from.is_some() || filter.date_to.is_some() {
            let from = filter.date_from.map_or("start".to_string(), |d| d.to_string());
            let to = filter.date_to.map_or("end".to_string(), |d| d.to_string());
            writeln!(out, "Date range: {from} to {to}").map_err(output_error)?;
        }
        if let Some(search) = filter.search() {
            writeln!(out, "Searching for: '{search}'").map_err(output_error)?;
        }
        if let Some(regex) = filter.regex() {
            writeln!(out, "Matching regex: '{regex}'").map_err(output_error)?;
        }
        writeln!(out, "---").map_err(output_error)?;

        let numbered = filter.is_text_search();
        let stats = scan::scan(self.open()?, filter, |line_number, line| {
            if numbered {
                writeln!(out, "[Line {line_number}] {line}")
            } else {
                writeln!(out, "{line}")
            }
        })
        .map_err(|e| self.read_error(e))?;

        let footer = match filter.search() {
            Some(search) => writeln!(
                out,
                "\n--- Found {} matches for '{search}' ---",
                stats.lines_matched
            ),
            None => writeln!(out, "\n--- Found {} matching lines ---", stats.lines_matched),
        };
        footer.map_err(output_error)
    }

    fn export_rows<W: Write>(
        &self,
        kind: RowsExport,
        rows: &[ReportRow],
        total: u64,
        out: &mut W,
    ) -> Result<()> {
        let Some(ref path) = self.export else {
            return Ok(());
        };
        if total == 0 {
            tracing::warn!(path = %path.display(), "Nothing to export");
            return Ok(());
        }

        let mut writer = create_export_file(path)?;
        let written = match ExportFormat::from_path(path) {
            ExportFormat::Json => {
                export::export_rows_json(kind.name(), rows, total, &mut writer, path)?
            }
            ExportFormat::Csv => match kind {
                RowsExport::Levels => export::export_level_csv(rows, &mut writer, path)?,
                RowsExport::Time(granularity) => {
                    export::export_time_csv(rows, granularity, &mut writer, path)?
                }
                RowsExport::Messages => export::export_messages_csv(rows, &mut writer, path)?,
            },
        };
        flush_export(writer, path)?;

        tracing::info!(path = %path.display(), rows = written, "Export written");
        writeln!(out, "{} exported to: {}", kind.title(), path.display()).map_err(output_error)
    }

    fn export_summary<W: Write>(&self, summary: &SummaryReport, out: &mut W) -> Result<()> {
        let Some(ref path) = self.export else {
            return Ok(());
        };
        if summary.total == 0 {
            tracing::warn!(path = %path.display(), "Nothing to export");
            return Ok(());
        }

        let mut writer = create_export_file(path)?;
        export::export_summary_json(summary, &mut writer, path)?;
        flush_export(writer, path)?;

        tracing::info!(path = %path.display(), "Summary export written");
        writeln!(out, "Summary exported to: {}", path.display()).map_err(output_error)
    }
}

fn create_export_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn flush_export(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|source| {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn output_error(source: io::Error) -> AnalyzerError {
    AnalyzerError::Io {
        path: PathBuf::from("<output>"),
        operation: "write",
        source,
    }
}
