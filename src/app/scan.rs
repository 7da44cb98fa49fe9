// LogAnalyzer - app/scan.rs
//
// The single streaming pass: read each line once, run it through the
// filter, hand survivors on. Nothing is retained between lines except
// what the caller's aggregator keeps.
//
// Read errors are not retried; they abort the pass and propagate.

use crate::core::aggregate::Aggregator;
use crate::core::filter::FilterState;
use crate::platform::fs::read_line_lossy;
use crate::util::constants::DEBUG_MAX_LINE_PREVIEW;
use crate::util::format::truncate_display;
use std::io::{self, BufRead};

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read from the input.
    pub lines_read: u64,
    /// Lines that passed every filter.
    pub lines_matched: u64,
}

/// Count every line in the input, ignoring filters.
pub fn count_lines<R: BufRead>(mut reader: R) -> io::Result<u64> {
    let (mut bytes, mut line) = (Vec::new(), String::new());
    let mut count = 0;
    while read_line_lossy(&mut reader, &mut bytes, &mut line)? {
        count += 1;
    }
    Ok(count)
}

/// Run one pass, calling `on_match(line_number, line)` for each line that
/// passes `filter`. Line numbers are 1-based.
pub fn scan<R, F>(mut reader: R, filter: &FilterState, mut on_match: F) -> io::Result<ScanStats>
where
    R: BufRead,
    F: FnMut(u64, &str) -> io::Result<()>,
{
    let (mut bytes, mut line) = (Vec::new(), String::new());
    let mut stats = ScanStats::default();

    while read_line_lossy(&mut reader, &mut bytes, &mut line)? {
        stats.lines_read += 1;
        if !filter.matches(&line) {
            continue;
        }
        stats.lines_matched += 1;
        tracing::trace!(
            line_number = stats.lines_read,
            line = %truncate_display(&line, DEBUG_MAX_LINE_PREVIEW),
            "Line matched"
        );
        on_match(stats.lines_read, line.as_str())?;
    }

    tracing::debug!(
        lines_read = stats.lines_read,
        lines_matched = stats.lines_matched,
        "Scan complete"
    );
    Ok(stats)
}

/// Run one pass feeding every surviving line into `aggregator`.
pub fn aggregate<R, A>(reader: R, filter: &FilterState, aggregator: &mut A) -> io::Result<ScanStats>
where
    R: BufRead,
    A: Aggregator + ?Sized,
{
    scan(reader, filter, |_, line| {
        aggregator.accept(line);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::LevelCounter;
    use std::io::Cursor;

    const LOG: &str = "2024-01-01 10:00:00 INFO start\n\
                       2024-01-01 10:05:00 ERROR failure X\n\
                       2024-01-02 09:00:00 ERROR failure X\n";

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(Cursor::new(LOG)).unwrap(), 3);
        assert_eq!(count_lines(Cursor::new("")).unwrap(), 0);
        assert_eq!(count_lines(Cursor::new("no newline")).unwrap(), 1);
    }

    #[test]
    fn test_scan_reports_line_numbers() {
        let mut filter = FilterState::default();
        filter.set_search("failure");
        let mut seen = Vec::new();
        let stats = scan(Cursor::new(LOG), &filter, |n, line| {
            seen.push((n, line.to_string()));
            Ok(())
        })
        .unwrap();
        assert_eq!(stats, ScanStats { lines_read: 3, lines_matched: 2 });
        assert_eq!(seen[0].0, 2);
        assert_eq!(seen[1].0, 3);
    }

    #[test]
    fn test_aggregate_feeds_only_matches() {
        let mut filter = FilterState::default();
        filter.set_level("info");
        let mut counter = LevelCounter::new();
        aggregate(Cursor::new(LOG), &filter, &mut counter).unwrap();
        assert_eq!(counter.counts().total(), 1);
        assert_eq!(counter.counts().get("INFO"), 1);
    }

    #[test]
    fn test_sink_errors_abort_the_pass() {
        let result = scan(Cursor::new(LOG), &FilterState::default(), |_, _| {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        });
        assert!(result.is_err());
    }
}
