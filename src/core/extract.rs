// LogAnalyzer - core/extract.rs
//
// Positional heuristics that derive a level, a date, a time bucket and a
// message body from a raw line. Lines are assumed to look like
//
//     2024-01-01 10:05:00 ERROR failure X
//
// but nothing is parsed structurally: every function is a prefix or
// substring scan, and a line that does not fit simply yields `None`.

use crate::core::model::{Granularity, Level};
use crate::util::constants::{DATE_FORMAT, DATE_PREFIX_LEN, HOUR_BUCKET_SUFFIX, HOUR_PREFIX_LEN};
use chrono::NaiveDate;

/// The first `n` characters of `line`, or `None` if the line is shorter.
pub fn leading_chars(line: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return Some("");
    }
    // Byte offset just past the n-th character.
    let (last, ch) = line.char_indices().nth(n - 1)?;
    Some(&line[..last + ch.len_utf8()])
}

/// First level keyword, in priority order, found anywhere in the line.
pub fn extract_level(line: &str) -> Option<Level> {
    Level::all()
        .iter()
        .copied()
        .find(|level| line.contains(level.keyword()))
}

/// The leading `YYYY-MM-DD` text. Not validated as a calendar date.
pub fn extract_date(line: &str) -> Option<&str> {
    leading_chars(line, DATE_PREFIX_LEN)
}

/// The leading date, parsed. `None` unless the prefix is a real calendar
/// date in `YYYY-MM-DD` form.
pub fn extract_calendar_date(line: &str) -> Option<NaiveDate> {
    extract_date(line).and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
}

/// The time bucket key for `line` at the given granularity.
pub fn extract_time_bucket(line: &str, granularity: Granularity) -> Option<String> {
    match granularity {
        Granularity::Daily => extract_date(line).map(str::to_string),
        Granularity::Hourly => {
            leading_chars(line, HOUR_PREFIX_LEN).map(|hour| format!("{hour}{HOUR_BUCKET_SUFFIX}"))
        }
    }
}

/// Text after the detected level keyword, trimmed.
///
/// The keyword is chosen by [`extract_level`] priority, so for
/// `"INFO retry after ERROR"` the message is the (empty) text after `ERROR`.
pub fn extract_message(line: &str) -> Option<&str> {
    let level = extract_level(line)?;
    let keyword = level.keyword();
    let start = line.find(keyword)? + keyword.len();
    Some(line[start..].trim())
}
