// LogAnalyzer - core/filter.rs
//
// Composable line filter. All active filters are AND-combined and
// evaluated cheapest-first, stopping at the first rejection.
// Core layer: pure logic, no I/O.

use crate::core::extract;
use crate::util::constants::MAX_REGEX_PATTERN_LENGTH;
use crate::util::error::FilterError;
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};

/// Complete filter state, resolved once per run. All fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Uppercased level keyword that must appear somewhere in the line.
    level: Option<String>,

    /// Start of the date range (inclusive). None = no lower bound.
    pub date_from: Option<NaiveDate>,

    /// End of the date range (inclusive). None = no upper bound.
    pub date_to: Option<NaiveDate>,

    /// Original search text, kept for display.
    search: Option<String>,

    /// Lowercased search text used for matching.
    search_lower: String,

    /// Compiled case-insensitive regex. None = no regex filter.
    regex: Option<Regex>,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.search.is_none()
            && self.regex.is_none()
    }

    /// True when a search or regex filter is active, i.e. the user is
    /// looking for specific text and line numbers are worth showing.
    pub fn is_text_search(&self) -> bool {
        self.search.is_some() || self.regex.is_some()
    }

    /// Require the uppercased `level` to appear in the line.
    pub fn set_level(&mut self, level: &str) {
        self.level = Some(level.to_uppercase());
    }

    /// Require a case-insensitive occurrence of `text`.
    pub fn set_search(&mut self, text: &str) {
        self.search = Some(text.to_string());
        self.search_lower = text.to_lowercase();
    }

    /// Set the regex search pattern, compiling it case-insensitively.
    /// Returns an error if the pattern is invalid.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
            return Err(FilterError::RegexTooLong {
                length: pattern.len(),
                max_length: MAX_REGEX_PATTERN_LENGTH,
            });
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| FilterError::InvalidRegex {
                pattern: pattern.to_string(),
                source: e,
            })?;
        self.regex = Some(regex);
        Ok(())
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn regex(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// Check if a single line passes every active filter.
    pub fn matches(&self, line: &str) -> bool {
        self.matches_date(line)
            && self.matches_level(line)
            && self.matches_search(line)
            && self.matches_regex(line)
    }

    /// Lines without a parseable leading date fail whenever a bound is set.
    fn matches_date(&self, line: &str) -> bool {
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        let Some(date) = extract::extract_calendar_date(line) else {
            return false;
        };
        if matches!(self.date_from, Some(from) if date < from) {
            return false;
        }
        if matches!(self.date_to, Some(to) if date > to) {
            return false;
        }
        true
    }

    fn matches_level(&self, line: &str) -> bool {
        match self.level {
            Some(ref level) => line.contains(level.as_str()),
            None => true,
        }
    }

    fn matches_search(&self, line: &str) -> bool {
        if self.search.is_none() {
            return true;
        }
        line.to_lowercase().contains(&self.search_lower)
    }

    fn matches_regex(&self, line: &str) -> bool {
        match self.regex {
            Some(ref regex) => regex.is_match(line),
            None => true,
        }
    }
}
