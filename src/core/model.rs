// LogAnalyzer - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.

use crate::util::error::ReportError;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

// =============================================================================
// Level
// =============================================================================

/// Severity keywords recognised on a raw log line.
///
/// Variant order is the detection priority: when a line contains several
/// keywords, the earliest variant in this list wins regardless of where the
/// keywords sit in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Fatal,
}

impl Level {
    /// All levels in detection priority order.
    pub fn all() -> &'static [Level] {
        &[
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
            Level::Fatal,
        ]
    }

    /// The keyword searched for on a line, which is also the display label.
    pub fn keyword(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
            Level::Fatal => "FATAL",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

// =============================================================================
// Granularity
// =============================================================================

/// Width of a time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// `YYYY-MM-DD HH:00`
    Hourly,
    /// `YYYY-MM-DD`
    Daily,
}

impl Granularity {
    /// Column header used by the time report and its CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Hourly => "Hour",
            Granularity::Daily => "Date",
        }
    }
}

impl FromStr for Granularity {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Granularity::Hourly),
            "daily" => Ok(Granularity::Daily),
            other => Err(ReportError::InvalidGranularity {
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// CountMap
// =============================================================================

/// Occurrence counts keyed by a derived string, with a running total.
///
/// Keys remember the order in which they were first seen; that order is the
/// tie-break for [`CountMap::ranked`].
#[derive(Debug, Clone, Default)]
pub struct CountMap {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
    total: u64,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`, creating it at zero first if unseen.
    /// Returns the key's new count.
    pub fn increment(&mut self, key: &str) -> u64 {
        self.total += 1;
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), 0));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let count = &mut self.entries[slot].1;
        *count += 1;
        *count
    }

    /// Count for `key` (0 when never seen).
    pub fn get(&self, key: &str) -> u64 {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by count descending; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        // sort_by is stable, so insertion order survives among ties.
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }

    /// Entries by key ascending.
    pub fn sorted_by_key(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self
            .entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

// =============================================================================
// Report rows
// =============================================================================

/// One rendered/exported row: a key, its count and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub key: String,
    pub count: u64,
    pub percentage: f64,
}
