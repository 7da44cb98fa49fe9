// LogAnalyzer - core/aggregate.rs
//
// Accumulators fed one filtered line at a time during the single pass.
// Each keeps its own state; none reads another's.

use crate::core::extract;
use crate::core::model::{CountMap, Granularity, Level};

/// Something that consumes filtered lines.
pub trait Aggregator {
    /// Fold one line that survived the filters into the state.
    fn accept(&mut self, line: &str);
}

// =============================================================================
// Level counter
// =============================================================================

/// Counts lines per detected level. Lines with no level are not counted.
#[derive(Debug, Default)]
pub struct LevelCounter {
    counts: CountMap,
}

impl LevelCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> &CountMap {
        &self.counts
    }
}

impl Aggregator for LevelCounter {
    fn accept(&mut self, line: &str) {
        if let Some(level) = extract::extract_level(line) {
            self.counts.increment(level.keyword());
        }
    }
}

// =============================================================================
// Time-bucket counter
// =============================================================================

/// Counts lines per hourly or daily bucket. Lines too short for the bucket
/// are not counted.
#[derive(Debug)]
pub struct TimeBucketCounter {
    granularity: Granularity,
    counts: CountMap,
}

impl TimeBucketCounter {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            counts: CountMap::new(),
        }
    }

    pub fn counts(&self) -> &CountMap {
        &self.counts
    }
}

impl Aggregator for TimeBucketCounter {
    fn accept(&mut self, line: &str) {
        if let Some(bucket) = extract::extract_time_bucket(line, self.granularity) {
            self.counts.increment(&bucket);
        }
    }
}

// =============================================================================
// Message counter
// =============================================================================

/// Counts identical message bodies. Lines with no level have no message.
#[derive(Debug, Default)]
pub struct MessageCounter {
    counts: CountMap,
}

impl MessageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> &CountMap {
        &self.counts
    }
}

impl Aggregator for MessageCounter {
    fn accept(&mut self, line: &str) {
        if let Some(message) = extract::extract_message(line) {
            self.counts.increment(message);
        }
    }
}

// =============================================================================
// Summary collector
// =============================================================================

/// Tracks levels, dates and messages at once, plus the overall line total
/// and the earliest and latest leading date.
#[derive(Debug, Default)]
pub struct SummaryCollector {
    total: u64,
    levels: CountMap,
    dates: CountMap,
    messages: CountMap,
    first_date: Option<String>,
    last_date: Option<String>,
}

impl SummaryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line fed to the collector, whether or not a key was extracted.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn levels(&self) -> &CountMap {
        &self.levels
    }

    pub fn dates(&self) -> &CountMap {
        &self.dates
    }

    pub fn messages(&self) -> &CountMap {
        &self.messages
    }

    pub fn first_date(&self) -> Option<&str> {
        self.first_date.as_deref()
    }

    pub fn last_date(&self) -> Option<&str> {
        self.last_date.as_deref()
    }

    /// Share of all analysed lines carrying `level`.
    pub fn level_rate(&self, level: Level) -> f64 {
        crate::util::format::percentage(self.levels.get(level.keyword()), self.total)
    }

    fn observe_date(&mut self, date: &str) {
        // Zero-padded ISO dates sort lexically in chronological order.
        if self.first_date.as_deref().map_or(true, |first| date < first) {
            self.first_date = Some(date.to_string());
        }
        if self.last_date.as_deref().map_or(true, |last| date > last) {
            self.last_date = Some(date.to_string());
        }
    }
}

impl Aggregator for SummaryCollector {
    fn accept(&mut self, line: &str) {
        self.total += 1;
        if let Some(level) = extract::extract_level(line) {
            self.levels.increment(level.keyword());
        }
        // Only real calendar dates feed the date sections.
        if let (Some(date), Some(_)) = (
            extract::extract_date(line),
            extract::extract_calendar_date(line),
        ) {
            self.dates.increment(date);
            self.observe_date(date);
        }
        if let Some(message) = extract::extract_message(line) {
            self.messages.increment(message);
        }
    }
}
