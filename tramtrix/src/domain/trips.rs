//! Per-line departure instants gathered from one trip query.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use super::LineId;

/// An estimated departure (or arrival) of one leg, in UTC.
pub type DepartureInstant = DateTime<Utc>;

/// Estimated departure instants grouped by line.
///
/// Built fresh for every poll and never merged with a previous one. Each
/// line maps to a set, so two legs reporting the same line and the same
/// instant contribute a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripResultSet {
    by_line: HashMap<LineId, BTreeSet<DepartureInstant>>,
}

/// Shared empty set handed out for lines that never appeared.
static NO_INSTANTS: BTreeSet<DepartureInstant> = BTreeSet::new();

impl TripResultSet {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an instant for a line, creating the line's set on first use.
    ///
    /// Returns `false` if the instant was already present for that line.
    pub fn insert(&mut self, line: LineId, instant: DepartureInstant) -> bool {
        self.by_line.entry(line).or_default().insert(instant)
    }

    /// Instants recorded for a line, or an empty set if the line never appeared.
    pub fn instants(&self, line: &LineId) -> &BTreeSet<DepartureInstant> {
        self.by_line.get(line).unwrap_or(&NO_INSTANTS)
    }

    /// Whether any instant was recorded for the line.
    pub fn contains_line(&self, line: &LineId) -> bool {
        self.by_line.contains_key(line)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    /// Whether no line has been recorded.
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}
