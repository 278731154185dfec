//! Client-side filtering over the fetched record set.
//!
//! The browser never queries the store beyond read-all; everything below is
//! a pure, synchronous pass over the in-memory list, cheap enough to
//! re-evaluate on every keystroke or selection change.

use chrono::{DateTime, Utc};

use crate::record::AttendanceRecord;

/// Which slice of the record set the browser is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Every fetched record.
    #[default]
    All,
    /// Only records whose `date` equals today's date string.
    Today,
}

/// Conjunctive predicate set applied to the fetched records.
///
/// The text and date predicates mirror the dashboard controls; when the
/// scope is [`Scope::Today`] the today predicate replaces the date
/// predicate rather than stacking on top of it.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against name or username.
    pub search: String,
    /// Exact-match date string; ignored when `None` or when scope is Today.
    pub date: Option<String>,
    /// Record scope.
    pub scope: Scope,
}

impl RecordFilter {
    /// A filter that passes everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the exact-date predicate.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Restrict to today's records.
    #[must_use]
    pub fn today_only(mut self) -> Self {
        self.scope = Scope::Today;
        self
    }

    /// Whether `record` passes every applicable predicate.
    #[must_use]
    pub fn matches(&self, record: &AttendanceRecord, today: &str) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || record.employee_name.to_lowercase().contains(&needle)
            || record.username.to_lowercase().contains(&needle);
        if !matches_search {
            return false;
        }

        match self.scope {
            Scope::Today => record.date == today,
            Scope::All => self
                .date
                .as_deref()
                .map_or(true, |date| record.date == date),
        }
    }

    /// Apply the filter, preserving the input order (no pagination; the
    /// whole filtered set renders at once).
    #[must_use]
    pub fn apply<'a>(
        &self,
        records: &'a [AttendanceRecord],
        today: &str,
    ) -> Vec<&'a AttendanceRecord> {
        records
            .iter()
            .filter(|record| self.matches(record, today))
            .collect()
    }
}

/// Dashboard summary statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Records whose `date` equals today's date string.
    pub today_count: usize,
    /// All fetched records.
    pub total_count: usize,
    /// Newest record timestamp, `None` when the set is empty.
    pub last_update: Option<DateTime<Utc>>,
}

/// Compute the dashboard statistics for a fetched record set.
///
/// `last_update` is the maximum timestamp regardless of the fetch order,
/// so a descending-ordered set does not report its oldest record here.
#[must_use]
pub fn summarize(records: &[AttendanceRecord], today: &str) -> Summary {
    Summary {
        today_count: records.iter().filter(|r| r.date == today).count(),
        total_count: records.len(),
        last_update: records.iter().map(|r| r.timestamp).max(),
    }
}
