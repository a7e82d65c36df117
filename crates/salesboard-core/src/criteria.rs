//! Filter criteria types.
//!
//! A `FilterCriteria` is an immutable request object. The presentation layer
//! rebuilds one on every input event and passes it to `filter`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Label the presentation layer uses for "no status constraint".
pub const ALL_STATUSES: &str = "All";

/// Categorical constraint on a collection's status field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Any status.
    #[default]
    All,
    /// Exactly this status (case-sensitive equality, not substring).
    Only(String),
}

impl StatusFilter {
    /// Parse a dropdown label. `"All"` removes the constraint.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_STATUSES {
            StatusFilter::All
        } else {
            StatusFilter::Only(label.to_string())
        }
    }

    /// Check whether a record's status value passes this constraint.
    pub fn admits(&self, status: Option<&str>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Some(wanted.as_str()),
        }
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvalidDateRange(format!(
                "{} is after {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> Result<Self, QueryError> {
        let parse = |raw: &str| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| QueryError::InvalidDateRange(format!("'{}': {}", raw, e)))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// Check a raw timestamp field. Only the leading `YYYY-MM-DD` is read;
    /// values that do not start with a date never match.
    pub fn contains(&self, raw: &str) -> bool {
        raw.get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
            .is_some_and(|day| self.start <= day && day <= self.end)
    }
}

/// Active filter state for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text term; empty matches everything.
    #[serde(default)]
    pub term: String,

    /// Status constraint.
    #[serde(default)]
    pub status: StatusFilter,

    /// Optional date range over the schema's date field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,

    /// Admit only records the schema marks active.
    #[serde(default)]
    pub active_only: bool,
}

impl FilterCriteria {
    /// Criteria that admit every record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_dates(mut self, dates: DateRange) -> Self {
        self.dates = Some(dates);
        self
    }

    pub fn with_active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// True when no constraint is active and `filter` is the identity.
    pub fn is_unrestricted(&self) -> bool {
        self.term.is_empty()
            && self.status == StatusFilter::All
            && self.dates.is_none()
            && !self.active_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_label() {
        assert_eq!(StatusFilter::from_label("All"), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_label("Delivered"),
            StatusFilter::Only("Delivered".to_string())
        );
    }

    #[test]
    fn test_status_exact_match() {
        let filter = StatusFilter::Only("Process".to_string());
        assert!(!filter.admits(Some("Processing")));
        assert!(!filter.admits(Some("process")));
        assert!(filter.admits(Some("Process")));
        assert!(!filter.admits(None));
        assert!(StatusFilter::All.admits(None));
    }

    #[test]
    fn test_date_range_rejects_reversed_bounds() {
        let result = DateRange::parse("2025-07-10", "2025-07-01");
        assert!(matches!(result, Err(QueryError::InvalidDateRange(_))));
        assert!(DateRange::parse("2025-7-x", "2025-07-01").is_err());
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let range = DateRange::parse("2025-07-01", "2025-07-10").unwrap();
        assert!(range.contains("2025-07-01"));
        assert!(range.contains("2025-07-10T16:45:00"));
        assert!(!range.contains("2025-07-11 09:00"));
        assert!(!range.contains("yesterday"));
        assert!(!range.contains(""));
    }

    #[test]
    fn test_criteria_unrestricted() {
        assert!(FilterCriteria::new().is_unrestricted());
        assert!(!FilterCriteria::new().with_term("pepsi").is_unrestricted());
        assert!(!FilterCriteria::new()
            .with_status(StatusFilter::from_label("Pending"))
            .is_unrestricted());
        assert!(!FilterCriteria::new().with_active_only().is_unrestricted());
    }
}
