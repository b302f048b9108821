// Event module
// Calendar event record spanning whole local days

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::{add_days, days_between};

/// Opaque identifier issued by the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive range of calendar days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err(format!("Range end {} is before start {}", end, start));
        }
        Ok(Self { start, end })
    }

    /// Build a range from its first day and a duration in days (at least 1).
    pub fn from_duration(start: NaiveDate, duration_days: u32) -> Result<Self, String> {
        if duration_days == 0 {
            return Err("Duration must be at least one day".to_string());
        }
        Ok(Self {
            start,
            end: add_days(start, duration_days as i64 - 1),
        })
    }

    /// Range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends.
    pub fn duration_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }

    /// True when the two inclusive ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.end < other.start || self.start > other.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// A persisted all-day event as seen by the calendar board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub range: DateRange,
}

impl EventRecord {
    /// Create a record, validating the title.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use strip_calendar::models::event::{DateRange, EventId, EventRecord};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    /// let record = EventRecord::new(EventId(7), "Offsite", DateRange::single(day)).unwrap();
    /// assert_eq!(record.title, "Offsite");
    /// ```
    pub fn new(id: EventId, title: impl Into<String>, range: DateRange) -> Result<Self, String> {
        let title = validate_title(&title.into())?;
        Ok(Self { id, title, range })
    }
}

/// Trim a user supplied title and reject blank input.
pub fn validate_title(raw: &str) -> Result<String, String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err("Event title cannot be empty".to_string());
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_rejects_reversed_dates() {
        assert!(DateRange::new(date(2024, 1, 5), date(2024, 1, 4)).is_err());
        assert!(DateRange::new(date(2024, 1, 5), date(2024, 1, 5)).is_ok());
    }

    #[test]
    fn test_range_duration_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 2), date(2024, 1, 4)).unwrap();
        assert_eq!(range.duration_days(), 3);
        assert_eq!(DateRange::single(date(2024, 1, 2)).duration_days(), 1);
    }

    #[test]
    fn test_range_from_duration() {
        let range = DateRange::from_duration(date(2024, 1, 30), 3).unwrap();
        assert_eq!(range.end(), date(2024, 2, 1));
        assert!(DateRange::from_duration(date(2024, 1, 30), 0).is_err());
    }

    #[test]
    fn test_range_overlap_is_inclusive() {
        let a = DateRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        let touching = DateRange::new(date(2024, 1, 3), date(2024, 1, 6)).unwrap();
        let after = DateRange::new(date(2024, 1, 4), date(2024, 1, 6)).unwrap();
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&after));
    }

    #[test]
    fn test_record_requires_title() {
        let range = DateRange::single(date(2024, 1, 1));
        assert!(EventRecord::new(EventId(1), "   ", range).is_err());
        let record = EventRecord::new(EventId(1), "  Retro  ", range).unwrap();
        assert_eq!(record.title, "Retro");
    }

    #[test]
    fn test_event_id_serializes_as_number() {
        let json = serde_json::to_string(&EventId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
