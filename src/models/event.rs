//! Calendar event models.
//!
//! This module defines the [`EventSpan`] computed for each request and the
//! [`CalendarEvent`] handed to the serializer and sinks.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The time occupied by one event.
///
/// `end` is exclusive. All-day spans start and end at midnight, so an all-day
/// span covering 5-7 January ends at midnight on 8 January.
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::EventSpan;
/// use chrono::NaiveDate;
///
/// let span = EventSpan::all_day(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 3);
/// assert_eq!(span.end_date(), NaiveDate::from_ymd_opt(2026, 1, 8).unwrap());
/// assert_eq!(span.days(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpan {
    /// The start of the span.
    pub start: NaiveDateTime,
    /// The exclusive end of the span.
    pub end: NaiveDateTime,
    /// Whether the span is a date-only (all-day) span.
    pub all_day: bool,
}

impl EventSpan {
    /// Creates an all-day span of `days` calendar days starting at `start_date`.
    pub fn all_day(start_date: NaiveDate, days: u32) -> Self {
        let end_date = start_date + chrono::Duration::days(i64::from(days));
        Self {
            start: start_date.and_time(NaiveTime::MIN),
            end: end_date.and_time(NaiveTime::MIN),
            all_day: true,
        }
    }

    /// Creates a timed span.
    pub fn timed(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            all_day: false,
        }
    }

    /// The calendar date the span starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// The calendar date of the exclusive end.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// The length of the span.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// The number of whole calendar days between start and end.
    pub fn days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days()
    }

    /// Returns true if the span ends strictly after it starts.
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }
}

/// One calendar entry derived from one approved request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Stable identifier derived from employee, start date and reason.
    pub uid: String,
    /// The event summary.
    pub title: String,
    /// Reason and policy detail; empty unless verbose output was requested.
    pub description: String,
    /// When the event takes place.
    pub span: EventSpan,
    /// The employee the event belongs to.
    pub employee: String,
    /// The spreadsheet row the event was built from.
    pub source_row: usize,
}
