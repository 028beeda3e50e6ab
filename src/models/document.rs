//! Calendar document and date-range models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};

use super::CalendarEvent;

/// The date format accepted for date-range bounds on the command line.
pub const RANGE_DATE_FORMAT: &str = "%m-%d-%Y";

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::parse("01-06-2026", "01-10-2026").unwrap();
/// assert!(range.contains(NaiveDate::from_ymd_opt(2026, 1, 6).unwrap()));
/// assert!(range.contains(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first date in the range (inclusive).
    pub from: NaiveDate,
    /// The last date in the range (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting one whose start is after its end.
    pub fn new(from: NaiveDate, to: NaiveDate) -> ImportResult<Self> {
        if from > to {
            return Err(ImportError::InvalidDateRange {
                message: format!(
                    "start {} is after end {}",
                    from.format(RANGE_DATE_FORMAT),
                    to.format(RANGE_DATE_FORMAT)
                ),
            });
        }
        Ok(Self { from, to })
    }

    /// Parses both bounds using [`RANGE_DATE_FORMAT`] (`MM-DD-YYYY`).
    pub fn parse(from: &str, to: &str) -> ImportResult<Self> {
        let parse_bound = |value: &str| {
            NaiveDate::parse_from_str(value.trim(), RANGE_DATE_FORMAT).map_err(|e| {
                ImportError::InvalidDateRange {
                    message: format!("'{}' is not a MM-DD-YYYY date ({})", value, e),
                }
            })
        };
        Self::new(parse_bound(from)?, parse_bound(to)?)
    }

    /// Checks if a date falls within the range, inclusive of both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// The complete set of events for one run, with its calendar label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDocument {
    /// The calendar name (`X-WR-CALNAME`).
    pub name: String,
    /// The earliest and latest event start dates, if there are any events.
    pub range: Option<(NaiveDate, NaiveDate)>,
    /// The events, in input order.
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    /// Builds a document, deriving the observed range from the events.
    pub fn new(name: impl Into<String>, events: Vec<CalendarEvent>) -> Self {
        let range = observed_range(&events);
        Self {
            name: name.into(),
            range,
            events,
        }
    }

    /// Returns true if the document has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Returns the minimum and maximum event start dates.
pub fn observed_range(events: &[CalendarEvent]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = events.iter().map(|event| event.span.start_date());
    let first = dates.next()?;
    Some(dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    }))
}
