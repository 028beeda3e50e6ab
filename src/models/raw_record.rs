//! Raw spreadsheet rows before validation.
//!
//! This module defines the [`RawRecord`] and [`RawValue`] types produced by the
//! spreadsheet readers and consumed by the record validator.

use chrono::{NaiveDate, NaiveDateTime};

/// A single untyped spreadsheet cell.
///
/// Readers preserve the cell's native type where the file format has one, so
/// the validator can tell a real date cell from text that merely looks like
/// a date.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// No value.
    Empty,
    /// Text content.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A boolean cell.
    Bool(bool),
    /// A date-only cell.
    Date(NaiveDate),
    /// A date-and-time cell.
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// Returns true if the cell is empty or contains only whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeoff_calendar::models::RawValue;
    ///
    /// assert!(RawValue::Empty.is_blank());
    /// assert!(RawValue::Text("   ".to_string()).is_blank());
    /// assert!(!RawValue::Number(0.0).is_blank());
    /// ```
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the trimmed text of a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text.trim()),
            _ => None,
        }
    }

    /// A short name for the cell's kind, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Empty => "empty",
            RawValue::Text(_) => "text",
            RawValue::Number(_) => "number",
            RawValue::Bool(_) => "boolean",
            RawValue::Date(_) => "date",
            RawValue::DateTime(_) => "date-time",
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(text.to_string())
        }
    }
}

impl From<f64> for RawValue {
    fn from(number: f64) -> Self {
        RawValue::Number(number)
    }
}

/// One row of a time-off spreadsheet, exactly as read.
///
/// Cells that are absent from the sheet (for example because the optional
/// column does not exist) are [`RawValue::Empty`].
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::{RawRecord, RawValue};
///
/// let record = RawRecord {
///     row: 2,
///     employee: "Alice".into(),
///     request_date: "01-05-2026".into(),
///     duration: 3.0.into(),
///     status: "Approved".into(),
///     reason: "VAC".into(),
///     policy: "Standard".into(),
///     start_time: RawValue::Empty,
///     unit: RawValue::Empty,
/// };
/// assert!(!record.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// The 1-based spreadsheet row number (the header is row 1).
    pub row: usize,
    /// The employee name.
    pub employee: RawValue,
    /// The first day of the request.
    pub request_date: RawValue,
    /// The length of the request, in days unless `unit` says hours.
    pub duration: RawValue,
    /// The approval status.
    pub status: RawValue,
    /// The reason code (e.g. "VAC", "SICK").
    pub reason: RawValue,
    /// The leave policy name.
    pub policy: RawValue,
    /// Optional start time for partial-day requests.
    pub start_time: RawValue,
    /// Optional duration unit ("DAYS" or "HOURS").
    pub unit: RawValue,
}

impl RawRecord {
    /// Creates a record for the given row with every cell empty.
    pub fn empty(row: usize) -> Self {
        Self {
            row,
            employee: RawValue::Empty,
            request_date: RawValue::Empty,
            duration: RawValue::Empty,
            status: RawValue::Empty,
            reason: RawValue::Empty,
            policy: RawValue::Empty,
            start_time: RawValue::Empty,
            unit: RawValue::Empty,
        }
    }

    /// Returns true if every cell in the row is blank.
    ///
    /// Blank rows are spreadsheet padding and are ignored rather than
    /// reported as validation failures.
    pub fn is_blank(&self) -> bool {
        [
            &self.employee,
            &self.request_date,
            &self.duration,
            &self.status,
            &self.reason,
            &self.policy,
            &self.start_time,
            &self.unit,
        ]
        .iter()
        .all(|value| value.is_blank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_blank() {
        assert!(RawRecord::empty(5).is_blank());
    }

    #[test]
    fn test_record_with_one_value_is_not_blank() {
        let mut record = RawRecord::empty(5);
        record.policy = "Standard".into();
        assert!(!record.is_blank());
    }

    #[test]
    fn test_empty_string_converts_to_empty_value() {
        assert_eq!(RawValue::from(""), RawValue::Empty);
        assert_eq!(RawValue::from("x"), RawValue::Text("x".to_string()));
    }

    #[test]
    fn test_as_text_trims() {
        let value = RawValue::Text("  Approved ".to_string());
        assert_eq!(value.as_text(), Some("Approved"));
        assert_eq!(RawValue::Number(1.0).as_text(), None);
    }
}
