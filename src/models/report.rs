//! Run report models.
//!
//! This module contains the [`RunReport`] type and its associated structures
//! that capture what happened to every row and event during an import.

use serde::Serialize;

use crate::error::ValidationError;

/// An event that was dropped because an earlier row produced the same UID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEvent {
    /// The shared UID.
    pub uid: String,
    /// The row that was dropped.
    pub row: usize,
    /// The row whose event was kept.
    pub first_row: usize,
}

/// One event the calendar application could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkFailure {
    /// The UID of the event, or `None` for collection-level failures.
    pub uid: Option<String>,
    /// The event title, if the failure concerned an event.
    pub title: Option<String>,
    /// A description of the failure.
    pub message: String,
}

/// What a sink did with the document.
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::SinkSummary;
///
/// let summary = SinkSummary::default();
/// assert_eq!(summary.attempted(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SinkSummary {
    /// Where the document or events went (a file path or collection name).
    pub destination: String,
    /// Events written.
    pub created: usize,
    /// Events skipped because the destination already had them.
    pub duplicates: usize,
    /// Events removed from the collection before importing.
    pub cleared: usize,
    /// Failures that did not abort the run.
    pub failures: Vec<SinkFailure>,
}

impl SinkSummary {
    /// The number of events the sink tried to deliver.
    pub fn attempted(&self) -> usize {
        self.created
            + self.duplicates
            + self
                .failures
                .iter()
                .filter(|failure| failure.uid.is_some())
                .count()
    }
}

/// The outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Non-blank data rows read from the input.
    pub rows_read: usize,
    /// Rows that failed validation.
    pub row_errors: Vec<ValidationError>,
    /// Valid rows dropped because they were not approved.
    pub excluded_by_status: usize,
    /// Approved rows dropped because they started outside the date range.
    pub excluded_by_range: usize,
    /// Events dropped as duplicates of an earlier row.
    pub duplicates: Vec<DuplicateEvent>,
    /// Events placed in the calendar document.
    pub events: usize,
    /// The calendar name used.
    pub calendar_name: String,
    /// The sink result, once the document has been delivered.
    pub sink: Option<SinkSummary>,
}

impl RunReport {
    /// Rows that did not become events, for any reason.
    pub fn skipped(&self) -> usize {
        self.row_errors.len()
            + self.excluded_by_status
            + self.excluded_by_range
            + self.duplicates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;

    #[test]
    fn test_skipped_counts_every_exclusion() {
        let report = RunReport {
            rows_read: 10,
            row_errors: vec![ValidationError {
                row: 3,
                field: "employee".to_string(),
                reason: ValidationReason::MissingField,
                message: "required".to_string(),
            }],
            excluded_by_status: 2,
            excluded_by_range: 1,
            duplicates: vec![DuplicateEvent {
                uid: "x@timeoff".to_string(),
                row: 9,
                first_row: 4,
            }],
            events: 5,
            calendar_name: "Employee Time Off".to_string(),
            sink: None,
        };
        assert_eq!(report.skipped(), 5);
        assert_eq!(report.skipped() + report.events, report.rows_read);
    }

    #[test]
    fn test_attempted_ignores_collection_failures() {
        let summary = SinkSummary {
            destination: "Employee Time Off".to_string(),
            created: 3,
            duplicates: 1,
            cleared: 0,
            failures: vec![
                SinkFailure {
                    uid: None,
                    title: None,
                    message: "clear failed".to_string(),
                },
                SinkFailure {
                    uid: Some("a@timeoff".to_string()),
                    title: Some("Alice".to_string()),
                    message: "disk full".to_string(),
                },
            ],
        };
        assert_eq!(summary.attempted(), 5);
    }

    #[test]
    fn test_report_serialization() {
        let report = RunReport {
            rows_read: 1,
            events: 1,
            calendar_name: "Team".to_string(),
            ..RunReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows_read"], 1);
        assert_eq!(json["calendar_name"], "Team");
        assert!(json["sink"].is_null());
    }
}
