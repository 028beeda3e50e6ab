//! Validated time-off request model.
//!
//! This module defines the [`TimeOffRequest`] struct and [`RequestStatus`] enum
//! produced by the record validator.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The approval state of a request.
///
/// Only [`RequestStatus::Approved`] requests become calendar events. Every
/// other status word is kept verbatim for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// The request was approved.
    Approved,
    /// Any other status (e.g. "Denied", "Pending").
    Other(String),
}

impl RequestStatus {
    /// Returns true if the request was approved.
    pub fn is_approved(&self) -> bool {
        matches!(self, RequestStatus::Approved)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Approved => write!(f, "Approved"),
            RequestStatus::Other(label) => write!(f, "{}", label),
        }
    }
}

/// A validated time-off request.
///
/// # Examples
///
/// ```
/// use timeoff_calendar::models::{RequestStatus, TimeOffRequest};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = TimeOffRequest {
///     row: 2,
///     employee: "Alice".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     duration_days: Decimal::new(3, 0),
///     status: RequestStatus::Approved,
///     reason: "VAC".to_string(),
///     policy: "Standard".to_string(),
///     start_time: None,
/// };
/// assert!(request.is_approved());
/// assert!(request.is_whole_days());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    /// The spreadsheet row the request came from.
    pub row: usize,
    /// The employee's name.
    pub employee: String,
    /// The first day of leave.
    pub start_date: NaiveDate,
    /// The length of the request in days; always greater than zero.
    pub duration_days: Decimal,
    /// The approval status.
    pub status: RequestStatus,
    /// The reason code.
    pub reason: String,
    /// The leave policy name; empty when the sheet has none.
    pub policy: String,
    /// The start time of a partial-day request, if the sheet gives one.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
}

impl TimeOffRequest {
    /// Returns true if the request was approved.
    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }

    /// Returns true if the duration is a whole number of days.
    pub fn is_whole_days(&self) -> bool {
        self.duration_days.fract().is_zero()
    }
}
