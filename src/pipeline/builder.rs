//! Event construction functionality.
//!
//! This module combines a request's span and text into a [`CalendarEvent`]
//! with a deterministic UID, dropping events whose UID repeats an earlier one.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{ImportError, ValidationError, ValidationReason};
use crate::models::{CalendarEvent, DuplicateEvent, TimeOffRequest};

use super::span::SpanCalculator;
use super::title::format_title;

/// Namespace for v5 event UIDs. Changing it changes every UID ever issued.
const EVENT_UID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1d_2c8e_4b7a_5e39_9a41_c0de_7ea5_0ff1);

/// The domain suffix appended to every UID.
pub const UID_DOMAIN: &str = "timeoff";

/// Derives the UID for a request from its employee, start date and reason.
///
/// The same request always yields the same UID, so re-importing a sheet
/// produces the same identifiers.
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::{RequestStatus, TimeOffRequest};
/// use timeoff_calendar::pipeline::event_uid;
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
///     policy: String::new(),
///     start_time: None,
/// };
///
/// let uid = event_uid(&request);
/// assert!(uid.ends_with("@timeoff"));
/// assert_eq!(uid, event_uid(&request.clone()));
/// ```
pub fn event_uid(request: &TimeOffRequest) -> String {
    let key = format!(
        "{}\u{1f}{}\u{1f}{}",
        request.employee,
        request.start_date.format("%Y-%m-%d"),
        request.reason
    );
    let id = Uuid::new_v5(&EVENT_UID_NAMESPACE, key.as_bytes());
    format!("{}@{}", id, UID_DOMAIN)
}

/// The events built from the filtered requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Events in request order.
    pub events: Vec<CalendarEvent>,
    /// Requests whose UID repeated an earlier event.
    pub duplicates: Vec<DuplicateEvent>,
    /// Requests whose duration could not be turned into a span.
    pub errors: Vec<ValidationError>,
}

/// Builds one event per request.
///
/// A span failure affects only its own row and is reported as a
/// `BadDuration` validation error. The first request to produce a UID wins;
/// later ones are reported as duplicates.
pub fn build_events(
    requests: &[TimeOffRequest],
    calculator: &SpanCalculator,
    verbose: bool,
) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for request in requests {
        let span = match calculator.span(request) {
            Ok(span) => span,
            Err(error) => {
                let message = match error {
                    ImportError::InvalidDuration { message, .. } => message,
                    other => other.to_string(),
                };
                outcome.errors.push(ValidationError {
                    row: request.row,
                    field: "duration".to_string(),
                    reason: ValidationReason::BadDuration,
                    message,
                });
                continue;
            }
        };

        let uid = event_uid(request);
        if let Some(&first_row) = seen.get(&uid) {
            tracing::warn!(
                row = request.row,
                first_row,
                uid = %uid,
                "Dropping duplicate request"
            );
            outcome.duplicates.push(DuplicateEvent {
                uid,
                row: request.row,
                first_row,
            });
            continue;
        }
        seen.insert(uid.clone(), request.row);

        let text = format_title(request, verbose);
        tracing::debug!(
            row = request.row,
            uid = %uid,
            title = %text.title,
            all_day = span.all_day,
            "Built event"
        );

        outcome.events.push(CalendarEvent {
            uid,
            title: text.title,
            description: text.description,
            span,
            employee: request.employee.clone(),
            source_row: request.row,
        });
    }

    outcome
}
