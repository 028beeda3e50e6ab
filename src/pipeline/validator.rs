//! Record validation functionality.
//!
//! This module turns a [`RawRecord`] read from a spreadsheet into a typed
//! [`TimeOffRequest`], or explains why the row cannot be used.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::config::ImportConfig;
use crate::error::{ValidationError, ValidationReason};
use crate::models::{RawRecord, RawValue, RequestStatus, TimeOffRequest};

/// The unit a duration cell is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationUnit {
    Days,
    Hours,
}

/// Validates raw spreadsheet rows against the configured formats.
///
/// Validation is pure: the same record always produces the same result, and
/// nothing is logged or stored.
///
/// # Example
///
/// ```
/// use timeoff_calendar::models::{RawRecord, RequestStatus};
/// use timeoff_calendar::pipeline::RecordValidator;
///
/// let mut record = RawRecord::empty(2);
/// record.employee = "Alice".into();
/// record.request_date = "01/05/2026".into();
/// record.duration = 3.0.into();
/// record.status = "APPROVED".into();
/// record.reason = "VAC".into();
///
/// let request = RecordValidator::default().validate(&record).unwrap();
/// assert_eq!(request.status, RequestStatus::Approved);
/// assert_eq!(request.policy, "");
/// ```
#[derive(Debug, Clone)]
pub struct RecordValidator {
    date_formats: Vec<String>,
    time_formats: Vec<String>,
    hours_per_day: Decimal,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::from_config(&ImportConfig::default())
    }
}

impl RecordValidator {
    /// Creates a validator with explicit formats and hours-per-day.
    pub fn new(date_formats: Vec<String>, time_formats: Vec<String>, hours_per_day: Decimal) -> Self {
        Self {
            date_formats,
            time_formats,
            hours_per_day,
        }
    }

    /// Creates a validator from the importer configuration.
    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(
            config.requests.date_formats.clone(),
            config.requests.time_formats.clone(),
            config.spans.partial_day.hours_per_day(),
        )
    }

    /// Validates one record.
    ///
    /// Required fields are checked first, in column order, so a row missing
    /// several values reports the first one. Policy, start time and unit are
    /// optional.
    ///
    /// # Errors
    ///
    /// - `MissingField` when employee, date, duration, status or reason is blank
    /// - `BadDate` when the date or start time cannot be parsed
    /// - `BadDuration` when the duration is not a positive number or its unit
    ///   is unknown
    /// - `BadStatus` when the status is not a word
    pub fn validate(&self, record: &RawRecord) -> Result<TimeOffRequest, ValidationError> {
        let required = [
            ("employee", &record.employee),
            ("request date", &record.request_date),
            ("duration", &record.duration),
            ("status", &record.status),
            ("reason", &record.reason),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_blank()) {
            return Err(reject(
                record.row,
                field,
                ValidationReason::MissingField,
                "required value is empty",
            ));
        }

        let employee = display_text(&record.employee).unwrap_or_default();
        let reason = display_text(&record.reason).unwrap_or_default();
        let policy = display_text(&record.policy).unwrap_or_default();

        let start_date = self.parse_date(record.row, &record.request_date)?;
        let duration_days = self.parse_duration(record.row, &record.duration, &record.unit)?;
        let status = parse_status(record.row, &record.status)?;
        let start_time = self.parse_start_time(record.row, &record.start_time)?;

        Ok(TimeOffRequest {
            row: record.row,
            employee,
            start_date,
            duration_days,
            status,
            reason,
            policy,
            start_time,
        })
    }

    fn parse_date(&self, row: usize, value: &RawValue) -> Result<NaiveDate, ValidationError> {
        match value {
            RawValue::Date(date) => Ok(*date),
            RawValue::DateTime(datetime) => Ok(datetime.date()),
            RawValue::Text(_) => {
                let text = value.as_text().unwrap_or_default();
                self.date_formats
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                    .ok_or_else(|| {
                        reject(
                            row,
                            "request date",
                            ValidationReason::BadDate,
                            format!(
                                "'{}' does not match any accepted format ({})",
                                text,
                                self.date_formats.join(", ")
                            ),
                        )
                    })
            }
            other => Err(reject(
                row,
                "request date",
                ValidationReason::BadDate,
                format!("expected a date, found {}", other.kind()),
            )),
        }
    }

    fn parse_duration(
        &self,
        row: usize,
        value: &RawValue,
        unit: &RawValue,
    ) -> Result<Decimal, ValidationError> {
        let bad = |message: String| reject(row, "duration", ValidationReason::BadDuration, message);

        let amount = match value {
            RawValue::Number(number) => Decimal::from_f64(*number)
                .map(|d| d.normalize())
                .ok_or_else(|| bad(format!("{} is not a finite number", number)))?,
            RawValue::Text(_) => {
                let text = value.as_text().unwrap_or_default();
                Decimal::from_str(text)
                    .map(|d| d.normalize())
                    .map_err(|_| bad(format!("'{}' is not a number", text)))?
            }
            other => return Err(bad(format!("expected a number, found {}", other.kind()))),
        };

        if amount <= Decimal::ZERO {
            return Err(bad(format!("{} must be greater than zero", amount)));
        }

        match parse_unit(unit) {
            Some(DurationUnit::Days) => Ok(amount),
            Some(DurationUnit::Hours) => {
                if self.hours_per_day <= Decimal::ZERO {
                    return Err(bad("hours per day must be greater than zero".to_string()));
                }
                Ok(amount / self.hours_per_day)
            }
            None => Err(reject(
                row,
                "unit",
                ValidationReason::BadDuration,
                format!(
                    "unknown duration unit '{}', expected DAYS or HOURS",
                    display_text(unit).unwrap_or_default()
                ),
            )),
        }
    }

    fn parse_start_time(
        &self,
        row: usize,
        value: &RawValue,
    ) -> Result<Option<NaiveTime>, ValidationError> {
        let bad = |message: String| reject(row, "start time", ValidationReason::BadDate, message);

        match value {
            _ if value.is_blank() => Ok(None),
            RawValue::DateTime(datetime) => Ok(Some(datetime.time())),
            RawValue::Number(fraction) if (0.0..1.0).contains(fraction) => {
                let seconds = (fraction * 86_400.0).round() as u32;
                NaiveTime::from_num_seconds_from_midnight_opt(seconds % 86_400, 0)
                    .map(Some)
                    .ok_or_else(|| bad(format!("{} is not a time of day", fraction)))
            }
            RawValue::Text(_) => {
                let text = value.as_text().unwrap_or_default();
                self.time_formats
                    .iter()
                    .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
                    .map(Some)
                    .ok_or_else(|| bad(format!("'{}' is not a recognised time", text)))
            }
            other => Err(bad(format!("expected a time, found {}", other.kind()))),
        }
    }
}

fn parse_unit(unit: &RawValue) -> Option<DurationUnit> {
    if unit.is_blank() {
        return Some(DurationUnit::Days);
    }
    match unit.as_text()?.to_ascii_uppercase().as_str() {
        "DAY" | "DAYS" => Some(DurationUnit::Days),
        "HOUR" | "HOURS" => Some(DurationUnit::Hours),
        _ => None,
    }
}

fn parse_status(row: usize, value: &RawValue) -> Result<RequestStatus, ValidationError> {
    let text = value.as_text().ok_or_else(|| {
        reject(
            row,
            "status",
            ValidationReason::BadStatus,
            format!("expected text, found {}", value.kind()),
        )
    })?;

    if !text.chars().any(char::is_alphabetic) {
        return Err(reject(
            row,
            "status",
            ValidationReason::BadStatus,
            format!("'{}' is not a status word", text),
        ));
    }

    if text.eq_ignore_ascii_case("approved") {
        Ok(RequestStatus::Approved)
    } else {
        Ok(RequestStatus::Other(text.to_string()))
    }
}

/// Renders a free-text cell. Numeric cells are accepted for codes like "401".
fn display_text(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Empty => None,
        RawValue::Text(_) => value.as_text().map(str::to_string),
        RawValue::Number(number) if number.fract() == 0.0 && number.is_finite() => {
            Some(format!("{}", *number as i64))
        }
        RawValue::Number(number) => Some(number.to_string()),
        RawValue::Bool(flag) => Some(flag.to_string()),
        RawValue::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        RawValue::DateTime(datetime) => Some(datetime.format("%Y-%m-%d %H:%M").to_string()),
    }
}

fn reject(
    row: usize,
    field: &str,
    reason: ValidationReason,
    message: impl Into<String>,
) -> ValidationError {
    ValidationError {
        row,
        field: field.to_string(),
        reason,
        message: message.into(),
    }
}
