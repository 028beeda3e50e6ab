//! Configuration types for the importer.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! default, so a partial file only overrides what it names.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The calendar label used when the caller supplies none.
pub const DEFAULT_CALENDAR_NAME: &str = "Employee Time Off";

/// How a fractional day of leave maps onto hours of a timed event.
///
/// # Example
///
/// ```
/// use timeoff_calendar::config::PartialDayMapping;
/// use rust_decimal::Decimal;
///
/// assert_eq!(PartialDayMapping::FractionOfDay.hours_per_day(), Decimal::new(24, 0));
/// let business = PartialDayMapping::BusinessHours { hours: Decimal::new(8, 0) };
/// assert_eq!(business.hours_per_day(), Decimal::new(8, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialDayMapping {
    /// A day is 24 hours: 0.5 days is a 12 hour event.
    #[default]
    FractionOfDay,
    /// A day is one business day of the given length: 0.5 days of an
    /// 8 hour day is a 4 hour event.
    BusinessHours {
        /// Length of the business day in hours.
        hours: Decimal,
    },
}

impl PartialDayMapping {
    /// The number of event hours one day of leave stands for.
    pub fn hours_per_day(&self) -> Decimal {
        match self {
            PartialDayMapping::FractionOfDay => Decimal::new(24, 0),
            PartialDayMapping::BusinessHours { hours } => *hours,
        }
    }
}

/// Settings that shape the generated calendar document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Base calendar name when no override is given.
    pub default_name: String,
    /// The `PRODID` written into documents.
    pub product_id: String,
    /// Optional `X-WR-TIMEZONE` hint for importing applications.
    pub timezone: Option<String>,
    /// The category attached to every event.
    pub category: String,
    /// Output path used by the file sink when none is given.
    pub default_output: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_CALENDAR_NAME.to_string(),
            product_id: "-//Employee Time Off Calendar//EN".to_string(),
            timezone: None,
            category: "Time Off".to_string(),
            default_output: "timeoff_calendar.ics".to_string(),
        }
    }
}

/// Settings for reading request rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    /// Accepted `chrono` formats for text request dates, tried in order.
    pub date_formats: Vec<String>,
    /// Accepted `chrono` formats for text start times, tried in order.
    pub time_formats: Vec<String>,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%m/%d/%Y".to_string(),
                "%Y-%m-%d".to_string(),
                "%m-%d-%Y".to_string(),
            ],
            time_formats: vec![
                "%I:%M %p".to_string(),
                "%H:%M:%S".to_string(),
                "%H:%M".to_string(),
                "%I:%M:%S %p".to_string(),
            ],
        }
    }
}

/// Settings for turning durations into event spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpanSettings {
    /// Where timed (partial-day) events start when the row has no start time.
    ///
    /// Defaults to midnight, so any fraction of a day stays on its start date.
    pub day_start: NaiveTime,
    /// How fractional days map to hours.
    pub partial_day: PartialDayMapping,
}

impl Default for SpanSettings {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::MIN,
            partial_day: PartialDayMapping::default(),
        }
    }
}

/// The complete importer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Calendar document settings.
    pub calendar: CalendarSettings,
    /// Request row settings.
    pub requests: RequestSettings,
    /// Span calculation settings.
    pub spans: SpanSettings,
}
