//! iCalendar (RFC 5545) document serialization.
//!
//! This module turns a [`CalendarDocument`] into the bytes of a `.ics` file.
//! All-day events are written with `VALUE=DATE` and an exclusive end date;
//! partial-day events use floating local date-times.
//!
//! # Example
//!
//! ```
//! use timeoff_calendar::ical::{SerializeOptions, serialize};
//! use timeoff_calendar::models::CalendarDocument;
//! use chrono::Utc;
//!
//! let document = CalendarDocument::new("Employee Time Off", vec![]);
//! let bytes = serialize(&document, &SerializeOptions::new(Utc::now())).unwrap();
//! let text = String::from_utf8(bytes).unwrap();
//! assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
//! assert!(text.ends_with("END:VCALENDAR\r\n"));
//! ```

use chrono::{DateTime, NaiveTime, Utc};
use icalendar::{Calendar, Component, Event, EventLike, EventStatus, Property};

use crate::config::CalendarSettings;
use crate::error::{ImportError, ImportResult};
use crate::models::{CalendarDocument, CalendarEvent};

/// Values that shape the document but do not come from the events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// The `PRODID` value.
    pub product_id: String,
    /// Optional `X-WR-TIMEZONE` value.
    pub timezone: Option<String>,
    /// The `CATEGORIES` value of every event.
    pub category: String,
    /// The `DTSTAMP`/`CREATED` timestamp. This is the only non-deterministic
    /// input to serialization.
    pub generated_at: DateTime<Utc>,
}

impl SerializeOptions {
    /// Creates options with the default calendar settings.
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self::from_settings(&CalendarSettings::default(), generated_at)
    }

    /// Creates options from the calendar settings.
    pub fn from_settings(settings: &CalendarSettings, generated_at: DateTime<Utc>) -> Self {
        Self {
            product_id: settings.product_id.clone(),
            timezone: settings.timezone.clone(),
            category: settings.category.clone(),
            generated_at,
        }
    }
}

/// Serializes a whole document.
///
/// Every event is checked before anything is built, so a bad event yields
/// an error and no partial output.
///
/// # Errors
///
/// Returns `SerializationError` if an event ends at or before its start, or
/// an all-day event is not aligned to midnight.
pub fn serialize(document: &CalendarDocument, options: &SerializeOptions) -> ImportResult<Vec<u8>> {
    write_calendar(&document.name, &document.events, options)
}

/// Serializes one event as a calendar of its own.
///
/// Used by stores that keep each event in a separate file.
pub fn serialize_event(
    event: &CalendarEvent,
    calendar_name: &str,
    options: &SerializeOptions,
) -> ImportResult<Vec<u8>> {
    write_calendar(calendar_name, std::slice::from_ref(event), options)
}

fn write_calendar(
    name: &str,
    events: &[CalendarEvent],
    options: &SerializeOptions,
) -> ImportResult<Vec<u8>> {
    for event in events {
        check_span(event)?;
    }

    // `Calendar::new()` would add its own PRODID.
    let mut calendar = Calendar::empty();
    calendar
        .append_property(Property::new("VERSION", "2.0"))
        .append_property(Property::new("PRODID", options.product_id.as_str()))
        .append_property(Property::new("CALSCALE", "GREGORIAN"))
        .append_property(Property::new("METHOD", "PUBLISH"))
        .name(&single_line(name));
    if let Some(timezone) = &options.timezone {
        calendar.timezone(timezone.as_str());
    }
    calendar.extend(events.iter().map(|event| build_event(event, options)));

    Ok(calendar.to_string().into_bytes())
}

fn build_event(event: &CalendarEvent, options: &SerializeOptions) -> Event {
    let mut vevent = Event::new();
    vevent
        .uid(&event.uid)
        .timestamp(options.generated_at)
        .created(options.generated_at)
        .summary(&normalize_breaks(&event.title))
        .add_property("CATEGORIES", options.category.as_str())
        .add_property("TRANSP", "TRANSPARENT")
        .status(EventStatus::Confirmed);
    if !event.description.is_empty() {
        vevent.description(&normalize_breaks(&event.description));
    }

    let span = &event.span;
    if span.all_day {
        // DTEND stays exclusive, so `all_day()` (start == end) does not fit.
        vevent.starts(span.start.date()).ends(span.end.date());
    } else {
        vevent.starts(span.start).ends(span.end);
    }
    vevent.done()
}

/// TEXT escaping only knows `\n`, so CR and CRLF collapse to LF first.
fn normalize_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

/// Calendar-level names are written unescaped and must stay on one line.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn check_span(event: &CalendarEvent) -> ImportResult<()> {
    let span = &event.span;
    if !span.is_well_formed() {
        return Err(ImportError::SerializationError {
            uid: event.uid.clone(),
            message: format!("event ends at {} which is not after its start {}", span.end, span.start),
        });
    }
    if span.all_day && (span.start.time() != NaiveTime::MIN || span.end.time() != NaiveTime::MIN) {
        return Err(ImportError::SerializationError {
            uid: event.uid.clone(),
            message: "all-day event does not start and end at midnight".to_string(),
        });
    }
    Ok(())
}
