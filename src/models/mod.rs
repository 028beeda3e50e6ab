//! Core data models for the time-off calendar importer.
//!
//! This module contains the domain models passed between the readers, the
//! transformation pipeline, the serializer and the sinks.

mod document;
mod event;
mod raw_record;
mod report;
mod request;

pub use document::{CalendarDocument, DateRange, RANGE_DATE_FORMAT, observed_range};
pub use event::{CalendarEvent, EventSpan};
pub use raw_record::{RawRecord, RawValue};
pub use report::{DuplicateEvent, RunReport, SinkFailure, SinkSummary};
pub use request::{RequestStatus, TimeOffRequest};
