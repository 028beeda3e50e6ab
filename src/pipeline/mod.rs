//! The request-to-event transformation pipeline.
//!
//! This module contains every step between a raw spreadsheet row and a
//! calendar event: record validation, status and date-range filtering, span
//! calculation, title formatting, event construction with deterministic UIDs,
//! and calendar naming.

mod builder;
mod calendar_name;
mod filter;
mod span;
mod title;
mod validator;

pub use builder::{BuildOutcome, UID_DOMAIN, build_events, event_uid};
pub use calendar_name::generate_calendar_name;
pub use filter::{FilterOutcome, filter_requests};
pub use span::{SpanCalculator, compute_span};
pub use title::{EventText, format_title};
pub use validator::RecordValidator;
