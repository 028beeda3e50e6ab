//! Destinations for the finished calendar document.
//!
//! A [`CalendarSink`] consumes the whole document. [`FileSink`] writes one
//! `.ics` file; [`ApplicationSink`] replays the events one at a time into a
//! [`CalendarApplication`] such as the directory-backed [`VdirCalendar`].

mod application;
mod file;
mod vdir;

pub use application::ApplicationSink;
pub use file::FileSink;
pub(crate) use file::write_atomic;
pub use vdir::VdirCalendar;

use crate::error::ImportResult;
use crate::models::{CalendarDocument, CalendarEvent, SinkSummary};

/// Something that can receive a finished calendar document.
pub trait CalendarSink {
    /// Delivers the document.
    ///
    /// Returns `Err` only when nothing useful could be delivered. Problems with
    /// individual events are reported in the returned summary.
    fn write(&mut self, document: &CalendarDocument) -> ImportResult<SinkSummary>;
}

/// What happened when an event was offered to a calendar application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The event was stored.
    Created,
    /// The collection already held an event with this UID; nothing changed.
    Duplicate,
}

/// The operations the importer needs from an external calendar application.
///
/// Calls are made sequentially from one thread. Implementations release
/// their resources in [`close`](CalendarApplication::close), which the
/// [`ApplicationSink`] guarantees to call exactly once.
pub trait CalendarApplication {
    /// Finds or creates the named collection.
    fn ensure_calendar(&mut self, name: &str) -> ImportResult<()>;

    /// Removes every event from the named collection, returning how many
    /// were removed.
    fn clear_calendar(&mut self, name: &str) -> ImportResult<usize>;

    /// Adds one event to the named collection.
    fn add_event(&mut self, name: &str, event: &CalendarEvent) -> ImportResult<AddOutcome>;

    /// Releases the application handle.
    fn close(&mut self);
}
