//! Sink that replays events into a calendar application.

use crate::error::ImportResult;
use crate::models::{CalendarDocument, CalendarEvent, SinkFailure, SinkSummary};

use super::{AddOutcome, CalendarApplication, CalendarSink};

/// Adds events one at a time to a named collection in a calendar application.
///
/// The sink owns the application handle for the whole run and closes it when
/// dropped, whether or not the run succeeded.
///
/// Failing to find or create the collection aborts the write. A failed clear
/// or a rejected event is recorded in the summary and the run continues.
pub struct ApplicationSink<A: CalendarApplication> {
    app: A,
    clear: bool,
}

impl<A: CalendarApplication> ApplicationSink<A> {
    /// Wraps an open application handle. With `clear` set, the collection is
    /// emptied before events are added.
    pub fn new(app: A, clear: bool) -> Self {
        Self { app, clear }
    }

    /// Adds `events` to the collection `name`.
    pub fn write_events(
        &mut self,
        name: &str,
        events: &[CalendarEvent],
        clear: bool,
    ) -> ImportResult<SinkSummary> {
        let mut summary = SinkSummary {
            destination: name.to_string(),
            ..SinkSummary::default()
        };

        self.app.ensure_calendar(name)?;

        if clear {
            match self.app.clear_calendar(name) {
                Ok(removed) => {
                    tracing::info!(calendar = %name, removed, "Cleared calendar");
                    summary.cleared = removed;
                }
                Err(error) => {
                    tracing::warn!(calendar = %name, error = %error, "Failed to clear calendar");
                    summary.failures.push(SinkFailure {
                        uid: None,
                        title: None,
                        message: error.to_string(),
                    });
                }
            }
        }

        for event in events {
            match self.app.add_event(name, event) {
                Ok(AddOutcome::Created) => {
                    tracing::debug!(uid = %event.uid, title = %event.title, "Added event");
                    summary.created += 1;
                }
                Ok(AddOutcome::Duplicate) => {
                    tracing::debug!(uid = %event.uid, "Event already present, skipping");
                    summary.duplicates += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        uid = %event.uid,
                        title = %event.title,
                        error = %error,
                        "Failed to add event"
                    );
                    summary.failures.push(SinkFailure {
                        uid: Some(event.uid.clone()),
                        title: Some(event.title.clone()),
                        message: error.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            calendar = %name,
            created = summary.created,
            duplicates = summary.duplicates,
            failed = summary.failures.len(),
            "Finished adding events"
        );
        Ok(summary)
    }
}

impl<A: CalendarApplication> CalendarSink for ApplicationSink<A> {
    fn write(&mut self, document: &CalendarDocument) -> ImportResult<SinkSummary> {
        let clear = self.clear;
        self.write_events(&document.name, &document.events, clear)
    }
}

impl<A: CalendarApplication> Drop for ApplicationSink<A> {
    fn drop(&mut self) {
        self.app.close();
    }
}
