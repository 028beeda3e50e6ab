//! Single-file `.ics` sink.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ImportError, ImportResult};
use crate::ical::{SerializeOptions, serialize};
use crate::models::{CalendarDocument, SinkSummary};

use super::CalendarSink;

/// Writes the whole document to one iCalendar file.
///
/// The document is serialized in full before anything touches the disk, and
/// the file is written through a temporary file in the target directory that
/// is then renamed over the target. A failed run leaves no partial file.
///
/// # Example
///
/// ```no_run
/// use timeoff_calendar::ical::SerializeOptions;
/// use timeoff_calendar::models::CalendarDocument;
/// use timeoff_calendar::sink::{CalendarSink, FileSink};
/// use chrono::Utc;
///
/// let mut sink = FileSink::new("timeoff_calendar.ics", SerializeOptions::new(Utc::now()));
/// let summary = sink.write(&CalendarDocument::new("Employee Time Off", vec![]))?;
/// assert_eq!(summary.created, 0);
/// # Ok::<(), timeoff_calendar::error::ImportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    options: SerializeOptions,
}

impl FileSink {
    /// Creates a sink targeting `path`.
    pub fn new(path: impl Into<PathBuf>, options: SerializeOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// The target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalendarSink for FileSink {
    fn write(&mut self, document: &CalendarDocument) -> ImportResult<SinkSummary> {
        let bytes = serialize(document, &self.options)?;
        write_atomic(&self.path, &bytes)?;

        tracing::info!(
            path = %self.path.display(),
            events = document.events.len(),
            bytes = bytes.len(),
            "Wrote calendar file"
        );

        Ok(SinkSummary {
            destination: self.path.display().to_string(),
            created: document.events.len(),
            ..SinkSummary::default()
        })
    }
}

/// Writes `bytes` to `path` through a temporary file in the same directory.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> ImportResult<()> {
    let write_error = |message: String| ImportError::OutputWriteError {
        path: path.display().to_string(),
        message,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !directory.is_dir() {
        return Err(write_error(format!(
            "directory '{}' does not exist",
            directory.display()
        )));
    }

    let mut file = NamedTempFile::new_in(directory).map_err(|e| write_error(e.to_string()))?;
    file.write_all(bytes)
        .map_err(|e| write_error(e.to_string()))?;
    file.flush().map_err(|e| write_error(e.to_string()))?;
    file.persist(path)
        .map_err(|e| write_error(e.error.to_string()))?;

    Ok(())
}
