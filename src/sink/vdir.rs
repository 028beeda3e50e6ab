//! Directory-backed calendar store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/
//!   Employee_Time_Off-1a2b3c4d/
//!     displayname          # the collection's full name
//!     <uid>.ics            # one single-event calendar per event
//! ```
//!
//! The directory suffix is a digest of the full collection name, so names
//! that sanitize to the same stem ("Team Leave", "Team_Leave") stay apart.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{ImportError, ImportResult};
use crate::ical::{SerializeOptions, serialize_event};
use crate::models::CalendarEvent;

use super::file::write_atomic;
use super::{AddOutcome, CalendarApplication};

const DISPLAY_NAME_FILE: &str = "displayname";
const EVENT_EXTENSION: &str = "ics";

/// Namespace for collection directory digests.
const COLLECTION_NAMESPACE: Uuid = Uuid::from_u128(0x3b0f_52c6_86d4_4e0b_9a57_c1d2_6f08_a4e3);
const DIGEST_LEN: usize = 8;

/// A calendar application that stores each collection as a directory of
/// `.ics` files, one per event.
///
/// # Example
///
/// ```no_run
/// use timeoff_calendar::ical::SerializeOptions;
/// use timeoff_calendar::sink::{ApplicationSink, VdirCalendar};
/// use chrono::Utc;
///
/// let calendar = VdirCalendar::open("./calendars", SerializeOptions::new(Utc::now()))?;
/// let sink = ApplicationSink::new(calendar, false);
/// # Ok::<(), timeoff_calendar::error::ImportError>(())
/// ```
#[derive(Debug)]
pub struct VdirCalendar {
    root: PathBuf,
    options: SerializeOptions,
    closed: bool,
}

impl VdirCalendar {
    /// Opens the store at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>, options: SerializeOptions) -> ImportResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| ImportError::ApplicationError {
            message: format!("cannot open calendar store '{}': {}", root.display(), e),
        })?;
        tracing::debug!(root = %root.display(), "Opened calendar store");
        Ok(Self {
            root,
            options,
            closed: false,
        })
    }

    /// The directory holding the named collection.
    pub fn collection_path(&self, name: &str) -> PathBuf {
        self.root.join(collection_dir(name))
    }

    fn event_path(&self, name: &str, uid: &str) -> PathBuf {
        self.collection_path(name)
            .join(format!("{}.{}", file_stem(uid, "event"), EVENT_EXTENSION))
    }

    fn check_open(&self) -> ImportResult<()> {
        if self.closed {
            return Err(ImportError::ApplicationError {
                message: "calendar store is closed".to_string(),
            });
        }
        Ok(())
    }
}

impl CalendarApplication for VdirCalendar {
    fn ensure_calendar(&mut self, name: &str) -> ImportResult<()> {
        self.check_open()?;
        let path = self.collection_path(name);
        fs::create_dir_all(&path)
            .and_then(|()| fs::write(path.join(DISPLAY_NAME_FILE), name))
            .map_err(|e| ImportError::ApplicationError {
                message: format!("cannot create collection '{}': {}", path.display(), e),
            })
    }

    fn clear_calendar(&mut self, name: &str) -> ImportResult<usize> {
        self.check_open()?;
        let path = self.collection_path(name);
        let clear_error = |e: std::io::Error| ImportError::ApplicationError {
            message: format!("cannot clear collection '{}': {}", path.display(), e),
        };

        let mut removed = 0;
        for entry in fs::read_dir(&path).map_err(clear_error)? {
            let file = entry.map_err(clear_error)?.path();
            if is_event_file(&file) {
                fs::remove_file(&file).map_err(clear_error)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn add_event(&mut self, name: &str, event: &CalendarEvent) -> ImportResult<AddOutcome> {
        self.check_open()?;
        let path = self.event_path(name, &event.uid);
        if path.exists() {
            return Ok(AddOutcome::Duplicate);
        }

        let bytes = serialize_event(event, name, &self.options)?;
        write_atomic(&path, &bytes).map_err(|e| ImportError::ApplicationError {
            message: e.to_string(),
        })?;
        Ok(AddOutcome::Created)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            tracing::debug!(root = %self.root.display(), "Closed calendar store");
        }
    }
}

fn is_event_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == EVENT_EXTENSION)
}

/// Sanitized stem plus a short digest of the untouched name.
fn collection_dir(name: &str) -> String {
    let digest = Uuid::new_v5(&COLLECTION_NAMESPACE, name.as_bytes())
        .simple()
        .to_string();
    format!("{}-{}", file_stem(name, "calendar"), &digest[..DIGEST_LEN])
}

/// Maps a name to a safe file or directory name.
fn file_stem(name: &str, fallback: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '@' => ch,
            _ => '_',
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        fallback.to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventSpan;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn options() -> SerializeOptions {
        SerializeOptions::new(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
    }

    fn create_test_event(uid: &str) -> CalendarEvent {
        CalendarEvent {
            uid: uid.to_string(),
            title: "Alice".to_string(),
            description: String::new(),
            span: EventSpan::all_day(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 3),
            employee: "Alice".to_string(),
            source_row: 2,
        }
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Employee Time Off", "calendar"), "Employee_Time_Off");
        assert_eq!(
            file_stem("Leave (01/05/2026 - 01/08/2026)", "calendar"),
            "Leave__01_05_2026_-_01_08_2026_"
        );
        assert_eq!(file_stem("abc@timeoff", "event"), "abc@timeoff");
        assert_eq!(file_stem("..", "calendar"), "calendar");
        assert_eq!(file_stem("", "calendar"), "calendar");
    }

    #[test]
    fn test_collection_dir_keeps_readable_stem() {
        let dir = collection_dir("Team Leave");
        let (stem, digest) = dir.rsplit_once('-').unwrap();
        assert_eq!(stem, "Team_Leave");
        assert_eq!(digest.len(), DIGEST_LEN);
        assert!(digest.chars().all(|ch| ch.is_ascii_hexdigit()));
        assert_eq!(collection_dir("Team Leave"), dir);
    }

    #[test]
    fn test_names_with_same_stem_get_separate_collections() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = VdirCalendar::open(dir.path(), options()).unwrap();
        assert_ne!(
            store.collection_path("Team Leave"),
            store.collection_path("Team_Leave")
        );

        store.ensure_calendar("Team Leave").unwrap();
        store.ensure_calendar("Team_Leave").unwrap();
        store
            .add_event("Team Leave", &create_test_event("a@timeoff"))
            .unwrap();
        store
            .add_event("Team_Leave", &create_test_event("a@timeoff"))
            .unwrap();

        assert_eq!(store.clear_calendar("Team_Leave").unwrap(), 1);
        assert!(store
            .collection_path("Team Leave")
            .join("a@timeoff.ics")
            .is_file());
        assert_eq!(
            fs::read_to_string(store.collection_path("Team_Leave").join("displayname")).unwrap(),
            "Team_Leave"
        );
    }

    #[test]
    fn test_ensure_creates_collection_with_display_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = VdirCalendar::open(dir.path(), options()).unwrap();
        store.ensure_calendar("Team Leave").unwrap();

        let collection = store.collection_path("Team Leave");
        assert_eq!(collection.parent(), Some(dir.path()));
        assert!(collection.is_dir());
        assert_eq!(
            fs::read_to_string(collection.join("displayname")).unwrap(),
            "Team Leave"
        );
    }

    #[test]
    fn test_add_event_writes_one_file_and_detects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = VdirCalendar::open(dir.path(), options()).unwrap();
        store.ensure_calendar("Leave").unwrap();

        let event = create_test_event("abc@timeoff");
        assert_eq!(store.add_event("Leave", &event).unwrap(), AddOutcome::Created);
        assert_eq!(store.add_event("Leave", &event).unwrap(), AddOutcome::Duplicate);

        let text = fs::read_to_string(store.collection_path("Leave").join("abc@timeoff.ics")).unwrap();
        assert!(text.contains("UID:abc@timeoff\r\n"));
        assert!(text.contains("DTEND;VALUE=DATE:20260108\r\n"));
    }

    #[test]
    fn test_clear_removes_only_event_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = VdirCalendar::open(dir.path(), options()).unwrap();
        store.ensure_calendar("Leave").unwrap();
        store.add_event("Leave", &create_test_event("a@timeoff")).unwrap();
        store.add_event("Leave", &create_test_event("b@timeoff")).unwrap();

        assert_eq!(store.clear_calendar("Leave").unwrap(), 2);
        assert!(store.collection_path("Leave").join("displayname").is_file());
        assert_eq!(store.clear_calendar("Leave").unwrap(), 0);
    }

    #[test]
    fn test_clear_missing_collection_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = VdirCalendar::open(dir.path(), options()).unwrap();
        assert!(matches!(
            store.clear_calendar("Nowhere"),
            Err(ImportError::ApplicationError { .. })
        ));
    }

    #[test]
    fn test_closed_store_rejects_calls() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = VdirCalendar::open(dir.path(), options()).unwrap();
        store.close();
        assert!(store.ensure_calendar("Leave").is_err());
    }
}
