//! Configuration loading and management for the importer.
//!
//! This module loads importer settings from a YAML file: calendar labelling,
//! accepted date and time formats, and how partial days become timed events.
//!
//! # Example
//!
//! ```no_run
//! use timeoff_calendar::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/timeoff.yaml").unwrap();
//! println!("Default calendar: {}", config.config().calendar.default_name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalendarSettings, DEFAULT_CALENDAR_NAME, ImportConfig, PartialDayMapping, RequestSettings,
    SpanSettings,
};
