//! Employee time-off calendar importer.
//!
//! This crate turns time-off request spreadsheets into calendar events and
//! delivers them either as an RFC 5545 iCalendar file or into a calendar
//! store, one event at a time.
//!
//! A run flows through [`input`] (spreadsheet rows), [`pipeline`]
//! (validation, filtering, spans, titles, UIDs, naming), [`ical`]
//! (serialization) and [`sink`] (delivery), orchestrated by
//! [`import::Importer`].

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod ical;
pub mod import;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod sink;
