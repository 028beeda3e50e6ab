//! Import orchestration.
//!
//! The [`Importer`] runs a whole import: read rows, validate, filter, build
//! events, name the calendar, and hand the document to a sink. Row problems
//! are collected into the [`RunReport`]; only input, configuration and sink
//! failures abort the run.

use std::path::Path;
use std::time::Instant;

use crate::config::ImportConfig;
use crate::error::ImportResult;
use crate::input::read_records;
use crate::models::{CalendarDocument, DateRange, RawRecord, RunReport};
use crate::pipeline::{
    RecordValidator, SpanCalculator, build_events, filter_requests, generate_calendar_name,
};
use crate::sink::CalendarSink;

/// Per-run choices made by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Include the reason in titles and add a description.
    pub verbose: bool,
    /// Keep only requests starting inside this inclusive range.
    pub range: Option<DateRange>,
    /// Use this calendar name instead of the generated one.
    pub calendar_name: Option<String>,
}

/// Runs imports under one configuration.
///
/// # Example
///
/// ```
/// use timeoff_calendar::config::ImportConfig;
/// use timeoff_calendar::import::{ImportOptions, Importer};
/// use timeoff_calendar::models::RawRecord;
///
/// let mut record = RawRecord::empty(2);
/// record.employee = "Alice".into();
/// record.request_date = "01-05-2026".into();
/// record.duration = "3".into();
/// record.status = "Approved".into();
/// record.reason = "VAC".into();
///
/// let importer = Importer::new(ImportConfig::default());
/// let (document, report) = importer.build_document(&[record], &ImportOptions::default());
/// assert_eq!(document.events.len(), 1);
/// assert_eq!(document.name, "Employee Time Off (01/05/2026 - 01/05/2026)");
/// assert_eq!(report.events, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
    validator: RecordValidator,
    calculator: SpanCalculator,
}

impl Importer {
    /// Creates an importer for the given configuration.
    pub fn new(config: ImportConfig) -> Self {
        let validator = RecordValidator::from_config(&config);
        let calculator = SpanCalculator::from_settings(&config.spans);
        Self {
            config,
            validator,
            calculator,
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Turns raw rows into a calendar document and a report of what was
    /// skipped. The report's `sink` is left empty.
    pub fn build_document(
        &self,
        records: &[RawRecord],
        options: &ImportOptions,
    ) -> (CalendarDocument, RunReport) {
        let mut report = RunReport {
            rows_read: records.len(),
            ..RunReport::default()
        };

        let mut requests = Vec::with_capacity(records.len());
        for record in records {
            match self.validator.validate(record) {
                Ok(request) => requests.push(request),
                Err(error) => {
                    tracing::warn!(
                        row = error.row,
                        field = %error.field,
                        reason = %error.reason,
                        message = %error.message,
                        "Skipping invalid row"
                    );
                    report.row_errors.push(error);
                }
            }
        }

        let filtered = filter_requests(requests, options.range.as_ref());
        report.excluded_by_status = filtered.excluded_by_status;
        report.excluded_by_range = filtered.excluded_by_range;

        let built = build_events(&filtered.kept, &self.calculator, options.verbose);
        for error in &built.errors {
            tracing::warn!(row = error.row, message = %error.message, "Skipping row with unusable duration");
        }
        report.row_errors.extend(built.errors);
        report.row_errors.sort_by_key(|error| error.row);
        report.duplicates = built.duplicates;

        let name = generate_calendar_name(
            &built.events,
            options.calendar_name.as_deref(),
            &self.config.calendar.default_name,
        );
        report.events = built.events.len();
        report.calendar_name = name.clone();

        (CalendarDocument::new(name, built.events), report)
    }

    /// Reads `input`, builds the document and delivers it to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the sink fails as a
    /// whole. Row-level problems never produce an error.
    pub fn run(
        &self,
        input: &Path,
        options: &ImportOptions,
        sink: &mut dyn CalendarSink,
    ) -> ImportResult<RunReport> {
        let started = Instant::now();
        let records = read_records(input)?;

        let (document, mut report) = self.build_document(&records, options);
        tracing::info!(
            rows = report.rows_read,
            events = report.events,
            invalid = report.row_errors.len(),
            not_approved = report.excluded_by_status,
            out_of_range = report.excluded_by_range,
            duplicates = report.duplicates.len(),
            calendar = %report.calendar_name,
            "Built calendar"
        );
        if document.is_empty() {
            tracing::warn!("No events to write");
        }

        report.sink = Some(sink.write(&document)?);

        tracing::info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "Import complete"
        );
        Ok(report)
    }
}
