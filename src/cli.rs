//! Command-line interface.
//!
//! Parses arguments, picks the sink, runs the import and renders the
//! summary printed at the end of a run.

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use crate::config::ConfigLoader;
use crate::error::{ImportError, ImportResult};
use crate::ical::SerializeOptions;
use crate::import::{ImportOptions, Importer};
use crate::models::{DateRange, RunReport};
use crate::sink::{ApplicationSink, FileSink, VdirCalendar, write_atomic};

/// Convert an employee time-off spreadsheet into calendar events.
#[derive(Debug, Clone, Parser)]
#[command(name = "timeoff-calendar")]
#[command(version)]
pub struct Cli {
    /// Spreadsheet to read (.xlsx, .xlsm, .xls, .ods or .csv)
    #[arg(default_value = "timeoff.xlsx")]
    pub input: PathBuf,

    /// iCalendar file to write [default: from config, timeoff_calendar.ics]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Add events to a calendar store directory instead of writing a file
    #[arg(long, value_name = "DIR")]
    pub vdir: Option<PathBuf>,

    /// Remove existing events from the collection first (with --vdir)
    #[arg(long)]
    pub clear: bool,

    /// Include reason and policy in event titles and descriptions
    #[arg(short, long)]
    pub verbose: bool,

    /// Calendar name to use instead of the generated one
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Only include requests starting within this range (MM-DD-YYYY, inclusive)
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub range: Option<Vec<String>>,

    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Parses the `--range` bounds, if given.
    pub fn date_range(&self) -> ImportResult<Option<DateRange>> {
        match self.range.as_deref() {
            None => Ok(None),
            Some([from, to]) => DateRange::parse(from, to).map(Some),
            Some(_) => Err(ImportError::InvalidDateRange {
                message: "expected a start and an end date".to_string(),
            }),
        }
    }
}

/// Runs the import described by the arguments.
///
/// # Errors
///
/// Returns the first fatal error: bad configuration or range, unreadable
/// input, or a sink that could not be written at all.
pub fn run(cli: &Cli) -> ImportResult<RunReport> {
    let config = ConfigLoader::load_or_default(cli.config.as_ref())?.into_config();
    let options = ImportOptions {
        verbose: cli.verbose,
        range: cli.date_range()?,
        calendar_name: cli.name.clone(),
    };
    let serialize_options = SerializeOptions::from_settings(&config.calendar, Utc::now());
    let default_output = PathBuf::from(&config.calendar.default_output);
    let importer = Importer::new(config);

    let report = match &cli.vdir {
        Some(root) => {
            if cli.output.is_some() {
                tracing::warn!("--output is ignored when --vdir is given");
            }
            let store = VdirCalendar::open(root, serialize_options)?;
            let mut sink = ApplicationSink::new(store, cli.clear);
            importer.run(&cli.input, &options, &mut sink)?
        }
        None => {
            if cli.clear {
                tracing::warn!("--clear only applies with --vdir; ignoring");
            }
            let path = cli.output.clone().unwrap_or(default_output);
            let mut sink = FileSink::new(path, serialize_options);
            importer.run(&cli.input, &options, &mut sink)?
        }
    };

    if let Some(path) = &cli.report {
        let json = serde_json::to_vec_pretty(&report).map_err(|e| ImportError::OutputWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        write_atomic(path, &json)?;
        tracing::info!(path = %path.display(), "Wrote run report");
    }

    Ok(report)
}

/// Renders the end-of-run summary shown to the user.
pub fn format_summary(report: &RunReport) -> String {
    let mut lines = vec![
        format!("Calendar: {}", report.calendar_name),
        format!("Rows read: {}", report.rows_read),
        format!("Events: {}", report.events),
    ];

    if report.skipped() > 0 {
        lines.push(format!(
            "Skipped: {} ({} invalid, {} not approved, {} outside range, {} duplicate)",
            report.skipped(),
            report.row_errors.len(),
            report.excluded_by_status,
            report.excluded_by_range,
            report.duplicates.len()
        ));
    }
    for error in &report.row_errors {
        lines.push(format!("  {}", error));
    }

    if let Some(sink) = &report.sink {
        lines.push(format!("Destination: {}", sink.destination));
        if sink.cleared > 0 {
            lines.push(format!("Cleared: {}", sink.cleared));
        }
        lines.push(format!(
            "Written: {} created, {} already present, {} failed",
            sink.created,
            sink.duplicates,
            sink.failures.len()
        ));
        for failure in &sink.failures {
            let subject = failure.title.as_deref().unwrap_or("calendar");
            lines.push(format!("  {}: {}", subject, failure.message));
        }
    }

    lines.join("\n")
}
