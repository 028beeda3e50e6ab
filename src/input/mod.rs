//! Spreadsheet input.
//!
//! This module reads time-off requests from a CSV file or a workbook
//! (`.xlsx`, `.xlsm`, `.xls`, `.ods`) into [`RawRecord`]s. Columns are located
//! by header name, so their order in the sheet does not matter. Only the first
//! worksheet of a workbook is read.

mod delimited;
mod workbook;

use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::models::{RawRecord, RawValue};

/// Header of the employee name column.
pub const NAME_COLUMN: &str = "NAME";
/// Header of the request start date column.
pub const DATE_COLUMN: &str = "TIME OFF REQUEST DATE";
/// Header of the duration column.
pub const DURATION_COLUMN: &str = "DURATION";
/// Header of the approval status column.
pub const STATUS_COLUMN: &str = "REQUEST STATUS";
/// Header of the reason code column.
pub const REASON_COLUMN: &str = "REASON CODE";
/// Header of the optional policy column.
pub const POLICY_COLUMN: &str = "POLICY NAME";
/// Header of the optional start time column.
pub const START_TIME_COLUMN: &str = "START TIME";
/// Header of the optional duration unit column.
pub const UNIT_COLUMN: &str = "DAYS/HOURS";

/// The spreadsheet formats the importer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a header line.
    Csv,
    /// An Excel or OpenDocument workbook.
    Workbook,
}

impl InputFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(InputFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputFormat::Workbook),
            _ => None,
        }
    }
}

/// Reads every non-blank data row of the input file.
///
/// # Errors
///
/// - `InputNotFound` if the file does not exist
/// - `UnsupportedFormat` if the extension is not recognised
/// - `InputReadError` if the file cannot be opened or parsed
/// - `MissingColumns` if a required header is absent
///
/// # Example
///
/// ```no_run
/// use timeoff_calendar::input::read_records;
///
/// let records = read_records("timeoff.xlsx")?;
/// println!("{} rows", records.len());
/// # Ok::<(), timeoff_calendar::error::ImportError>(())
/// ```
pub fn read_records<P: AsRef<Path>>(path: P) -> ImportResult<Vec<RawRecord>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ImportError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let format = InputFormat::from_path(path).ok_or_else(|| ImportError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;

    let records = match format {
        InputFormat::Csv => delimited::read(path)?,
        InputFormat::Workbook => workbook::read(path)?,
    };

    tracing::info!(
        path = %path.display(),
        rows = records.len(),
        "Read time-off requests"
    );
    Ok(records)
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    employee: usize,
    request_date: usize,
    duration: usize,
    status: usize,
    reason: usize,
    policy: Option<usize>,
    start_time: Option<usize>,
    unit: Option<usize>,
}

impl ColumnMap {
    /// Resolves columns from header cells, ignoring case and surrounding
    /// whitespace.
    pub(crate) fn from_headers<S: AsRef<str>>(headers: &[S], path: &Path) -> ImportResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|header| normalize_header(header.as_ref()))
            .collect();
        let find = |name: &str| normalized.iter().position(|header| header == name);

        let mut missing = Vec::new();
        let mut require = |name: &str| {
            let index = find(name);
            if index.is_none() {
                missing.push(name.to_string());
            }
            index.unwrap_or_default()
        };

        let employee = require(NAME_COLUMN);
        let request_date = require(DATE_COLUMN);
        let duration = require(DURATION_COLUMN);
        let status = require(STATUS_COLUMN);
        let reason = require(REASON_COLUMN);

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                path: path.display().to_string(),
                columns: missing,
            });
        }

        Ok(Self {
            employee,
            request_date,
            duration,
            status,
            reason,
            policy: find(POLICY_COLUMN),
            start_time: find(START_TIME_COLUMN),
            unit: find(UNIT_COLUMN),
        })
    }

    /// Builds a record from a row of cells. Short rows yield empty cells.
    pub(crate) fn record(&self, row: usize, cells: &[RawValue]) -> RawRecord {
        let cell = |index: usize| cells.get(index).cloned().unwrap_or(RawValue::Empty);
        let optional = |index: Option<usize>| index.map(cell).unwrap_or(RawValue::Empty);

        RawRecord {
            row,
            employee: cell(self.employee),
            request_date: cell(self.request_date),
            duration: cell(self.duration),
            status: cell(self.status),
            reason: cell(self.reason),
            policy: optional(self.policy),
            start_time: optional(self.start_time),
            unit: optional(self.unit),
        }
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}
