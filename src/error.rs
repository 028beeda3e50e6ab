//! Error types for the time-off calendar importer.
//!
//! Fatal conditions are reported through [`ImportError`] and abort the run.
//! Problems confined to one spreadsheet row are reported through
//! [`ValidationError`] and only cause that row to be skipped.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// The main error type for the importer.
///
/// Every variant is fatal for the run that produced it. Row-level problems
/// use [`ValidationError`] instead.
///
/// # Example
///
/// ```
/// use timeoff_calendar::error::ImportError;
///
/// let error = ImportError::InputNotFound {
///     path: "/missing/timeoff.xlsx".to_string(),
/// };
/// assert_eq!(error.to_string(), "Input file not found: /missing/timeoff.xlsx");
/// ```
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input spreadsheet does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The input spreadsheet exists but could not be read.
    #[error("Failed to read input file '{path}': {message}")]
    InputReadError {
        /// The path of the input file.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// The input file extension is not a supported spreadsheet format.
    #[error("Unsupported input format for '{path}': expected .csv, .xlsx, .xlsm, .xls or .ods")]
    UnsupportedFormat {
        /// The path of the input file.
        path: String,
    },

    /// The header row lacks columns every row needs.
    #[error("Input file '{path}' is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// The path of the input file.
        path: String,
        /// The header names that were not found.
        columns: Vec<String>,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The date-range bounds could not be parsed or are out of order.
    #[error("Invalid date range: {message}")]
    InvalidDateRange {
        /// A description of what was wrong with the range.
        message: String,
    },

    /// A duration cannot be turned into an event span.
    #[error("Invalid duration {duration} days: {message}")]
    InvalidDuration {
        /// The offending duration in days.
        duration: Decimal,
        /// Why the duration was rejected.
        message: String,
    },

    /// An event could not be written into a calendar document.
    #[error("Cannot serialize event '{uid}': {message}")]
    SerializationError {
        /// The UID of the offending event.
        uid: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// The output document could not be written.
    #[error("Failed to write output file '{path}': {message}")]
    OutputWriteError {
        /// The target path.
        path: String,
        /// A description of the write failure.
        message: String,
    },

    /// The calendar application rejected an operation.
    #[error("Calendar application error: {message}")]
    ApplicationError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return ImportError.
pub type ImportResult<T> = Result<T, ImportError>;

/// Why a row was rejected by the record validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    /// A required field is absent or blank.
    MissingField,
    /// A date (or start time) could not be parsed.
    BadDate,
    /// The duration is not a positive number, or its unit is unknown.
    BadDuration,
    /// The status cell is not a recognisable status word.
    BadStatus,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReason::MissingField => write!(f, "missing field"),
            ValidationReason::BadDate => write!(f, "bad date"),
            ValidationReason::BadDuration => write!(f, "bad duration"),
            ValidationReason::BadStatus => write!(f, "bad status"),
        }
    }
}

/// A row that failed validation.
///
/// The row is skipped and the error is accumulated into the run report.
///
/// # Example
///
/// ```
/// use timeoff_calendar::error::{ValidationError, ValidationReason};
///
/// let error = ValidationError {
///     row: 4,
///     field: "duration".to_string(),
///     reason: ValidationReason::BadDuration,
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Row 4: bad duration in 'duration': must be greater than zero"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Row {row}: {reason} in '{field}': {message}")]
pub struct ValidationError {
    /// The 1-based spreadsheet row (the header is row 1).
    pub row: usize,
    /// The field that failed.
    pub field: String,
    /// The category of failure.
    pub reason: ValidationReason,
    /// A human-readable description.
    pub message: String,
}
