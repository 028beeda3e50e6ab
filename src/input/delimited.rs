//! CSV reader.

use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::models::{RawRecord, RawValue};

use super::ColumnMap;

/// Reads a CSV file whose first line is the header row.
///
/// Every cell is text; typing happens in the validator. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD so one badly encoded cell cannot
/// cost the rest of the file.
pub(super) fn read(path: &Path) -> ImportResult<Vec<RawRecord>> {
    let read_error = |e: csv::Error| ImportError::InputReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .map_err(read_error)?;

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(read_error)?
        .iter()
        .map(|header| String::from_utf8_lossy(header).into_owned())
        .collect();
    let columns = ColumnMap::from_headers(&headers, path)?;

    let mut records = Vec::new();
    for (index, result) in reader.byte_records().enumerate() {
        let row = result.map_err(read_error)?;
        let line = row
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(index + 2);

        if std::str::from_utf8(row.as_slice()).is_err() {
            tracing::warn!(row = line, "Row is not valid UTF-8; replacing undecodable bytes");
        }
        let cells: Vec<RawValue> = row
            .iter()
            .map(|cell| RawValue::from(String::from_utf8_lossy(cell).as_ref()))
            .collect();
        let record = columns.record(line, &cells);
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}
