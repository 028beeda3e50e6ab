//! Excel and OpenDocument reader.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ImportError, ImportResult};
use crate::models::{RawRecord, RawValue};

use super::ColumnMap;

/// Reads the first worksheet of a workbook. The first used row is the header.
pub(super) fn read(path: &Path) -> ImportResult<Vec<RawRecord>> {
    let read_error = |message: String| ImportError::InputReadError {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error("workbook has no worksheets".to_string()))?
        .map_err(|e| read_error(e.to_string()))?;

    // Rows are reported as 1-based sheet rows, so offset by the first used row.
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| read_error("worksheet is empty".to_string()))?
        .iter()
        .map(|cell| match cell {
            Data::String(text) => text.clone(),
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();
    let columns = ColumnMap::from_headers(&headers, path)?;

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let cells: Vec<RawValue> = row.iter().map(to_raw_value).collect();
        let record = columns.record(first_row + index + 2, &cells);
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Converts a calamine cell, keeping date cells as dates.
fn to_raw_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::String(text) => RawValue::from(text.as_str()),
        Data::Float(number) => RawValue::Number(*number),
        Data::Int(number) => RawValue::Number(*number as f64),
        Data::Bool(flag) => RawValue::Bool(*flag),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) if value.is_datetime() => date_or_datetime(datetime),
            _ => RawValue::Number(value.as_f64()),
        },
        Data::DateTimeIso(text) => parse_iso(text),
        Data::DurationIso(text) => RawValue::Text(text.clone()),
        Data::Error(error) => RawValue::Text(format!("#{:?}", error)),
    }
}

/// Date-only cells become dates so the validator needs no time handling.
fn date_or_datetime(datetime: NaiveDateTime) -> RawValue {
    if datetime.time() == chrono::NaiveTime::MIN {
        RawValue::Date(datetime.date())
    } else {
        RawValue::DateTime(datetime)
    }
}

fn parse_iso(text: &str) -> RawValue {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return date_or_datetime(datetime);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return RawValue::Date(date);
    }
    RawValue::Text(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cells() {
        assert_eq!(to_raw_value(&Data::Empty), RawValue::Empty);
        assert_eq!(to_raw_value(&Data::String(String::new())), RawValue::Empty);
        assert_eq!(
            to_raw_value(&Data::String("Alice".to_string())),
            RawValue::Text("Alice".to_string())
        );
        assert_eq!(to_raw_value(&Data::Int(3)), RawValue::Number(3.0));
        assert_eq!(to_raw_value(&Data::Float(0.5)), RawValue::Number(0.5));
        assert_eq!(to_raw_value(&Data::Bool(true)), RawValue::Bool(true));
    }

    #[test]
    fn test_iso_cells() {
        assert_eq!(
            to_raw_value(&Data::DateTimeIso("2026-01-05".to_string())),
            RawValue::Date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        );
        assert_eq!(
            to_raw_value(&Data::DateTimeIso("2026-01-05T00:00:00".to_string())),
            RawValue::Date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        );
        assert_eq!(
            to_raw_value(&Data::DateTimeIso("2026-01-05T13:30:00".to_string())),
            RawValue::DateTime(
                NaiveDate::from_ymd_opt(2026, 1, 5)
                    .unwrap()
                    .and_hms_opt(13, 30, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_reads_fixture_workbook() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/timeoff.xlsx");
        let records = read(&path).unwrap();

        // Header on sheet row 2; sheet row 4 is empty.
        let rows: Vec<usize> = records.iter().map(|record| record.row).collect();
        assert_eq!(rows, vec![3, 5, 6]);

        assert_eq!(records[0].employee, RawValue::Text("Alice".to_string()));
        assert_eq!(
            records[0].request_date,
            RawValue::Date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        );
        assert_eq!(records[0].duration, RawValue::Number(3.0));
        assert_eq!(records[0].policy, RawValue::Text("Standard".to_string()));

        assert_eq!(records[1].request_date, RawValue::Text("01/06/2026".to_string()));
        assert_eq!(records[1].duration, RawValue::Number(0.5));
        assert_eq!(records[1].status, RawValue::Text("Denied".to_string()));

        assert_eq!(
            records[2].request_date,
            RawValue::Date(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap())
        );
        assert_eq!(records[2].reason, RawValue::Number(401.0));
        assert_eq!(records[2].policy, RawValue::Empty);
    }

    #[test]
    fn test_unreadable_workbook_is_read_error() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        std::fs::write(file.path(), b"not a workbook").unwrap();
        assert!(matches!(
            read(file.path()),
            Err(ImportError::InputReadError { .. })
        ));
    }
}
