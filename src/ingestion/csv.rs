//! CSV row source.

use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DeliveryRecord, TabularRow};

use super::report::{parse_report, ReportOptions};

/// Ingest a CSV report export into driver records.
///
/// Rules:
///
/// - The first line is the header; its cells label the columns.
/// - Rows may be ragged (report exports often are).
/// - The report column (see [`ReportOptions::column`]) must exist in the header.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, options: &ReportOptions) -> IngestionResult<Vec<DeliveryRecord>> {
    let rows = read_csv_rows_from_path(path, options)?;
    Ok(parse_report(&rows, options))
}

/// Ingest CSV report text into driver records.
pub fn ingest_csv_from_str(input: &str, options: &ReportOptions) -> IngestionResult<Vec<DeliveryRecord>> {
    let rows = read_csv_rows_from_str(input, options)?;
    Ok(parse_report(&rows, options))
}

/// Read CSV text into labelled rows without interpreting them.
pub fn read_csv_rows_from_str(input: &str, options: &ReportOptions) -> IngestionResult<Vec<TabularRow>> {
    let mut rdr = reader_builder().from_reader(input.as_bytes());
    read_csv_rows_from_reader(&mut rdr, options)
}

/// Read a CSV file into labelled rows without interpreting them.
pub fn read_csv_rows_from_path(path: impl AsRef<Path>, options: &ReportOptions) -> IngestionResult<Vec<TabularRow>> {
    let mut rdr = reader_builder().from_path(path)?;
    read_csv_rows_from_reader(&mut rdr, options)
}

/// Read labelled rows from an existing CSV reader.
///
/// The reader must be configured with `has_headers(true)`.
pub fn read_csv_rows_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &ReportOptions,
) -> IngestionResult<Vec<TabularRow>> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(IngestionError::NotTabular {
            message: "csv input has no header row".to_string(),
        });
    }
    options.validate_header(headers.iter())?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: TabularRow = record
            .iter()
            .enumerate()
            .map(|(i, cell)| (column_label(&headers, i), cell.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

// Cells past the header width get a positional label.
fn column_label(headers: &csv::StringRecord, idx: usize) -> String {
    match headers.get(idx) {
        Some(h) => h.to_string(),
        None => format!("__col{idx}"),
    }
}
