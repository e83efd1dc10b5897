#![cfg(feature = "excel")]

//! Excel row source (`.xlsx`, `.xls`, `.ods`, ...).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DeliveryRecord, TabularRow};

use super::report::{parse_report, ReportOptions};

/// Ingest an Excel report export into driver records.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Reads remaining rows as labelled text cells and parses them as a report
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    options: &ReportOptions,
) -> IngestionResult<Vec<DeliveryRecord>> {
    let rows = read_excel_rows_from_path(path, sheet_name, options)?;
    Ok(parse_report(&rows, options))
}

/// Read one sheet of a workbook into labelled rows without interpreting them.
pub fn read_excel_rows_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    options: &ReportOptions,
) -> IngestionResult<Vec<TabularRow>> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestionError::NotTabular {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    sheet_rows(&range, options).map_err(|e| wrap_err_with_sheet(&sheet, e))
}

fn sheet_rows(range: &calamine::Range<Data>, options: &ReportOptions) -> IngestionResult<Vec<TabularRow>> {
    let (header_row_idx, header_cells) = find_header(range)?;
    options.validate_header(header_cells.iter().map(|s| s.trim()))?;

    let mut rows = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }
        let out: TabularRow = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let label = header_cells
                    .get(i)
                    .map(|h| h.trim().to_string())
                    .unwrap_or_else(|| format!("__col{i}"));
                (label, cell_to_string(cell))
            })
            .collect();
        rows.push(out);
    }
    Ok(rows)
}

fn wrap_err_with_sheet(sheet: &str, err: IngestionError) -> IngestionError {
    match err {
        IngestionError::NotTabular { message } => IngestionError::NotTabular {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn find_header(range: &calamine::Range<Data>) -> IngestionResult<(usize, Vec<String>)> {
    range
        .rows()
        .enumerate()
        .find(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(idx0, row)| (idx0, row.iter().map(cell_to_string).collect()))
        .ok_or_else(|| IngestionError::NotTabular {
            message: "sheet has no non-empty rows (no header row found)".to_string(),
        })
}

fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f) {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
