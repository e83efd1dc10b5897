//! JSON row source.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"Relatório":"Agente: Ana"}, ...]`
//! - Newline-delimited JSON (NDJSON): one object per line
//!
//! Object key order is the column order. Strings are taken as-is, other scalars are rendered as
//! JSON text and `null` becomes an empty cell.

use std::fs;
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DeliveryRecord, TabularRow};

use super::report::{parse_report, ReportOptions};

/// Ingest a JSON report export into driver records.
pub fn ingest_json_from_path(path: impl AsRef<Path>, options: &ReportOptions) -> IngestionResult<Vec<DeliveryRecord>> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text, options)
}

/// Ingest JSON report text into driver records.
pub fn ingest_json_from_str(input: &str, options: &ReportOptions) -> IngestionResult<Vec<DeliveryRecord>> {
    let rows = read_json_rows_from_str(input, options)?;
    Ok(parse_report(&rows, options))
}

/// Decode JSON text into labelled rows without interpreting them.
pub fn read_json_rows_from_str(input: &str, options: &ReportOptions) -> IngestionResult<Vec<TabularRow>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::NotTabular {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    let values = if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(_) => vec![v],
            _ => {
                return Err(IngestionError::NotTabular {
                    message: "json must be an object, an array of objects, or NDJSON".to_string(),
                });
            }
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| IngestionError::NotTabular {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            })?;
            values.push(v);
        }
        values
    };

    let rows = json_values_to_rows(&values)?;
    if let Some(col) = &options.column {
        let found = rows.iter().any(|r| r.get(col).is_some());
        if !rows.is_empty() && !found {
            return Err(IngestionError::NotTabular {
                message: format!("missing report column '{col}' in every row"),
            });
        }
    }
    Ok(rows)
}

fn json_values_to_rows(values: &[serde_json::Value]) -> IngestionResult<Vec<TabularRow>> {
    let mut rows: Vec<TabularRow> = Vec::with_capacity(values.len());
    for (idx0, v) in values.iter().enumerate() {
        let obj = v.as_object().ok_or_else(|| IngestionError::NotTabular {
            message: format!("row {} is not a json object", idx0 + 1),
        })?;
        rows.push(obj.iter().map(|(k, v)| (k.clone(), cell_text(v))).collect());
    }
    Ok(rows)
}

fn cell_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_rendered_as_text() {
        let rows = read_json_rows_from_str(
            r#"[{"a":"Serviços: 3","b":12,"c":true,"d":null}]"#,
            &ReportOptions::default(),
        )
        .unwrap();
        assert_eq!(rows[0].get("a"), Some("Serviços: 3"));
        assert_eq!(rows[0].get("b"), Some("12"));
        assert_eq!(rows[0].get("c"), Some("true"));
        assert_eq!(rows[0].get("d"), Some(""));
    }

    #[test]
    fn key_order_is_column_order() {
        let rows = read_json_rows_from_str(r#"{"z":"Agente: Ana","a":"x"}"#, &ReportOptions::default()).unwrap();
        assert_eq!(rows[0].first_label(), Some("z"));
    }

    #[test]
    fn non_object_rows_are_not_tabular() {
        let err = read_json_rows_from_str("[1, 2]", &ReportOptions::default()).unwrap_err();
        assert!(err.to_string().contains("row 1 is not a json object"));
        let err = read_json_rows_from_str("\"text\"", &ReportOptions::default()).unwrap_err();
        assert!(matches!(err, IngestionError::NotTabular { .. }));
    }

    #[test]
    fn empty_array_is_an_empty_ingestion() {
        let out = ingest_json_from_str("[]", &ReportOptions::default()).unwrap();
        assert!(out.is_empty());
    }
}
