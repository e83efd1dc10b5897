//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which reads a report export into driver records.
//!
//! - If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DeliveryRecord, TabularRow};

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::report::{parse_report, ReportOptions};
use super::{csv, json};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl fmt::Display for IngestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Excel => "excel",
        })
    }
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Report parsing options (column, region code, date format).
    pub report: ReportOptions,
    /// Excel sheet to read; `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("report", &self.report)
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            report: ReportOptions::default(),
            sheet: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Read a report export from disk into driver records.
///
/// Ingestion is all-or-nothing: on error no records are returned, so a caller's current
/// collection stays as it was (see [`crate::collection::RecordSet::replace_from`]).
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and per-region driver counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use route_report_metrics::ingestion::{ingest_from_path, IngestionOptions, TracingObserver};
///
/// # fn main() -> Result<(), route_report_metrics::IngestionError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let records = ingest_from_path("relatorio.csv", &opts)?;
/// println!("drivers={}", records.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Vec<DeliveryRecord>> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = IngestionContext {
        source: path.display().to_string(),
        format: fmt,
    };

    let rows = match fmt {
        IngestionFormat::Csv => csv::read_csv_rows_from_path(path, &options.report),
        IngestionFormat::Json => std::fs::read_to_string(path)
            .map_err(IngestionError::from)
            .and_then(|text| json::read_json_rows_from_str(&text, &options.report)),
        IngestionFormat::Excel => read_excel_dispatch(path, options),
    };

    finish(rows, &ctx, options)
}

/// Read already-decoded report text (CSV or JSON) into driver records.
///
/// Excel content is binary and must go through [`ingest_from_path`].
pub fn ingest_from_str(
    input: &str,
    format: IngestionFormat,
    options: &IngestionOptions,
) -> IngestionResult<Vec<DeliveryRecord>> {
    let ctx = IngestionContext {
        source: "<memory>".to_string(),
        format,
    };

    let rows = match format {
        IngestionFormat::Csv => csv::read_csv_rows_from_str(input, &options.report),
        IngestionFormat::Json => json::read_json_rows_from_str(input, &options.report),
        IngestionFormat::Excel => Err(IngestionError::NotTabular {
            message: "excel content must be ingested from a file".to_string(),
        }),
    };

    finish(rows, &ctx, options)
}

fn finish(
    rows: IngestionResult<Vec<TabularRow>>,
    ctx: &IngestionContext,
    options: &IngestionOptions,
) -> IngestionResult<Vec<DeliveryRecord>> {
    let result = rows.map(|rows| {
        let records = parse_report(&rows, &options.report);
        (rows.len(), records)
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((rows, records)) => obs.on_success(ctx, &IngestionStats::from_records(*rows, records)),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }

    result.map(|(_, records)| records)
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(calamine::Error::Io(_)) => IngestionSeverity::Critical,
        #[cfg(feature = "excel")]
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::Json(_) => IngestionSeverity::Error,
        IngestionError::NotTabular { .. } => IngestionSeverity::Error,
        IngestionError::Snapshot { .. } => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::NotTabular {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::NotTabular {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

fn read_excel_dispatch(path: &Path, options: &IngestionOptions) -> IngestionResult<Vec<TabularRow>> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, options);

    #[cfg(feature = "excel")]
    {
        super::excel::read_excel_rows_from_path(path, options.sheet.as_deref(), &options.report)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(IngestionError::NotTabular {
            message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}
