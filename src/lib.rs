//! `route-report-metrics` turns report-style exports from a delivery-routing platform into one
//! [`types::DeliveryRecord`] per driver, and keeps each record's completion metrics consistent as
//! counts are edited.
//!
//! The primary entrypoint is [`ingestion::ingest_from_path`], which auto-detects the export format
//! from the file extension (or you can force one via [`ingestion::IngestionOptions`]).
//!
//! ## What you can ingest
//!
//! **File formats (auto-detected by extension):**
//!
//! - **CSV**: `.csv`
//! - **JSON**: `.json` (array-of-objects) and `.ndjson` (newline-delimited objects)
//! - **Excel/workbooks** (requires the Cargo feature `excel`): `.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`
//!
//! **Report layout:**
//!
//! Every source is first decoded into [`types::TabularRow`]s. The report text lives in one column
//! (the first, unless [`ingestion::ReportOptions::column`] says otherwise) and only three kinds of
//! line matter:
//!
//! - `Agente: <name>` starts a driver
//! - `Veículo: <label>` tags the driver's region (`RJ` in the label → [`types::Region::Rj`],
//!   otherwise [`types::Region::Sp`])
//! - `Serviços: <n>` sets the driver's total orders
//!
//! Malformed numbers never fail ingestion; they count as zero. Only a source that is not tabular
//! at all produces an [`IngestionError`], and then nothing is produced.
//!
//! ## Quick example: parse decoded rows
//!
//! ```rust
//! use route_report_metrics::ingestion::{parse_report_rows, ReportOptions};
//! use route_report_metrics::types::{Region, TabularRow};
//!
//! let rows: Vec<TabularRow> = ["Agente: João", "Veículo: Fiorino RJ", "Serviços: 42"]
//!     .into_iter()
//!     .map(|line| [("Relatório", line)].into_iter().collect())
//!     .collect();
//!
//! let records = parse_report_rows(&rows, &ReportOptions::default(), "17/10/2026");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].driver_name(), "João");
//! assert_eq!(records[0].region(), Some(Region::Rj));
//! assert_eq!(records[0].pending(), "42");
//! assert_eq!(records[0].delivery_percent(), "0%");
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: row sources, the report parser and the unified entrypoint
//! - [`processing`]: metrics, edits, region aggregation, sorting, batch route assignment
//! - [`collection`]: an owned, versioned record set with snapshot persistence helpers
//! - [`coercion`]: lenient text → count parsing shared by all metrics
//! - [`types`]: record and query types
//! - [`error`]: error types
//!
//! ## Logging
//!
//! The crate emits `tracing` events (parser diagnostics at `debug`/`warn`) and never installs a
//! subscriber. Ingestion outcomes can also be routed to an [`ingestion::IngestionObserver`].

pub mod coercion;
pub mod collection;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{IngestionError, IngestionResult, RecordError};
