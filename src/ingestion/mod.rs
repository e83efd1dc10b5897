//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - decodes the export into labelled rows and parses them as a driver report
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Callers that already hold decoded rows can call [`report::parse_report_rows`] directly.
//! Format-specific readers live under:
//! - [`csv`]
//! - [`json`]
//! - `excel` (cargo feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod json;
pub mod observability;
pub mod report;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use report::{parse_report, parse_report_rows, ReportOptions};
pub use unified::{ingest_from_path, ingest_from_str, IngestionFormat, IngestionOptions};
