//! Driver report parsing.
//!
//! Route-platform exports are report-shaped rather than record-shaped: each driver is a block of
//! lines in the first column, e.g.
//!
//! ```text
//! Agente: João
//! Veículo: Fiorino RJ
//! Serviços: 42
//! Agente: Maria
//! ...
//! ```
//!
//! [`parse_report_rows`] folds those blocks into one [`DeliveryRecord`] per driver. A block is
//! emitted when the next `Agente:` line starts, or at end of input. `Veículo:` and `Serviços:`
//! lines apply to the most recent `Agente:`; any seen before the first agent are discarded.

use std::fmt::Write;
use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DeliveryRecord, Region, TabularRow};

/// Prefix starting a new driver block.
pub const AGENT_MARKER: &str = "Agente:";
/// Marker of the vehicle line; its label decides the region.
pub const VEHICLE_MARKER: &str = "Veículo:";
/// Marker of the order-count line.
pub const SERVICES_MARKER: &str = "Serviços:";

const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

fn services_pattern() -> &'static Regex {
    static SERVICES_RE: OnceLock<Regex> = OnceLock::new();
    SERVICES_RE.get_or_init(|| Regex::new(r"Serviços:\s*(\d+)").expect("services regex compiles"))
}

/// Options controlling report parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Label of the column holding the report lines. `None` reads each row's first column.
    pub column: Option<String>,
    /// Vehicle labels containing this code are tagged [`Region::Rj`]; all others [`Region::Sp`].
    pub secondary_region_code: String,
    /// `chrono` format used to stamp the ingestion date on every record.
    pub date_format: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            column: None,
            secondary_region_code: Region::Rj.code().to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ReportOptions {
    /// Today's date formatted with [`Self::date_format`].
    ///
    /// An invalid format string falls back to `dd/mm/yyyy`.
    pub fn today(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.date_format)).is_err() {
            warn!(format = %self.date_format, "invalid date format, using dd/mm/yyyy");
            out = now.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    }

    /// Check that the configured report column exists in a source's header labels.
    ///
    /// With no explicit column, the header only needs at least one label.
    pub fn validate_header<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> IngestionResult<()> {
        let labels: Vec<&str> = labels.into_iter().collect();
        match &self.column {
            Some(col) if !labels.iter().any(|l| *l == col.as_str()) => Err(IngestionError::NotTabular {
                message: format!("missing report column '{col}'. headers={labels:?}"),
            }),
            None if labels.is_empty() => Err(IngestionError::NotTabular {
                message: "input has no header row".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn line_of<'r>(&self, row: &'r TabularRow) -> &'r str {
        let cell = match &self.column {
            Some(col) => row.get(col),
            None => row.first_label().and_then(|l| row.get(l)),
        };
        cell.unwrap_or("")
    }

    fn region_for_vehicle(&self, label: &str) -> Region {
        if !self.secondary_region_code.is_empty() && label.contains(&self.secondary_region_code) {
            Region::Rj
        } else {
            Region::Sp
        }
    }
}

/// The driver block currently being read.
#[derive(Debug)]
struct DriverBlock {
    driver_name: String,
    total_orders: String,
    region: Option<Region>,
}

impl DriverBlock {
    fn fresh(driver_name: String) -> Self {
        Self {
            driver_name,
            total_orders: "0".to_string(),
            region: None,
        }
    }

    fn finish(self, date: &str) -> Option<DeliveryRecord> {
        if self.driver_name.is_empty() {
            return None;
        }
        debug!(
            driver = %self.driver_name,
            total = %self.total_orders,
            region = ?self.region,
            "emit driver record"
        );
        Some(DeliveryRecord::unreported(
            date,
            self.driver_name,
            self.total_orders,
            self.region,
        ))
    }
}

/// Parse report rows into driver records, stamping every record with `date`.
///
/// Only three kinds of line have an effect:
///
/// - text starting with `Agente:` closes the current block and opens one for the named driver
/// - text containing `Veículo:` sets the block's region from the vehicle label
/// - text containing `Serviços:` sets the block's total orders from the digits that follow
///   (`"0"` if none)
///
/// Everything else is ignored; nothing here fails. Emitted records have no reported counts, so
/// `pending` equals `total_orders` and both percentages are `"0%"`.
pub fn parse_report_rows(rows: &[TabularRow], options: &ReportOptions, date: &str) -> Vec<DeliveryRecord> {
    let mut records = Vec::new();
    let mut current = DriverBlock::fresh(String::new());

    for (idx0, row) in rows.iter().enumerate() {
        let line = options.line_of(row);
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix(AGENT_MARKER) {
            let next = DriverBlock::fresh(rest.trim().to_string());
            if let Some(record) = std::mem::replace(&mut current, next).finish(date) {
                records.push(record);
            }
            continue;
        }

        let orphan = current.driver_name.is_empty();

        if let Some(pos) = line.find(VEHICLE_MARKER) {
            let label = line[pos + VEHICLE_MARKER.len()..].trim();
            current.region = Some(options.region_for_vehicle(label));
            if orphan {
                warn!(row = idx0 + 1, "vehicle line before any agent line is discarded");
            }
        }

        if line.contains(SERVICES_MARKER) {
            current.total_orders = services_pattern()
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "0".to_string());
            if orphan {
                warn!(row = idx0 + 1, "services line before any agent line is discarded");
            }
        }
    }

    if let Some(record) = current.finish(date) {
        records.push(record);
    }
    records
}

/// Parse report rows, stamping records with today's date (see [`ReportOptions::today`]).
pub fn parse_report(rows: &[TabularRow], options: &ReportOptions) -> Vec<DeliveryRecord> {
    parse_report_rows(rows, options, &options.today())
}
