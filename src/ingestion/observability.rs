//! Ingestion outcome reporting.
//!
//! [`super::ingest_from_path`] and [`super::ingest_from_str`] hand every outcome to an optional
//! [`IngestionObserver`]. Successful runs carry the decoded row count and a per-region driver
//! breakdown; failures carry a [`IngestionSeverity`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use tracing::{error, info, warn};

use crate::error::IngestionError;
use crate::types::{DeliveryRecord, Region};

use super::unified::IngestionFormat;

const TARGET: &str = "route_report_metrics::ingest";

/// How bad a failed ingestion is, ordered for alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    Info,
    Warning,
    /// The input could not be read as a report.
    Error,
    /// The input could not be read at all (I/O).
    Critical,
}

impl fmt::Display for IngestionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

/// Where an ingestion attempt read from.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// A file path, or `<memory>` for in-memory text.
    pub source: String,
    pub format: IngestionFormat,
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionStats {
    /// Decoded rows, header excluded.
    pub rows: usize,
    /// Driver records produced from them.
    pub drivers: usize,
    /// Drivers per tagged region; regions with no driver are absent.
    pub drivers_by_region: BTreeMap<Region, usize>,
    /// Drivers whose block had no vehicle line.
    pub untagged: usize,
}

impl IngestionStats {
    /// Count `records` produced from `rows` decoded rows.
    pub fn from_records(rows: usize, records: &[DeliveryRecord]) -> Self {
        let mut stats = Self {
            rows,
            drivers: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.region() {
                Some(region) => *stats.drivers_by_region.entry(region).or_default() += 1,
                None => stats.untagged += 1,
            }
        }
        stats
    }

    /// Drivers tagged with `region`.
    pub fn drivers_in(&self, region: Region) -> usize {
        self.drivers_by_region.get(&region).copied().unwrap_or(0)
    }
}

/// Receives ingestion outcomes. Every method defaults to a no-op except `on_alert`, which
/// forwards to [`Self::on_failure`].
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: &IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called after `on_failure` when the severity meets
    /// [`super::IngestionOptions::alert_at_or_above`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards each callback to every wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver(Vec<Arc<dyn IngestionObserver>>);

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self(observers)
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompositeObserver").field(&self.0.len()).finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: &IngestionStats) {
        self.0.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.0.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.0.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Emits ingestion outcomes as `tracing` events (target `route_report_metrics::ingest`).
///
/// Successes log at `info`, failures at `warn` (`error` when critical), alerts at `error`.
/// Installing a subscriber is up to the caller.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: &IngestionStats) {
        info!(
            target: TARGET,
            source = %ctx.source,
            format = %ctx.format,
            rows = stats.rows,
            drivers = stats.drivers,
            sp = stats.drivers_in(Region::Sp),
            rj = stats.drivers_in(Region::Rj),
            untagged = stats.untagged,
            "report ingested"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        if severity >= IngestionSeverity::Critical {
            error!(target: TARGET, source = %ctx.source, format = %ctx.format, %severity, %error, "report ingestion failed");
        } else {
            warn!(target: TARGET, source = %ctx.source, format = %ctx.format, %severity, %error, "report ingestion failed");
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        error!(target: TARGET, alert = true, source = %ctx.source, format = %ctx.format, %severity, %error, "report ingestion alert");
    }
}

/// Appends one line per outcome to a log file, stamped with an RFC 3339 UTC time.
///
/// ```text
/// 2026-10-17T08:00:00Z ingested source=relatorio.csv format=csv rows=10 drivers=3 SP=1 RJ=1 untagged=1
/// 2026-10-17T08:00:05Z failed source=missing.csv format=csv severity=critical error=...
/// 2026-10-17T08:00:05Z ALERT source=missing.csv format=csv severity=critical error=...
/// ```
///
/// The file is opened on first use and kept open. Open or write failures are reported through
/// `tracing` and otherwise ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    fn write_event(&self, event: &str, ctx: &IngestionContext, detail: fmt::Arguments<'_>) {
        let Ok(mut slot) = self.file.lock() else {
            return;
        };
        if slot.is_none() {
            match OpenOptions::new().create(true).append(true).open(&self.path) {
                Ok(f) => *slot = Some(f),
                Err(err) => {
                    warn!(target: TARGET, path = %self.path.display(), %err, "cannot open ingestion log");
                    return;
                }
            }
        }
        let Some(file) = slot.as_mut() else {
            return;
        };

        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        if let Err(err) = writeln!(file, "{ts} {event} source={} format={} {detail}", ctx.source, ctx.format) {
            warn!(target: TARGET, path = %self.path.display(), %err, "cannot write ingestion log");
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: &IngestionStats) {
        let regions: Vec<String> = Region::ALL
            .iter()
            .map(|r| format!("{}={}", r.code(), stats.drivers_in(*r)))
            .collect();
        self.write_event(
            "ingested",
            ctx,
            format_args!(
                "rows={} drivers={} {} untagged={}",
                stats.rows,
                stats.drivers,
                regions.join(" "),
                stats.untagged
            ),
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.write_event("failed", ctx, format_args!("severity={severity} error={error}"));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.write_event("ALERT", ctx, format_args!("severity={severity} error={error}"));
    }
}
