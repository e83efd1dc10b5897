//! Derived delivery metrics.
//!
//! `pending`, `delivery_percent` and `route_percent` are pure functions of a record's
//! `total_orders`, `delivered` and `failed` text. [`recompute`] is the only place they are written.

use crate::coercion::{is_blank, to_non_negative_int};
use crate::types::DeliveryRecord;

/// Percentage reported for degenerate inputs (no total, nothing reported).
pub const ZERO_PERCENT: &str = "0%";

/// Format a percentage rounded to one decimal place, e.g. `98%`, `33.3%`.
///
/// Whole values drop the decimal.
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded}%")
}

/// `delivered / total`, as a one-decimal percentage.
///
/// Returns `"0%"` if either input is blank or `total` is zero.
pub fn compute_delivery_percent(delivered: &str, total: &str) -> String {
    if is_blank(delivered) || is_blank(total) {
        return ZERO_PERCENT.to_string();
    }
    let total = to_non_negative_int(total);
    if total == 0 {
        return ZERO_PERCENT.to_string();
    }
    let delivered = to_non_negative_int(delivered);
    format_percent(delivered as f64 / total as f64 * 100.0)
}

/// `(delivered + failed) / total`, as a one-decimal percentage.
///
/// Only a blank or zero `total` yields `"0%"`; blank counts are read as zero.
pub fn compute_route_percent(delivered: &str, failed: &str, total: &str) -> String {
    if is_blank(total) {
        return ZERO_PERCENT.to_string();
    }
    let total = to_non_negative_int(total);
    if total == 0 {
        return ZERO_PERCENT.to_string();
    }
    let handled = to_non_negative_int(delivered).saturating_add(to_non_negative_int(failed));
    format_percent(handled as f64 / total as f64 * 100.0)
}

/// `max(0, total - delivered - failed)` as text.
pub fn compute_pending(total: &str, delivered: &str, failed: &str) -> String {
    to_non_negative_int(total)
        .saturating_sub(to_non_negative_int(delivered))
        .saturating_sub(to_non_negative_int(failed))
        .to_string()
}

/// Rewrite the derived fields of `record` from its current counts.
///
/// Call after any change to `delivered` or `failed`.
pub fn recompute(record: &mut DeliveryRecord) {
    record.pending = compute_pending(&record.total_orders, &record.delivered, &record.failed);
    record.delivery_percent = compute_delivery_percent(&record.delivered, &record.total_orders);
    record.route_percent =
        compute_route_percent(&record.delivered, &record.failed, &record.total_orders);
}

/// Which percentage a value represents, selecting the banding thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentKind {
    /// Delivered share of total orders.
    Delivery,
    /// Handled (delivered + failed) share of total orders.
    Route,
}

/// Performance band of a percentage, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceBand {
    High,
    Medium,
    Low,
}

/// Classify a percent string (`"98%"`, `"96.5"`) into a [`PerformanceBand`].
///
/// - Route: exactly 100 → `High`; >= 96 → `Medium`; else `Low`.
/// - Delivery: >= 98 → `High`; >= 91 → `Medium`; else `Low`.
///
/// Unparsable text is treated as 0.
pub fn classify_percent(percent: &str, kind: PercentKind) -> PerformanceBand {
    let value = parse_percent(percent);
    match kind {
        PercentKind::Route => {
            if value == 100.0 {
                PerformanceBand::High
            } else if value >= 96.0 {
                PerformanceBand::Medium
            } else {
                PerformanceBand::Low
            }
        }
        PercentKind::Delivery => {
            if value >= 98.0 {
                PerformanceBand::High
            } else if value >= 91.0 {
                PerformanceBand::Medium
            } else {
                PerformanceBand::Low
            }
        }
    }
}

fn parse_percent(percent: &str) -> f64 {
    let trimmed = percent.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
