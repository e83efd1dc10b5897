//! Owned, versioned record collection.
//!
//! [`RecordSet`] is the caller-side owner of a batch of [`DeliveryRecord`]s. It routes every
//! mutation through [`crate::processing`] so derived metrics stay consistent, bumps a version on
//! each change, and carries the timestamp callers use for the 24-hour snapshot freshness check.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coercion::{is_blank, to_non_negative_int};
use crate::error::{IngestionError, IngestionResult, RecordError};
use crate::processing::{aggregate, apply_route_in_place, metrics, set_field, sort_records};
use crate::types::{DeliveryRecord, EditableField, RegionFilter, RegionStats, SortState};

/// How long a persisted snapshot is considered current.
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

/// A record collection plus the time it was last produced.
///
/// Serializes as `{"records": [...], "producedAt": "<RFC 3339>", "version": n}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    records: Vec<DeliveryRecord>,
    produced_at: DateTime<Utc>,
    #[serde(default)]
    version: u64,
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RecordSet {
    /// Wrap `records`, stamped now.
    pub fn new(records: Vec<DeliveryRecord>) -> Self {
        Self::with_timestamp(records, Utc::now())
    }

    /// Wrap `records` with an explicit production time.
    pub fn with_timestamp(records: Vec<DeliveryRecord>, produced_at: DateTime<Utc>) -> Self {
        Self {
            records,
            produced_at,
            version: 0,
        }
    }

    pub fn records(&self) -> &[DeliveryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn produced_at(&self) -> DateTime<Utc> {
        self.produced_at
    }

    /// Returns `true` if the set was produced less than [`FRESHNESS_WINDOW_HOURS`] before `now`.
    ///
    /// Timestamps in the future count as fresh. Discarding stale sets is left to the caller.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.produced_at) < TimeDelta::hours(FRESHNESS_WINDOW_HOURS)
    }

    /// Replace the records with an ingestion result.
    ///
    /// On `Ok` the set takes the new records and returns their count. On `Err` nothing changes
    /// and the error is handed back.
    pub fn replace_from(&mut self, result: IngestionResult<Vec<DeliveryRecord>>) -> IngestionResult<usize> {
        let records = result?;
        let n = records.len();
        self.records = records;
        self.touch();
        debug!(records = n, version = self.version, "record set replaced");
        Ok(n)
    }

    /// Append a record (e.g. one built by [`crate::processing::create_driver`]).
    pub fn push(&mut self, record: DeliveryRecord) {
        self.records.push(record);
        self.touch();
    }

    /// Remove and return the record at `index`.
    pub fn remove(&mut self, index: usize) -> Result<DeliveryRecord, RecordError> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Edit one field of the record at `index`, recomputing metrics when counts change.
    pub fn edit(&mut self, index: usize, field: EditableField, value: impl Into<String>) -> Result<(), RecordError> {
        self.check_index(index)?;
        set_field(&mut self.records[index], field, value)?;
        self.touch();
        Ok(())
    }

    /// Set `route` on every selected record; see [`crate::processing::apply_route`].
    ///
    /// Returns the number of records changed. The version only moves if something changed.
    pub fn apply_route(&mut self, selected: &BTreeSet<usize>, route: &str) -> usize {
        let changed = apply_route_in_place(&mut self.records, selected, route);
        if changed > 0 {
            self.touch();
        }
        changed
    }

    /// A sorted view of the records; the set keeps its own order.
    pub fn sorted(&self, state: SortState) -> Vec<DeliveryRecord> {
        sort_records(&self.records, state)
    }

    /// Region totals over the current records.
    pub fn stats(&self, filter: RegionFilter) -> RegionStats {
        aggregate(&self.records, filter)
    }

    /// Serialize for persistence.
    pub fn to_json(&self) -> IngestionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a persisted snapshot.
    ///
    /// A record with a blank driver name fails the whole load. `totalOrders` is stored as its
    /// coerced count and derived metrics are recomputed from the stored counts.
    pub fn from_json(text: &str) -> IngestionResult<Self> {
        let mut set: RecordSet = serde_json::from_str(text).map_err(|e| IngestionError::Snapshot {
            message: e.to_string(),
        })?;
        for (idx, record) in set.records.iter_mut().enumerate() {
            if is_blank(&record.driver_name) {
                return Err(IngestionError::Snapshot {
                    message: format!("record {idx} has a blank driverName"),
                });
            }
            record.total_orders = to_non_negative_int(&record.total_orders).to_string();
            metrics::recompute(record);
        }
        Ok(set)
    }

    fn check_index(&self, index: usize) -> Result<(), RecordError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(RecordError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    fn touch(&mut self) {
        self.version += 1;
        self.produced_at = Utc::now();
    }
}
