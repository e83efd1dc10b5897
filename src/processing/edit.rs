//! Record creation and field edits.
//!
//! Every write to `delivered` or `failed` goes through here so the derived metrics are
//! recomputed with the updated counts.

use tracing::debug;

use crate::coercion::{is_blank, to_non_negative_int};
use crate::error::RecordError;
use crate::types::{DeliveryRecord, EditableField, Region};

use super::metrics::recompute;

/// Input of the manual "add driver" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDriver {
    pub date: String,
    pub driver_name: String,
    pub route: String,
    pub total_orders: String,
    pub delivered: String,
    pub failed: String,
    pub region: Option<Region>,
}

/// Build a record from a manual entry.
///
/// The driver name is trimmed and must not be blank. `total_orders` is stored as its coerced
/// count so it can never be negative.
pub fn create_driver(input: NewDriver) -> Result<DeliveryRecord, RecordError> {
    let name = input.driver_name.trim();
    if name.is_empty() {
        return Err(RecordError::EmptyDriverName);
    }

    let total = to_non_negative_int(&input.total_orders).to_string();
    let mut record = DeliveryRecord::unreported(input.date, name, total, input.region);
    record.route = input.route;
    record.delivered = input.delivered;
    record.failed = input.failed;
    recompute(&mut record);
    Ok(record)
}

/// Set an editable field on `record`.
///
/// Editing `Delivered` or `Failed` recomputes pending and both percentages; other fields leave
/// them untouched. Renaming to a blank name is rejected and leaves the record unchanged.
pub fn set_field(
    record: &mut DeliveryRecord,
    field: EditableField,
    value: impl Into<String>,
) -> Result<(), RecordError> {
    let value = value.into();
    match field {
        EditableField::DriverName => {
            if is_blank(&value) {
                return Err(RecordError::EmptyDriverName);
            }
            record.driver_name = value.trim().to_string();
        }
        EditableField::Route => record.route = value,
        EditableField::Delivered => record.delivered = value,
        EditableField::Failed => record.failed = value,
    }

    if field.triggers_recompute() {
        recompute(record);
        debug!(
            driver = %record.driver_name,
            pending = %record.pending,
            delivery = %record.delivery_percent,
            "recomputed metrics"
        );
    }
    Ok(())
}
