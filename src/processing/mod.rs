//! Operations over a record collection.
//!
//! Everything here is a pure function of its inputs; the collection itself is owned by the
//! caller (see [`crate::collection::RecordSet`] for a ready-made owner).
//!
//! - [`metrics`]: derived pending count and percentages, plus performance banding
//! - [`edit`]: manual driver creation and field edits (recomputing metrics when counts change)
//! - [`aggregate()`]: per-region totals
//! - [`sort`]: type-aware comparator and stable sort
//! - [`apply_route()`]: batch route assignment
//!
//! ## Example: edit → aggregate → sort
//!
//! ```rust
//! use route_report_metrics::processing::{aggregate, create_driver, set_field, sort_records, NewDriver};
//! use route_report_metrics::types::{EditableField, RecordField, Region, RegionFilter, SortState};
//!
//! let mut ana = create_driver(NewDriver {
//!     date: "17/10/2026".to_string(),
//!     driver_name: "Ana".to_string(),
//!     total_orders: "50".to_string(),
//!     region: Some(Region::Sp),
//!     ..Default::default()
//! })
//! .unwrap();
//! set_field(&mut ana, EditableField::Delivered, "49").unwrap();
//! assert_eq!(ana.delivery_percent(), "98%");
//! assert_eq!(ana.pending(), "1");
//!
//! let records = vec![ana];
//! let stats = aggregate(&records, RegionFilter::Only(Region::Sp));
//! assert_eq!(stats.delivery_percent, "98%");
//!
//! let sorted = sort_records(&records, SortState::default().toggle(RecordField::DriverName));
//! assert_eq!(sorted.len(), 1);
//! ```

pub mod aggregate;
pub mod batch;
pub mod edit;
pub mod metrics;
pub mod sort;

pub use aggregate::{aggregate, aggregate_by_region};
pub use batch::{apply_route, apply_route_in_place};
pub use edit::{create_driver, set_field, NewDriver};
pub use metrics::{
    classify_percent, compute_delivery_percent, compute_pending, compute_route_percent, PercentKind,
    PerformanceBand,
};
pub use sort::{compare, compare_values, sort_records, sort_records_in_place, SortKey};
