//! Core data model types.
//!
//! Ingestion turns [`TabularRow`]s into [`DeliveryRecord`]s; processing derives views
//! ([`RegionStats`], sorted copies) from a record collection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single decoded spreadsheet row: ordered `(column label, cell text)` pairs.
///
/// Labels come from the header row of the source. Only the report column is read by the parser,
/// other cells are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularRow {
    cells: Vec<(String, String)>,
}

impl TabularRow {
    /// Create a row from ordered `(label, text)` pairs.
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Text under `label`, if the row has that column.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Label of the first column.
    pub fn first_label(&self) -> Option<&str> {
        self.cells.first().map(|(l, _)| l.as_str())
    }

    /// Iterate column labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TabularRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Operating region of a driver, derived from the vehicle label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Primary region (default when the vehicle label carries no secondary code).
    #[serde(rename = "SP")]
    Sp,
    /// Secondary region.
    #[serde(rename = "RJ")]
    Rj,
}

impl Region {
    /// Every storable region, primary first.
    pub const ALL: [Region; 2] = [Region::Sp, Region::Rj];

    /// Short region code as shown in reports.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Sp => "SP",
            Region::Rj => "RJ",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Region selector for aggregate queries.
///
/// `All` is a query-only pseudo-region; it is never stored on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    /// Every record, tagged or not.
    #[default]
    All,
    /// Only records tagged with this region.
    Only(Region),
}

impl RegionFilter {
    /// Returns `true` if a record tagged `region` passes this filter.
    pub fn matches(&self, region: Option<Region>) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(r) => region == Some(*r),
        }
    }
}

/// One driver's delivery report for one ingestion batch.
///
/// Counts are kept as text, the way they were entered. `pending`, `delivery_percent` and
/// `route_percent` are always derived from `total_orders`, `delivered` and `failed`; they have no
/// public setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub(crate) date: String,
    pub(crate) driver_name: String,
    #[serde(default)]
    pub(crate) route: String,
    pub(crate) total_orders: String,
    #[serde(default)]
    pub(crate) delivered: String,
    #[serde(default)]
    pub(crate) failed: String,
    #[serde(default)]
    pub(crate) pending: String,
    #[serde(default)]
    pub(crate) delivery_percent: String,
    #[serde(default)]
    pub(crate) route_percent: String,
    #[serde(default)]
    pub(crate) region: Option<Region>,
}

impl DeliveryRecord {
    /// A freshly ingested record: nothing reported yet, so everything is pending.
    pub(crate) fn unreported(
        date: impl Into<String>,
        driver_name: impl Into<String>,
        total_orders: impl Into<String>,
        region: Option<Region>,
    ) -> Self {
        let mut record = Self {
            date: date.into(),
            driver_name: driver_name.into(),
            route: String::new(),
            total_orders: total_orders.into(),
            delivered: String::new(),
            failed: String::new(),
            pending: String::new(),
            delivery_percent: String::new(),
            route_percent: String::new(),
            region,
        };
        crate::processing::metrics::recompute(&mut record);
        record
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn total_orders(&self) -> &str {
        &self.total_orders
    }

    /// Delivered count as entered; empty means "not yet reported".
    pub fn delivered(&self) -> &str {
        &self.delivered
    }

    /// Failed count as entered; empty means "not yet reported".
    pub fn failed(&self) -> &str {
        &self.failed
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn delivery_percent(&self) -> &str {
        &self.delivery_percent
    }

    pub fn route_percent(&self) -> &str {
        &self.route_percent
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Text value of `field`. An untagged region reads as the empty string.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Date => &self.date,
            RecordField::DriverName => &self.driver_name,
            RecordField::Route => &self.route,
            RecordField::TotalOrders => &self.total_orders,
            RecordField::Delivered => &self.delivered,
            RecordField::Failed => &self.failed,
            RecordField::Pending => &self.pending,
            RecordField::DeliveryPercent => &self.delivery_percent,
            RecordField::RoutePercent => &self.route_percent,
            RecordField::Region => self.region.map(|r| r.code()).unwrap_or(""),
        }
    }
}

/// The closed set of readable [`DeliveryRecord`] fields.
///
/// Used for sorting and generic display; names match the serialized keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Date,
    DriverName,
    Route,
    TotalOrders,
    Delivered,
    Failed,
    Pending,
    DeliveryPercent,
    RoutePercent,
    Region,
}

impl RecordField {
    /// All fields in serialized order.
    pub const ALL: [RecordField; 10] = [
        RecordField::Date,
        RecordField::DriverName,
        RecordField::Route,
        RecordField::TotalOrders,
        RecordField::Delivered,
        RecordField::Failed,
        RecordField::Pending,
        RecordField::DeliveryPercent,
        RecordField::RoutePercent,
        RecordField::Region,
    ];

    /// Serialized key of the field.
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::Date => "date",
            RecordField::DriverName => "driverName",
            RecordField::Route => "route",
            RecordField::TotalOrders => "totalOrders",
            RecordField::Delivered => "delivered",
            RecordField::Failed => "failed",
            RecordField::Pending => "pending",
            RecordField::DeliveryPercent => "deliveryPercent",
            RecordField::RoutePercent => "routePercent",
            RecordField::Region => "region",
        }
    }

    /// Returns `true` for fields computed by [`crate::processing::metrics`].
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            RecordField::Pending | RecordField::DeliveryPercent | RecordField::RoutePercent
        )
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown record field '{s}'"))
    }
}

/// Fields a caller may edit after creation.
///
/// Editing `Delivered` or `Failed` recomputes the derived metrics; the others never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    DriverName,
    Route,
    Delivered,
    Failed,
}

impl EditableField {
    /// Returns `true` if editing this field must recompute the derived metrics.
    pub fn triggers_recompute(&self) -> bool {
        matches!(self, EditableField::Delivered | EditableField::Failed)
    }
}

impl From<EditableField> for RecordField {
    fn from(f: EditableField) -> Self {
        match f {
            EditableField::DriverName => RecordField::DriverName,
            EditableField::Route => RecordField::Route,
            EditableField::Delivered => RecordField::Delivered,
            EditableField::Failed => RecordField::Failed,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Caller-owned sort selection.
///
/// With no field set, sorting keeps the input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<RecordField>,
    pub direction: SortDirection,
}

impl SortState {
    /// Sort state after the user selects `field`.
    ///
    /// Selecting the current field again flips the direction; any other field starts ascending.
    pub fn toggle(self, field: RecordField) -> Self {
        if self.field == Some(field) {
            Self {
                field: Some(field),
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field: Some(field),
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// Summed counts for a region query. Recomputed per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionStats {
    pub total_orders: u64,
    pub delivered: u64,
    pub failed: u64,
    /// `delivered / total_orders`, formatted like a record's delivery percent.
    pub delivery_percent: String,
}

impl RegionStats {
    /// Build stats from summed counts, deriving the percentage.
    pub fn from_totals(total_orders: u64, delivered: u64, failed: u64) -> Self {
        let delivery_percent = if total_orders > 0 {
            crate::processing::metrics::format_percent(delivered as f64 / total_orders as f64 * 100.0)
        } else {
            crate::processing::metrics::ZERO_PERCENT.to_string()
        };
        Self {
            total_orders,
            delivered,
            failed,
            delivery_percent,
        }
    }

    /// Element-wise sum of two stats, percentage re-derived from the sums.
    pub fn merge(&self, other: &RegionStats) -> Self {
        Self::from_totals(
            self.total_orders.saturating_add(other.total_orders),
            self.delivered.saturating_add(other.delivered),
            self.failed.saturating_add(other.failed),
        )
    }
}

impl Default for RegionStats {
    fn default() -> Self {
        Self::from_totals(0, 0, 0)
    }
}
