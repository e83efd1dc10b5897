//! Region summaries over a record collection.

use crate::coercion::to_non_negative_int;
use crate::types::{DeliveryRecord, Region, RegionFilter, RegionStats};

/// Sum orders, deliveries and failures of the records selected by `filter`.
///
/// Counts are coerced leniently: an unparsable cell adds 0 but its record is still included.
pub fn aggregate(records: &[DeliveryRecord], filter: RegionFilter) -> RegionStats {
    let (total, delivered, failed) = records
        .iter()
        .filter(|r| filter.matches(r.region()))
        .fold((0u64, 0u64, 0u64), |(t, d, f), r| {
            (
                t.saturating_add(to_non_negative_int(r.total_orders())),
                d.saturating_add(to_non_negative_int(r.delivered())),
                f.saturating_add(to_non_negative_int(r.failed())),
            )
        });

    RegionStats::from_totals(total, delivered, failed)
}

/// Stats for every storable region, in [`Region::ALL`] order.
pub fn aggregate_by_region(records: &[DeliveryRecord]) -> Vec<(Region, RegionStats)> {
    Region::ALL
        .into_iter()
        .map(|region| (region, aggregate(records, RegionFilter::Only(region))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::edit::{set_field, NewDriver, create_driver};
    use crate::types::EditableField;

    fn record(total: &str, delivered: &str, failed: &str, region: Option<Region>) -> DeliveryRecord {
        let mut r = DeliveryRecord::unreported("17/10/2026", "X", total, region);
        set_field(&mut r, EditableField::Delivered, delivered).unwrap();
        set_field(&mut r, EditableField::Failed, failed).unwrap();
        r
    }

    fn sample() -> Vec<DeliveryRecord> {
        vec![
            record("42", "40", "1", Some(Region::Rj)),
            record("10", "9", "", Some(Region::Sp)),
            record("20", "", "", Some(Region::Sp)),
            record("abc", "5", "zz", Some(Region::Rj)),
        ]
    }

    #[test]
    fn aggregate_single_region() {
        let stats = aggregate(&sample(), RegionFilter::Only(Region::Sp));
        assert_eq!(stats.total_orders, 30);
        assert_eq!(stats.delivered, 9);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.delivery_percent, "30%");
    }

    #[test]
    fn unparsable_counts_add_zero_but_keep_the_record() {
        let stats = aggregate(&sample(), RegionFilter::Only(Region::Rj));
        assert_eq!(stats.total_orders, 42);
        assert_eq!(stats.delivered, 45);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.delivery_percent, "107.1%");
    }

    #[test]
    fn all_regions_equals_sum_of_each_region() {
        let records = sample();
        let all = aggregate(&records, RegionFilter::All);
        let summed = aggregate_by_region(&records)
            .iter()
            .fold(RegionStats::default(), |acc, (_, s)| acc.merge(s));
        assert_eq!(all, summed);
    }

    #[test]
    fn empty_selection_is_zero_percent() {
        let stats = aggregate(&[], RegionFilter::All);
        assert_eq!(stats, RegionStats::from_totals(0, 0, 0));
        assert_eq!(stats.delivery_percent, "0%");

        let only_sp = vec![record("0", "0", "0", Some(Region::Sp))];
        assert_eq!(aggregate(&only_sp, RegionFilter::Only(Region::Rj)).delivery_percent, "0%");
        assert_eq!(aggregate(&only_sp, RegionFilter::All).delivery_percent, "0%");
    }

    #[test]
    fn manually_created_records_aggregate_like_parsed_ones() {
        let manual = create_driver(NewDriver {
            date: "17/10/2026".to_string(),
            driver_name: "Bia".to_string(),
            route: "12".to_string(),
            total_orders: "50".to_string(),
            delivered: "49".to_string(),
            failed: "1".to_string(),
            region: Some(Region::Sp),
        })
        .unwrap();
        let stats = aggregate(&[manual], RegionFilter::Only(Region::Sp));
        assert_eq!(stats.delivery_percent, "98%");
    }
}
