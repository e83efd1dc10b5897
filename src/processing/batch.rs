//! Assign one route label to many records at once.

use std::collections::BTreeSet;

use crate::types::DeliveryRecord;

/// Returns a copy of `records` with `route` set on every selected index.
///
/// An empty `route` or an empty selection returns the input unchanged. Out-of-range indices are
/// ignored. No other field is touched, so no metric recomputation happens.
pub fn apply_route(
    records: &[DeliveryRecord],
    selected: &BTreeSet<usize>,
    route: &str,
) -> Vec<DeliveryRecord> {
    let mut out = records.to_vec();
    apply_route_in_place(&mut out, selected, route);
    out
}

/// In-place variant of [`apply_route`]. Returns the number of records changed.
pub fn apply_route_in_place(
    records: &mut [DeliveryRecord],
    selected: &BTreeSet<usize>,
    route: &str,
) -> usize {
    if route.is_empty() || selected.is_empty() {
        return 0;
    }

    let mut changed = 0;
    for &idx in selected {
        if let Some(record) = records.get_mut(idx) {
            record.route = route.to_string();
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Region;

    fn sample() -> Vec<DeliveryRecord> {
        ["Ana", "Bia", "Caio", "Duda"]
            .into_iter()
            .map(|n| DeliveryRecord::unreported("17/10/2026", n, "10", Some(Region::Sp)))
            .collect()
    }

    #[test]
    fn only_selected_routes_change() {
        let input = sample();
        let selected: BTreeSet<usize> = [0, 2].into_iter().collect();
        let out = apply_route(&input, &selected, "R-15");

        assert_eq!(out[0].route(), "R-15");
        assert_eq!(out[2].route(), "R-15");
        assert_eq!(out[1], input[1]);
        assert_eq!(out[3], input[3]);
        for i in [0, 2] {
            assert_eq!(out[i].driver_name(), input[i].driver_name());
            assert_eq!(out[i].pending(), input[i].pending());
        }
        // Original unchanged
        assert_eq!(input[0].route(), "");
    }

    #[test]
    fn empty_route_or_selection_is_a_no_op() {
        let input = sample();
        let selected: BTreeSet<usize> = [1].into_iter().collect();
        assert_eq!(apply_route(&input, &selected, ""), input);
        assert_eq!(apply_route(&input, &BTreeSet::new(), "R-1"), input);
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut records = sample();
        let selected: BTreeSet<usize> = [3, 4, 99].into_iter().collect();
        let changed = apply_route_in_place(&mut records, &selected, "R-2");
        assert_eq!(changed, 1);
        assert_eq!(records[3].route(), "R-2");
        assert_eq!(records.len(), 4);
    }
}
