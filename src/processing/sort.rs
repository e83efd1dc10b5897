//! Field-keyed, type-aware record ordering.
//!
//! Each cell maps to a [`SortKey`]: blank, numeric (after dropping a `%` suffix), or text compared
//! case- and accent-insensitively. Keys order blank < numeric < text, which keeps the order total
//! when a column mixes numbers and labels. Sorting is stable so ingestion order survives among
//! equal keys.

use std::cmp::Ordering;

use crate::types::{DeliveryRecord, RecordField, SortDirection, SortState};

/// Compare two records on `field` in `direction`.
///
/// With no field, every pair compares equal (so a stable sort keeps input order).
pub fn compare(
    a: &DeliveryRecord,
    b: &DeliveryRecord,
    field: Option<RecordField>,
    direction: SortDirection,
) -> Ordering {
    let Some(field) = field else {
        return Ordering::Equal;
    };

    let ord = compare_values(a.field(field), b.field(field));
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Compare two cell texts the way [`compare`] does, ascending.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}

/// Ordering key of one cell.
#[derive(Debug, Clone)]
pub enum SortKey<'a> {
    /// Empty or whitespace-only text, keeping the raw text as tie-break.
    Blank(&'a str),
    /// A finite number, with any `%` suffix dropped.
    Num(f64),
    /// Collation key plus the raw text as tie-break.
    Text(String, &'a str),
}

impl<'a> SortKey<'a> {
    /// Classify `cell`.
    pub fn of(cell: &'a str) -> Self {
        if cell.trim().is_empty() {
            return Self::Blank(cell);
        }
        match parse_number(strip_percent(cell)) {
            Some(n) => Self::Num(n),
            None => Self::Text(collation_key(cell), cell),
        }
    }

    fn tier(&self) -> u8 {
        match self {
            Self::Blank(_) => 0,
            Self::Num(_) => 1,
            Self::Text(..) => 2,
        }
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Blank(a), Self::Blank(b)) => a.cmp(b),
            (Self::Num(a), Self::Num(b)) => a.total_cmp(b),
            (Self::Text(ka, ra), Self::Text(kb, rb)) => ka.cmp(kb).then_with(|| ra.cmp(rb)),
            _ => self.tier().cmp(&other.tier()),
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey<'_> {}

/// A sorted copy of `records`. The input is left untouched.
pub fn sort_records(records: &[DeliveryRecord], state: SortState) -> Vec<DeliveryRecord> {
    let mut out = records.to_vec();
    sort_records_in_place(&mut out, state);
    out
}

/// Stable in-place sort of `records` by `state`.
pub fn sort_records_in_place(records: &mut [DeliveryRecord], state: SortState) {
    if state.field.is_none() {
        return;
    }
    records.sort_by(|a, b| compare(a, b, state.field, state.direction));
}

fn strip_percent(s: &str) -> &str {
    s.strip_suffix('%').unwrap_or(s)
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// Primary-strength key: lowercase with Latin accents folded.
fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::edit::{set_field, NewDriver, create_driver};
    use crate::types::{EditableField, Region};

    fn rec(name: &str, route: &str, total: &str, delivered: &str) -> DeliveryRecord {
        let mut r = create_driver(NewDriver {
            date: "17/10/2026".to_string(),
            driver_name: name.to_string(),
            route: route.to_string(),
            total_orders: total.to_string(),
            region: Some(Region::Sp),
            ..Default::default()
        })
        .unwrap();
        set_field(&mut r, EditableField::Delivered, delivered).unwrap();
        r
    }

    fn names(records: &[DeliveryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.driver_name()).collect()
    }

    fn sample() -> Vec<DeliveryRecord> {
        vec![
            rec("Marcos", "10", "50", "49"),
            rec("ana", "9", "10", "10"),
            rec("Álvaro", "100", "40", "30"),
            rec("Bruno", "9", "8", "7"),
        ]
    }

    #[test]
    fn numeric_fields_sort_by_magnitude() {
        let out = sort_records(&sample(), SortState::default().toggle(RecordField::Route));
        assert_eq!(names(&out), vec!["ana", "Bruno", "Marcos", "Álvaro"]);
    }

    #[test]
    fn percentages_sort_by_value_not_lexically() {
        // 98%, 100%, 75%, 87.5%
        let out = sort_records(&sample(), SortState::default().toggle(RecordField::DeliveryPercent));
        assert_eq!(names(&out), vec!["Álvaro", "Bruno", "Marcos", "ana"]);
    }

    #[test]
    fn text_sorts_case_and_accent_insensitively() {
        let out = sort_records(&sample(), SortState::default().toggle(RecordField::DriverName));
        assert_eq!(names(&out), vec!["Álvaro", "ana", "Bruno", "Marcos"]);
    }

    #[test]
    fn descending_reverses_order() {
        let state = SortState::default()
            .toggle(RecordField::TotalOrders)
            .toggle(RecordField::TotalOrders);
        assert_eq!(state.direction, SortDirection::Descending);
        let out = sort_records(&sample(), state);
        assert_eq!(names(&out), vec!["Marcos", "Álvaro", "ana", "Bruno"]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let asc = SortState::default().toggle(RecordField::Route);
        let out = sort_records(&sample(), asc);
        // "ana" and "Bruno" share route 9.
        assert_eq!(&names(&out)[..2], &["ana", "Bruno"]);

        let desc = asc.toggle(RecordField::Route);
        let out = sort_records(&sample(), desc);
        assert_eq!(&names(&out)[2..], &["ana", "Bruno"]);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let state = SortState::default().toggle(RecordField::Pending);
        let once = sort_records(&sample(), state);
        let twice = sort_records(&once, state);
        assert_eq!(once, twice);
    }

    #[test]
    fn unset_field_returns_input_unchanged() {
        let input = sample();
        let out = sort_records(&input, SortState::default());
        assert_eq!(out, input);
        assert_eq!(
            compare(&input[0], &input[1], None, SortDirection::Descending),
            Ordering::Equal
        );
    }

    #[test]
    fn mixed_cells_order_blank_then_numbers_then_text() {
        assert_eq!(compare_values("10", "9"), Ordering::Greater);
        assert_eq!(compare_values("10", "abc"), Ordering::Less);
        assert_eq!(compare_values("", "5"), Ordering::Less);
        assert_eq!(compare_values(" ", ""), Ordering::Greater);
        assert_eq!(compare_values("9.5%", "10%"), Ordering::Less);
        assert_eq!(compare_values("0%", "0"), Ordering::Equal);
        assert_eq!(compare_values("Rota 2", "rota 2"), Ordering::Less);
    }

    #[test]
    fn numeric_and_alphanumeric_labels_do_not_cycle() {
        assert_eq!(compare_values("9", "10"), Ordering::Less);
        assert_eq!(compare_values("10", "5A"), Ordering::Less);
        assert_eq!(compare_values("9", "5A"), Ordering::Less);
    }

    #[test]
    fn shuffled_mixed_routes_sort_into_a_consistent_order() {
        const LABELS: [&str; 14] = [
            "10", "9", "5A", "100", "2B", "33", "7", "1C", "80", "4", "R-15", "0", "", "12.5%",
        ];
        let asc = SortState::default().toggle(RecordField::Route);
        let desc = asc.toggle(RecordField::Route);

        // Deterministic shuffles from a small LCG.
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for round in 0..300 {
            let records: Vec<DeliveryRecord> = (0..LABELS.len() * 3)
                .map(|i| {
                    seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
                    let label = LABELS[(seed >> 33) as usize % LABELS.len()];
                    rec(&format!("m{round}-{i}"), label, "1", "1")
                })
                .collect();

            for state in [asc, desc] {
                let out = sort_records(&records, state);
                assert_eq!(out.len(), records.len());
                for pair in out.windows(2) {
                    assert_ne!(
                        compare(&pair[0], &pair[1], state.field, state.direction),
                        Ordering::Greater,
                        "{:?} before {:?}",
                        pair[0].route(),
                        pair[1].route()
                    );
                }
            }
        }
    }
}
