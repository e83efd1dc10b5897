//! Lenient text → count coercion shared by every metric computation.

/// Parse the leading integer of `text` as a non-negative count.
///
/// Leading whitespace and an optional sign are accepted, then the longest run of ASCII digits is
/// read (`"12 pedidos"` → 12, `"3.9"` → 3). Returns 0 when there is no digit run, or the value is
/// negative. Runs too large for `u64` saturate.
///
/// Never fails.
pub fn to_non_negative_int(text: &str) -> u64 {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if run.is_empty() || negative {
        return 0;
    }

    run.parse::<u64>().unwrap_or(u64::MAX)
}

/// Returns `true` if `text` is empty or only whitespace.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::to_non_negative_int;

    #[test]
    fn parses_plain_and_padded_integers() {
        assert_eq!(to_non_negative_int("42"), 42);
        assert_eq!(to_non_negative_int("  7"), 7);
        assert_eq!(to_non_negative_int("+5"), 5);
        assert_eq!(to_non_negative_int("007"), 7);
    }

    #[test]
    fn reads_only_the_leading_digit_run() {
        assert_eq!(to_non_negative_int("12 pedidos"), 12);
        assert_eq!(to_non_negative_int("3.9"), 3);
        assert_eq!(to_non_negative_int("98%"), 98);
    }

    #[test]
    fn garbage_empty_and_negative_become_zero() {
        assert_eq!(to_non_negative_int(""), 0);
        assert_eq!(to_non_negative_int("   "), 0);
        assert_eq!(to_non_negative_int("abc"), 0);
        assert_eq!(to_non_negative_int("x12"), 0);
        assert_eq!(to_non_negative_int("-3"), 0);
        assert_eq!(to_non_negative_int("-"), 0);
    }

    #[test]
    fn oversized_runs_saturate() {
        assert_eq!(to_non_negative_int("99999999999999999999999"), u64::MAX);
    }
}
