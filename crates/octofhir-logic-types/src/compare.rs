//! Value comparison under each semantic type

use crate::Value;
use std::cmp::Ordering;

/// Order two values of the same ordered type
///
/// Returns `None` when the values have different types or the type has no
/// ordering (coded).
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Numeric(a), Value::Numeric(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Temporal(a), Value::Temporal(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Check two values for equality; `None` when the types differ
pub fn values_equal(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Coded(a), Value::Coded(b)) => Some(a.equivalent(b)),
        _ => compare_values(left, right).map(Ordering::is_eq),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Code;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_numeric_scale_is_ignored() {
        let a = Value::Numeric(Decimal::new(200, 0));
        let b = Value::Numeric(Decimal::new(2000, 1));
        assert_eq!(compare_values(&a, &b), Some(Ordering::Equal));
    }

    #[test]
    fn test_text_is_lexicographic() {
        let a = Value::Text("apple".into());
        let b = Value::Text("banana".into());
        assert_eq!(compare_values(&a, &b), Some(Ordering::Less));
    }

    #[test]
    fn test_temporal_is_chronological() {
        let jan1 = Value::Temporal(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let jan5 = Value::Temporal(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
        let jan5_noon = Value::Temporal(Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap());

        assert_eq!(compare_values(&jan1, &jan5), Some(Ordering::Less));
        assert_eq!(compare_values(&jan5_noon, &jan5), Some(Ordering::Greater));
        assert_eq!(values_equal(&jan5, &jan5), Some(true));
        assert_eq!(compare_values(&jan1, &Value::Text("2024-01-01".into())), None);
    }

    #[test]
    fn test_coded_has_no_ordering() {
        let a = Value::Coded(Code::new("POS"));
        let b = Value::Coded(Code::new("POS").with_display("Positive"));
        assert_eq!(compare_values(&a, &b), None);
        assert_eq!(values_equal(&a, &b), Some(true));
    }

    #[test]
    fn test_mixed_types_are_incomparable() {
        let a = Value::Numeric(Decimal::ONE);
        let b = Value::Text("1".into());
        assert_eq!(compare_values(&a, &b), None);
        assert_eq!(values_equal(&a, &b), None);
    }

    proptest! {
        #[test]
        fn prop_numeric_ordering_matches_i64(a in any::<i64>(), b in any::<i64>()) {
            let ordering = compare_values(&Value::Numeric(a.into()), &Value::Numeric(b.into()));
            prop_assert_eq!(ordering, Some(a.cmp(&b)));
        }
    }
}
