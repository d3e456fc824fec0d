//! Field-level merge rules for combining an observation with a master record.
//!
//! Each function is total over its domain and independent of the others.

use chrono::NaiveDate;

/// Combine two severities. A missing measurement defers to the other side;
/// two measurements are averaged.
pub fn merge_severity(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    // ---
    match (a, b) {
        (None, other) | (other, None) => other,
        (Some(a), Some(b)) => Some((a + b) / 2.0),
    }
}

/// Earliest and latest of the new date and the existing range.
pub fn merge_date_range(
    new_date: NaiveDate,
    first_seen: NaiveDate,
    last_seen: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    // ---
    (
        new_date.min(first_seen).min(last_seen),
        new_date.max(first_seen).max(last_seen),
    )
}

/// Verification is sticky: once either side is verified the result is.
pub fn merge_verification(a: bool, b: bool) -> bool {
    a || b
}

/// Only unverified observations count as an additional occurrence.
pub fn merge_occurrence(existing_count: u32, observation_verified: bool) -> u32 {
    // ---
    if observation_verified {
        existing_count
    } else {
        existing_count + 1
    }
}

/// Plain arithmetic mean of two headings, no wraparound at 0/360.
pub fn merge_heading(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn date(m: u32, d: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_severity_merge() {
        // ---
        assert_eq!(merge_severity(None, None), None);
        assert_eq!(merge_severity(None, Some(4.0)), Some(4.0));
        assert_eq!(merge_severity(Some(4.0), None), Some(4.0));
        assert_eq!(merge_severity(Some(5.0), Some(7.0)), Some(6.0));
        assert_eq!(merge_severity(Some(0.0), Some(3.0)), Some(1.5));

        // Zero is a measurement, not "missing"
        assert_eq!(merge_severity(Some(0.0), None), Some(0.0));
    }

    #[test]
    fn test_date_range_contains_inputs() {
        // ---
        let cases = [
            (date(3, 1, 2019), date(1, 1, 2019), date(2, 1, 2019)),
            (date(1, 1, 2018), date(1, 1, 2019), date(2, 1, 2019)),
            (date(1, 15, 2019), date(1, 1, 2019), date(2, 1, 2019)),
            (date(1, 1, 2019), date(1, 1, 2019), date(1, 1, 2019)),
        ];

        for (new, first, last) in cases {
            let (lo, hi) = merge_date_range(new, first, last);
            for d in [new, first, last] {
                assert!(lo <= d && d <= hi, "{d} outside [{lo}, {hi}]");
            }
            assert!([new, first, last].contains(&lo));
            assert!([new, first, last].contains(&hi));
        }

        assert_eq!(
            merge_date_range(date(3, 1, 2019), date(1, 1, 2019), date(2, 1, 2019)),
            (date(1, 1, 2019), date(3, 1, 2019))
        );
    }

    #[test]
    fn test_date_range_uses_calendar_order() {
        // ---
        // As strings "12/31/2018" > "01/01/2019"; as dates it is earlier
        let (lo, hi) = merge_date_range(date(12, 31, 2018), date(1, 1, 2019), date(1, 1, 2019));
        assert_eq!(lo, date(12, 31, 2018));
        assert_eq!(hi, date(1, 1, 2019));
    }

    #[test]
    fn test_verification_is_sticky() {
        // ---
        assert!(!merge_verification(false, false));
        assert!(merge_verification(true, false));
        assert!(merge_verification(false, true));
        assert!(merge_verification(true, true));
    }

    #[test]
    fn test_occurrence() {
        // ---
        assert_eq!(merge_occurrence(3, true), 3);
        assert_eq!(merge_occurrence(3, false), 4);
        assert_eq!(merge_occurrence(0, false), 1);
    }

    #[test]
    fn test_heading_is_linear_mean() {
        // ---
        assert_eq!(merge_heading(90.0, 95.0), 92.5);
        // No wraparound: 350 and 10 average to 180, not 0
        assert_eq!(merge_heading(350.0, 10.0), 180.0);
    }
}
