//! Date arithmetic helpers for the generation pipeline.
//!
//! Everything operates on `chrono::NaiveDate` — the dataset has no
//! notion of time-of-day or timezone.

use crate::rng::StreamRng;
use chrono::{Datelike, Duration, Months, NaiveDate};

/// First day of the month containing `d`.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap()
}

/// `d` shifted forward by `months` calendar months (day-of-month clamped).
pub fn add_months(d: NaiveDate, months: u32) -> NaiveDate {
    d + Months::new(months)
}

/// `d` shifted backward by `months` calendar months (day-of-month clamped).
pub fn sub_months(d: NaiveDate, months: u32) -> NaiveDate {
    d - Months::new(months)
}

/// Last day of the month containing `d`.
pub fn month_end(d: NaiveDate) -> NaiveDate {
    add_months(month_start(d), 1) - Duration::days(1)
}

/// Month-start dates from `month_start(from)` through `month_start(to)`,
/// inclusive. Empty when `to` precedes `from`'s month.
pub fn month_starts(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let mut cursor = month_start(from);
    let last = month_start(to);
    while cursor <= last {
        months.push(cursor);
        cursor = add_months(cursor, 1);
    }
    months
}

/// Uniform date in [start, end], both inclusive. A degenerate range
/// (end before start) clamps to `start`.
pub fn uniform_date(rng: &mut StreamRng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span_days = (end - start).num_days().max(0);
    start + Duration::days(rng.int_between(0, span_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::StreamRng;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_start_and_end() {
        assert_eq!(month_start(d(2024, 2, 17)), d(2024, 2, 1));
        assert_eq!(month_end(d(2024, 2, 17)), d(2024, 2, 29)); // leap year
        assert_eq!(month_end(d(2025, 12, 1)), d(2025, 12, 31));
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(add_months(d(2024, 11, 30), 3), d(2025, 2, 28));
    }

    #[test]
    fn month_starts_is_inclusive_of_both_ends() {
        let months = month_starts(d(2024, 3, 15), d(2024, 6, 2));
        assert_eq!(
            months,
            vec![d(2024, 3, 1), d(2024, 4, 1), d(2024, 5, 1), d(2024, 6, 1)]
        );
    }

    #[test]
    fn month_starts_empty_when_reversed() {
        assert!(month_starts(d(2024, 6, 1), d(2024, 5, 31)).is_empty());
    }

    #[test]
    fn uniform_date_stays_in_bounds() {
        let mut rng = StreamRng::new(3, 0);
        let lo = d(2024, 1, 1);
        let hi = d(2024, 1, 10);
        for _ in 0..1000 {
            let picked = uniform_date(&mut rng, lo, hi);
            assert!(picked >= lo && picked <= hi);
        }
    }

    #[test]
    fn uniform_date_degenerate_range_clamps_to_start() {
        let mut rng = StreamRng::new(3, 0);
        let start = d(2024, 5, 5);
        assert_eq!(uniform_date(&mut rng, start, d(2024, 5, 1)), start);
    }
}
