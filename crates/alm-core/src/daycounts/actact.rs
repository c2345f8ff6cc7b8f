//! Actual/Actual (ISDA).

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA.
///
/// Days in each calendar year are divided by that year's length
/// (365 or 366) and the pieces are summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl ActActIsda {
    /// Fraction of `from`'s calendar year elapsed by `to`, both in the same year
    /// or `to` being the following 1 January.
    fn within_year(from: Date, to: Date) -> f64 {
        from.days_between(&to) as f64 / f64::from(from.days_in_year())
    }
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start > end {
            return -self.year_fraction(end, start);
        }
        if start.year() == end.year() {
            return Self::within_year(start, end);
        }

        let first_boundary = Date::from_ymd(start.year() + 1, 1, 1).unwrap_or(end);
        let last_boundary = Date::from_ymd(end.year(), 1, 1).unwrap_or(first_boundary);
        let whole_years = f64::from(end.year() - start.year() - 1);

        Self::within_year(start, first_boundary)
            + whole_years
            + Self::within_year(last_boundary, end)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_years_are_one() {
        assert_relative_eq!(ActActIsda.year_fraction(ymd(2025, 1, 1), ymd(2026, 1, 1)), 1.0);
        assert_relative_eq!(ActActIsda.year_fraction(ymd(2024, 1, 1), ymd(2025, 1, 1)), 1.0);
        assert_relative_eq!(ActActIsda.year_fraction(ymd(2020, 1, 1), ymd(2030, 1, 1)), 10.0);
    }

    #[test]
    fn test_split_across_leap_boundary() {
        // 184 days of 2024, 181 of 2025
        let yf = ActActIsda.year_fraction(ymd(2024, 7, 1), ymd(2025, 7, 1));
        assert_relative_eq!(yf, 184.0 / 366.0 + 181.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_multi_year_span() {
        let yf = ActActIsda.year_fraction(ymd(2023, 12, 1), ymd(2026, 2, 1));
        let expected = 31.0 / 365.0 + 2.0 + 31.0 / 365.0;
        assert_relative_eq!(yf, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_same_day_and_reversed() {
        let d = ymd(2024, 2, 29);
        assert_eq!(ActActIsda.year_fraction(d, d), 0.0);
        let (a, b) = (ymd(2024, 7, 1), ymd(2025, 7, 1));
        assert_relative_eq!(ActActIsda.year_fraction(b, a), -ActActIsda.year_fraction(a, b));
    }
}
