//! Calendar dates.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::Period;
use crate::error::{CoreError, CoreResult};

/// A calendar date, stored as a `chrono::NaiveDate`.
///
/// Month and year arithmetic clamps to the last day of the target month,
/// so stepping is not reversible across short months:
///
/// ```rust
/// use alm_core::types::{Date, Period};
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_period(Period::Months(1)).unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// # Errors
    ///
    /// `CoreError::InvalidDate` for impossible dates such as 30 February.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 366 in leap years, otherwise 365.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.0.leap_year() {
            366
        } else {
            365
        }
    }

    /// Shifts by a signed number of days.
    ///
    /// Saturates at chrono's representable range.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        Date(shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN }))
    }

    /// Shifts by a signed number of months, clamping the day to month end.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidDate` if the result leaves chrono's range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let step = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(step)
        } else {
            self.0.checked_sub_months(step)
        };
        shifted
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} shifted by {months} months")))
    }

    /// Same as twelve times as many months; 29 February lands on 28 February.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidDate` if the result leaves chrono's range.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} shifted by {years} years")))?;
        self.add_months(months)
    }

    /// Advances by a [`Period`].
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidDate` if the result leaves chrono's range.
    pub fn add_period(&self, period: Period) -> CoreResult<Self> {
        match period {
            Period::Days(n) => Ok(self.add_days(i64::from(n))),
            Period::Weeks(n) => Ok(self.add_days(7 * i64::from(n))),
            Period::Months(n) => self.add_months(n),
            Period::Years(n) => self.add_years(n),
        }
    }

    /// Moves back by a [`Period`].
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidDate` if the result leaves chrono's range.
    pub fn sub_period(&self, period: Period) -> CoreResult<Self> {
        self.add_period(period.negated())
    }

    /// Signed calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl FromStr for Date {
    type Err = CoreError;

    /// ISO `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| CoreError::invalid_date(format!("'{s}': {e}")))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Add<i64> for Date {
    type Output = Self;

    fn add(self, days: i64) -> Self {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    fn sub(self, days: i64) -> Self {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    fn sub(self, earlier: Date) -> i64 {
        earlier.days_between(&self)
    }
}
