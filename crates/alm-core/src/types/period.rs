//! Calendar periods (tenors and time steps).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A calendar period such as `1M`, `6M` or `10Y`.
///
/// Used both as an instrument tenor and as the projection time step.
/// Serializes as its string form, so configuration files can write
/// `step = "1M"`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// Days
    Days(i32),
    /// Weeks
    Weeks(i32),
    /// Months
    Months(i32),
    /// Years
    Years(i32),
}

impl Period {
    /// Returns the signed length in the period's own unit.
    #[must_use]
    pub fn length(&self) -> i32 {
        match *self {
            Period::Days(n) | Period::Weeks(n) | Period::Months(n) | Period::Years(n) => n,
        }
    }

    /// Returns true if the period moves a date forward.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.length() > 0
    }

    /// Returns the same period pointing the other way.
    #[must_use]
    pub fn negated(self) -> Self {
        match self {
            Period::Days(n) => Period::Days(-n),
            Period::Weeks(n) => Period::Weeks(-n),
            Period::Months(n) => Period::Months(-n),
            Period::Years(n) => Period::Years(-n),
        }
    }

    /// Returns the length in months, if the period is month based.
    #[must_use]
    pub fn months(&self) -> Option<i32> {
        match *self {
            Period::Months(n) => Some(n),
            Period::Years(n) => Some(n * 12),
            Period::Days(_) | Period::Weeks(_) => None,
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    /// Parses strings like `"3D"`, `"2W"`, `"6M"` or `"10Y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_uppercase();
        if s.len() < 2 {
            return Err(CoreError::invalid_period(format!("'{s}' is too short")));
        }

        let (num_str, unit) = s.split_at(s.len() - 1);
        let num: i32 = num_str
            .parse()
            .map_err(|_| CoreError::invalid_period(format!("invalid length: {num_str}")))?;

        match unit {
            "D" => Ok(Period::Days(num)),
            "W" => Ok(Period::Weeks(num)),
            "M" => Ok(Period::Months(num)),
            "Y" => Ok(Period::Years(num)),
            _ => Err(CoreError::invalid_period(format!("invalid unit: {unit}"))),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Days(d) => write!(f, "{}D", d),
            Period::Weeks(w) => write!(f, "{}W", w),
            Period::Months(m) => write!(f, "{}M", m),
            Period::Years(y) => write!(f, "{}Y", y),
        }
    }
}
