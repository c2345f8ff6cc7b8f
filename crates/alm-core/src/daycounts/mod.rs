//! Year fractions for accrual and discounting.
//!
//! ```rust
//! use alm_core::daycounts::{DayCount, Act365Fixed};
//! use alm_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//! assert_eq!(Act365Fixed.year_fraction(start, end), 1.0);
//! ```

mod actact;
mod fixed;

pub use actact::ActActIsda;
pub use fixed::{Act360, Act365Fixed};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Date;

/// A day count convention.
pub trait DayCount: Send + Sync {
    /// Market name, e.g. `"ACT/360"`.
    fn name(&self) -> &'static str;

    /// Years from `start` to `end`; negative when `end` is earlier.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Days from `start` to `end` as the convention counts them.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Day count chosen at runtime, e.g. from a config file.
///
/// Serializes as its market name: `day_count = "ACT/365F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// [`Act360`]
    Act360,
    /// [`Act365Fixed`]
    Act365Fixed,
    /// [`ActActIsda`]
    #[default]
    ActActIsda,
}

/// Accepted spellings, compared after upper-casing and dropping spaces.
const ALIASES: &[(&str, DayCountConvention)] = &[
    ("ACT/360", DayCountConvention::Act360),
    ("ACTUAL/360", DayCountConvention::Act360),
    ("ACT360", DayCountConvention::Act360),
    ("ACT/365", DayCountConvention::Act365Fixed),
    ("ACT/365F", DayCountConvention::Act365Fixed),
    ("ACT/365FIXED", DayCountConvention::Act365Fixed),
    ("ACTUAL/365", DayCountConvention::Act365Fixed),
    ("ACTUAL/365FIXED", DayCountConvention::Act365Fixed),
    ("ACT365", DayCountConvention::Act365Fixed),
    ("ACT365FIXED", DayCountConvention::Act365Fixed),
    ("ACT/ACT", DayCountConvention::ActActIsda),
    ("ACT/ACTISDA", DayCountConvention::ActActIsda),
    ("ACTUAL/ACTUAL", DayCountConvention::ActActIsda),
    ("ACTUAL/ACTUALISDA", DayCountConvention::ActActIsda),
    ("ACTACT", DayCountConvention::ActActIsda),
    ("ACTACTISDA", DayCountConvention::ActActIsda),
];

impl DayCountConvention {
    /// Every supported convention.
    pub const ALL: [Self; 3] = [Self::Act360, Self::Act365Fixed, Self::ActActIsda];

    /// The implementation behind this choice.
    #[must_use]
    pub fn day_count(&self) -> &'static dyn DayCount {
        match self {
            Self::Act360 => &Act360,
            Self::Act365Fixed => &Act365Fixed,
            Self::ActActIsda => &ActActIsda,
        }
    }

    /// Market name; also the serialized form.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.day_count().name()
    }

    /// Shorthand for `self.day_count().year_fraction(start, end)`.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count().year_fraction(start, end)
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = DayCountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, convention)| *convention)
            .ok_or_else(|| DayCountParseError(s.to_string()))
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = DayCountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(convention: DayCountConvention) -> Self {
        convention.name().to_string()
    }
}

/// Unrecognized day count name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day count convention: '{0}'")]
pub struct DayCountParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_year_under_each_convention() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 7, 1).unwrap();

        assert_relative_eq!(DayCountConvention::Act360.year_fraction(start, end), 181.0 / 360.0);
        assert_relative_eq!(DayCountConvention::Act365Fixed.year_fraction(start, end), 181.0 / 365.0);
        assert_relative_eq!(DayCountConvention::ActActIsda.year_fraction(start, end), 181.0 / 365.0);
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = DayCountConvention::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["ACT/360", "ACT/365F", "ACT/ACT ISDA"]);
        assert_eq!(DayCountConvention::default(), DayCountConvention::ActActIsda);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("act/360".parse(), Ok(DayCountConvention::Act360));
        assert_eq!("Actual/Actual".parse(), Ok(DayCountConvention::ActActIsda));
        assert_eq!(" ACT365FIXED ".parse(), Ok(DayCountConvention::Act365Fixed));
        assert_eq!("Act/365 Fixed".parse(), Ok(DayCountConvention::Act365Fixed));

        let err = "30/360".parse::<DayCountConvention>().unwrap_err();
        assert!(err.to_string().contains("30/360"));
    }

    #[test]
    fn test_display_parses_back() {
        for convention in DayCountConvention::ALL {
            assert_eq!(convention.to_string().parse(), Ok(convention));
        }
    }

    #[test]
    fn test_serde_uses_market_name() {
        let json = serde_json::to_string(&DayCountConvention::Act365Fixed).unwrap();
        assert_eq!(json, "\"ACT/365F\"");
        let parsed: DayCountConvention = serde_json::from_str("\"actual/360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act360);
    }
}
