//! Coupon frequency and rate compounding.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Period;

/// How often a coupon instrument pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Once a year
    Annual,
    /// Twice a year
    #[default]
    SemiAnnual,
    /// Four times a year
    Quarterly,
    /// Every month
    Monthly,
    /// Principal only, no coupons
    Zero,
}

impl Frequency {
    /// Coupons per year; 0 for [`Frequency::Zero`].
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Zero => 0,
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Coupon period length, or `None` when nothing is paid periodically.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        match self.periods_per_year() {
            0 => None,
            n => Some(Period::Months((12 / n) as i32)),
        }
    }

    /// True for principal-only instruments.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Frequency::Zero
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Frequency::Annual => "annual",
            Frequency::SemiAnnual => "semi-annual",
            Frequency::Quarterly => "quarterly",
            Frequency::Monthly => "monthly",
            Frequency::Zero => "zero",
        })
    }
}

/// How a quoted rate turns into a discount factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    /// `1 / (1 + r t)`
    Simple,
    /// Once a year
    Annual,
    /// Twice a year
    #[default]
    SemiAnnual,
    /// Four times a year
    Quarterly,
    /// Twelve times a year
    Monthly,
    /// `exp(-r t)`
    Continuous,
}

impl Compounding {
    /// Compounding periods per year, or `None` for simple and continuous.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Compounding::Simple | Compounding::Continuous => None,
            Compounding::Annual => Some(1),
            Compounding::SemiAnnual => Some(2),
            Compounding::Quarterly => Some(4),
            Compounding::Monthly => Some(12),
        }
    }

    /// Discount factor for `rate` over a year fraction `t`.
    ///
    /// Periodic compounding with `m` periods gives `(1 + r / m)^(-m t)`.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        match (self, self.periods_per_year()) {
            (_, Some(m)) => {
                let m = f64::from(m);
                (1.0 + rate / m).powf(-m * t)
            }
            (Compounding::Continuous, None) => (-rate * t).exp(),
            (_, None) => 1.0 / (1.0 + rate * t),
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.periods_per_year() {
            Some(n) => write!(f, "compounded {n}x/year"),
            None if *self == Compounding::Continuous => f.write_str("continuous"),
            None => f.write_str("simple"),
        }
    }
}
