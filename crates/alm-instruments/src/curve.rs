//! Flat forward discount curve.

use serde::{Deserialize, Serialize};

use alm_core::daycounts::DayCountConvention;
use alm_core::error::{CoreError, CoreResult};
use alm_core::traits::YieldCurve;
use alm_core::types::{Compounding, Date};

/// A flat rate curve anchored at whatever date it is asked to discount to.
///
/// Every projection step values as of a new date; this curve keeps the
/// same rate and simply measures time from the as-of date, so no relinking
/// is needed between steps.
///
/// # Example
///
/// ```rust
/// use alm_core::prelude::*;
/// use alm_instruments::FlatForward;
///
/// let curve = FlatForward::new(0.04).unwrap();
/// let today = Date::from_ymd(2024, 1, 31).unwrap();
/// let df = curve.discount_factor(today, today.add_years(1).unwrap());
/// assert!(df < 1.0 && df > 0.95);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatForward {
    rate: f64,
    #[serde(default)]
    compounding: Compounding,
    #[serde(default)]
    day_count: DayCountConvention,
}

impl FlatForward {
    /// Creates a semi-annually compounded ACT/ACT curve at `rate`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInstrument` for a non-finite rate.
    pub fn new(rate: f64) -> CoreResult<Self> {
        if !rate.is_finite() {
            return Err(CoreError::invalid_instrument(
                "FlatForward",
                format!("rate must be finite, got {rate}"),
            ));
        }
        Ok(Self {
            rate,
            compounding: Compounding::SemiAnnual,
            day_count: DayCountConvention::ActActIsda,
        })
    }

    /// Sets the compounding convention.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the day count used to measure time.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Returns the flat rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the compounding convention.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Returns the day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

impl YieldCurve for FlatForward {
    fn discount_factor(&self, as_of: Date, date: Date) -> f64 {
        let t = self.day_count.year_fraction(as_of, date);
        self.compounding.discount_factor(self.rate, t)
    }
}
