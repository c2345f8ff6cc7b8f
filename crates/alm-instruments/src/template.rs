//! Fixed rate bond family, used to buy new bonds during a projection.

use std::fmt;
use std::sync::Arc;

use alm_core::daycounts::DayCountConvention;
use alm_core::error::{CoreError, CoreResult};
use alm_core::traits::{Instrument, InstrumentFamily, YieldCurve};
use alm_core::types::{Date, Frequency, Period};

use crate::bond::FixedRateBond;

/// Builds fixed rate bonds issued on the as-of date and maturing one
/// tenor later, with face equal to the requested notional.
///
/// Value is linear and increasing in notional for any positive coupon or
/// discount factor, which keeps calibration well posed.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use alm_core::prelude::*;
/// use alm_instruments::{FixedRateBondTemplate, FlatForward};
///
/// let curve = Arc::new(FlatForward::new(0.04).unwrap());
/// let family = FixedRateBondTemplate::new(Period::Years(10), 0.05, curve).unwrap();
///
/// let as_of = Date::from_ymd(2024, 1, 31).unwrap();
/// let bond = family.build(1_000.0, as_of).unwrap();
/// assert!(bond.present_value(as_of) > 1_000.0);
/// ```
#[derive(Clone)]
pub struct FixedRateBondTemplate {
    name: String,
    tenor: Period,
    coupon_rate: f64,
    frequency: Frequency,
    day_count: DayCountConvention,
    curve: Arc<dyn YieldCurve>,
}

impl FixedRateBondTemplate {
    /// Creates a semi-annual ACT/ACT ISDA family.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInstrument` if the tenor is not positive
    /// or the coupon rate is negative or non-finite.
    pub fn new(tenor: Period, coupon_rate: f64, curve: Arc<dyn YieldCurve>) -> CoreResult<Self> {
        let name = format!("{tenor} {:.2}% fixed", coupon_rate * 100.0);
        if !tenor.is_positive() {
            return Err(CoreError::invalid_instrument(
                name,
                format!("tenor must be positive, got {tenor}"),
            ));
        }
        if !(coupon_rate.is_finite() && coupon_rate >= 0.0) {
            return Err(CoreError::invalid_instrument(
                name,
                format!("coupon rate must be non-negative, got {coupon_rate}"),
            ));
        }

        Ok(Self {
            name,
            tenor,
            coupon_rate,
            frequency: Frequency::SemiAnnual,
            day_count: DayCountConvention::ActActIsda,
            curve,
        })
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the accrual day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Overrides the family name shown in logs and errors.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Tenor of each new bond.
    #[must_use]
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Coupon rate of each new bond.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Builds the concrete bond, keeping its type.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInstrument` for a negative or non-finite
    /// notional, or if the maturity date cannot be formed.
    pub fn build_bond(&self, notional: f64, as_of: Date) -> CoreResult<FixedRateBond> {
        if !(notional.is_finite() && notional >= 0.0) {
            return Err(CoreError::invalid_instrument(
                self.name.clone(),
                format!("notional must be non-negative, got {notional}"),
            ));
        }

        let maturity = as_of.add_period(self.tenor)?;
        FixedRateBond::builder()
            .face(notional)
            .coupon_rate(self.coupon_rate)
            .frequency(self.frequency)
            .day_count(self.day_count)
            .issue_date(as_of)
            .maturity(maturity)
            .curve(Arc::clone(&self.curve))
            .build()
    }
}

impl fmt::Debug for FixedRateBondTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedRateBondTemplate")
            .field("name", &self.name)
            .field("tenor", &self.tenor)
            .field("coupon_rate", &self.coupon_rate)
            .field("frequency", &self.frequency)
            .field("day_count", &self.day_count)
            .finish_non_exhaustive()
    }
}

impl InstrumentFamily for FixedRateBondTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, notional: f64, as_of: Date) -> CoreResult<Arc<dyn Instrument>> {
        Ok(Arc::new(self.build_bond(notional, as_of)?))
    }
}
