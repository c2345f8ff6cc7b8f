//! Instrument held at a multiple of its definition.

use std::sync::Arc;

use alm_core::traits::Instrument;
use alm_core::types::{CashFlow, Date};

use crate::error::{PortfolioError, PortfolioResult};

/// Wraps a shared instrument with a position multiplier.
///
/// The underlying instrument is never mutated: buying or selling part of a
/// position only changes `scalar`. Value and cash flows scale linearly.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use alm_core::prelude::*;
/// use alm_instruments::{CashflowLeg, FlatForward};
/// use alm_portfolio::ScaledInstrument;
///
/// let curve = Arc::new(FlatForward::new(0.0).unwrap());
/// let pay = Date::from_ymd(2026, 1, 1).unwrap();
/// let leg = CashflowLeg::new(vec![CashFlow::fixed(pay, 100.0)], curve).unwrap();
///
/// let half = ScaledInstrument::new(Arc::new(leg), 0.5).unwrap();
/// assert_eq!(half.present_value(Date::from_ymd(2025, 1, 1).unwrap()), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScaledInstrument {
    instrument: Arc<dyn Instrument>,
    scalar: f64,
}

impl ScaledInstrument {
    /// Creates a position of `scalar` units of `instrument`.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidScalar` if `scalar` is negative or
    /// not finite.
    pub fn new(instrument: Arc<dyn Instrument>, scalar: f64) -> PortfolioResult<Self> {
        check_scalar(scalar)?;
        Ok(Self { instrument, scalar })
    }

    /// Creates a position of exactly one unit.
    #[must_use]
    pub fn unit(instrument: Arc<dyn Instrument>) -> Self {
        Self {
            instrument,
            scalar: 1.0,
        }
    }

    /// Returns the position multiplier.
    #[must_use]
    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    /// Replaces the position multiplier.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidScalar` if `scalar` is negative or
    /// not finite.
    pub fn set_scalar(&mut self, scalar: f64) -> PortfolioResult<()> {
        check_scalar(scalar)?;
        self.scalar = scalar;
        Ok(())
    }

    /// Multiplies the scalar by `factor`. Unchecked.
    pub(crate) fn scale(&mut self, factor: f64) {
        self.scalar *= factor;
    }

    /// Returns the underlying instrument.
    #[must_use]
    pub fn instrument(&self) -> &Arc<dyn Instrument> {
        &self.instrument
    }

    /// `scalar` times the instrument's value.
    #[must_use]
    pub fn present_value(&self, as_of: Date) -> f64 {
        // A sold-out position contributes nothing, skip valuing it
        if self.scalar == 0.0 {
            return 0.0;
        }
        self.scalar * self.instrument.present_value(as_of)
    }

    /// The instrument's cash flows with amounts multiplied by `scalar`.
    #[must_use]
    pub fn cashflows(&self) -> Vec<CashFlow> {
        self.instrument
            .cashflows()
            .iter()
            .map(|cf| cf.scaled(self.scalar))
            .collect()
    }
}

impl Instrument for ScaledInstrument {
    fn present_value(&self, as_of: Date) -> f64 {
        ScaledInstrument::present_value(self, as_of)
    }

    fn cashflows(&self) -> Vec<CashFlow> {
        ScaledInstrument::cashflows(self)
    }
}

fn check_scalar(scalar: f64) -> PortfolioResult<()> {
    if scalar.is_finite() && scalar >= 0.0 {
        Ok(())
    } else {
        Err(PortfolioError::invalid_scalar(scalar))
    }
}
