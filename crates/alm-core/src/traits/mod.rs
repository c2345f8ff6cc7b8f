//! Core traits shared by instruments, portfolios and the projection engine.
//!
//! - [`Instrument`]: anything that can be valued and yields dated cash flows
//! - [`InstrumentFamily`]: builds a fresh instrument of a given notional
//! - [`YieldCurve`]: discount factors anchored at a valuation date

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::types::{CashFlow, Date};

/// A valued instrument.
///
/// The valuation date is explicit: `present_value(as_of)` discounts every
/// cash flow dated strictly after `as_of` back to `as_of`. Flows dated on
/// or before `as_of` are treated as already paid.
pub trait Instrument: Debug + Send + Sync {
    /// Present value as of the given date.
    fn present_value(&self, as_of: Date) -> f64;

    /// All cash flows of the instrument, in date order.
    ///
    /// Not windowed: callers select the dates they need.
    fn cashflows(&self) -> Vec<CashFlow>;
}

/// A family of instruments that can be built at any notional.
///
/// Used by calibration, which searches over the notional until the new
/// instrument's value matches a target.
pub trait InstrumentFamily: Debug + Send + Sync {
    /// Human-readable name of the family, used in logs and errors.
    fn name(&self) -> &str;

    /// Builds an instrument of the given notional, issued as of `as_of`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notional or the family's parameters cannot
    /// produce a valid instrument.
    fn build(&self, notional: f64, as_of: Date) -> CoreResult<Arc<dyn Instrument>>;
}

/// A discount curve.
///
/// Implementations re-anchor at whatever valuation date they are asked for,
/// so the same curve can be used at every projection step.
pub trait YieldCurve: Debug + Send + Sync {
    /// Discount factor from `date` back to `as_of`.
    fn discount_factor(&self, as_of: Date, date: Date) -> f64;
}

/// Sums the amounts of all cash flows dated in `[start, end]`.
///
/// Both ends are inclusive. Returns 0 for an empty window.
#[must_use]
pub fn total_cashflow_between(flows: &[CashFlow], start: Date, end: Date) -> f64 {
    flows
        .iter()
        .filter(|cf| cf.falls_within(start, end))
        .map(CashFlow::amount)
        .sum()
}

impl<T: Instrument + ?Sized> Instrument for Arc<T> {
    fn present_value(&self, as_of: Date) -> f64 {
        (**self).present_value(as_of)
    }

    fn cashflows(&self) -> Vec<CashFlow> {
        (**self).cashflows()
    }
}
