//! Fixed cash flow leg, used for liability streams.

use std::sync::Arc;

use alm_core::error::{CoreError, CoreResult};
use alm_core::traits::{Instrument, YieldCurve};
use alm_core::types::{CashFlow, Date};

use crate::pricing::discount_flows;

/// A fixed list of dated amounts discounted on a curve.
///
/// Flows are stored in date order. Amounts are positive for payments made
/// by whoever holds the leg, so a liability leg reads as "benefits due".
#[derive(Debug, Clone)]
pub struct CashflowLeg {
    flows: Vec<CashFlow>,
    curve: Arc<dyn YieldCurve>,
}

impl CashflowLeg {
    /// Creates a leg from arbitrary flows.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCashFlow` if any amount is non-finite.
    pub fn new(mut flows: Vec<CashFlow>, curve: Arc<dyn YieldCurve>) -> CoreResult<Self> {
        if let Some(bad) = flows.iter().find(|cf| !cf.amount().is_finite()) {
            return Err(CoreError::invalid_cashflow(format!(
                "non-finite amount on {}",
                bad.date()
            )));
        }
        flows.sort_by_key(CashFlow::date);
        Ok(Self { flows, curve })
    }

    /// Creates a leg paying `amount` on each of `dates`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCashFlow` if `amount` is non-finite.
    pub fn level(
        dates: impl IntoIterator<Item = Date>,
        amount: f64,
        curve: Arc<dyn YieldCurve>,
    ) -> CoreResult<Self> {
        let flows = dates
            .into_iter()
            .map(|date| CashFlow::fixed(date, amount))
            .collect();
        Self::new(flows, curve)
    }

    /// The flows, in date order.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }
}

impl Instrument for CashflowLeg {
    fn present_value(&self, as_of: Date) -> f64 {
        discount_flows(&self.flows, self.curve.as_ref(), as_of)
    }

    fn cashflows(&self) -> Vec<CashFlow> {
        self.flows.clone()
    }
}
