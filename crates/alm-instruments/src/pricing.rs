//! Discounting of dated cash flows.

use alm_core::traits::YieldCurve;
use alm_core::types::{CashFlow, Date};

/// Present value of `flows` as of `as_of`.
///
/// Only flows dated strictly after `as_of` contribute; a flow paid on the
/// as-of date is treated as already received.
pub fn discount_flows(flows: &[CashFlow], curve: &dyn YieldCurve, as_of: Date) -> f64 {
    flows
        .iter()
        .filter(|cf| cf.date() > as_of)
        .map(|cf| cf.amount() * curve.discount_factor(as_of, cf.date()))
        .sum()
}
