//! Cash flow type for instruments and portfolios.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Regular coupon payment
    Coupon,
    /// Principal repayment at maturity
    Principal,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
    /// A fixed contractual payment, such as a liability benefit
    Fixed,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::Principal => "Principal",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
            CashFlowType::Fixed => "Fixed",
        };
        write!(f, "{name}")
    }
}

/// A dated cash flow amount.
///
/// # Example
///
/// ```rust
/// use alm_core::types::{CashFlow, Date};
///
/// let cf = CashFlow::coupon(Date::from_ymd(2025, 6, 15).unwrap(), 2.50);
/// assert_eq!(cf.scaled(4.0).amount(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment date
    date: Date,
    /// Cash flow amount in currency units
    amount: f64,
    /// Type of cash flow
    cf_type: CashFlowType,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: f64, cf_type: CashFlowType) -> Self {
        Self {
            date,
            amount,
            cf_type,
        }
    }

    /// Creates a coupon cash flow.
    #[must_use]
    pub fn coupon(date: Date, amount: f64) -> Self {
        Self::new(date, amount, CashFlowType::Coupon)
    }

    /// Creates a principal cash flow.
    #[must_use]
    pub fn principal(date: Date, amount: f64) -> Self {
        Self::new(date, amount, CashFlowType::Principal)
    }

    /// Creates a final cash flow (coupon + principal).
    #[must_use]
    pub fn final_payment(date: Date, coupon: f64, principal: f64) -> Self {
        Self::new(date, coupon + principal, CashFlowType::CouponAndPrincipal)
    }

    /// Creates a fixed contractual payment.
    #[must_use]
    pub fn fixed(date: Date, amount: f64) -> Self {
        Self::new(date, amount, CashFlowType::Fixed)
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the cash flow type.
    #[must_use]
    pub fn cf_type(&self) -> CashFlowType {
        self.cf_type
    }

    /// Returns a copy with the amount multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            amount: self.amount * factor,
            ..*self
        }
    }

    /// Returns true if the payment date lies in `[start, end]`.
    #[must_use]
    pub fn falls_within(&self, start: Date, end: Date) -> bool {
        self.date >= start && self.date <= end
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {:.2}", self.date, self.cf_type, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cashflow_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        let cf = CashFlow::coupon(date, 2.5);

        assert_eq!(cf.date(), date);
        assert_eq!(cf.amount(), 2.5);
        assert_eq!(cf.cf_type(), CashFlowType::Coupon);
    }

    #[test]
    fn test_final_payment() {
        let date = Date::from_ymd(2030, 6, 15).unwrap();
        let cf = CashFlow::final_payment(date, 2.5, 100.0);

        assert_eq!(cf.amount(), 102.5);
        assert_eq!(cf.cf_type(), CashFlowType::CouponAndPrincipal);
    }

    #[test]
    fn test_scaled_keeps_date_and_type() {
        let date = Date::from_ymd(2030, 6, 15).unwrap();
        let cf = CashFlow::fixed(date, 1_000.0).scaled(0.25);

        assert_eq!(cf.amount(), 250.0);
        assert_eq!(cf.date(), date);
        assert_eq!(cf.cf_type(), CashFlowType::Fixed);
    }

    #[test]
    fn test_falls_within_is_inclusive() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 31).unwrap();

        assert!(CashFlow::coupon(start, 1.0).falls_within(start, end));
        assert!(CashFlow::coupon(end, 1.0).falls_within(start, end));
        assert!(!CashFlow::coupon(end + 1, 1.0).falls_within(start, end));
        assert!(!CashFlow::coupon(start - 1, 1.0).falls_within(start, end));
    }

    #[test]
    fn test_display() {
        let cf = CashFlow::principal(Date::from_ymd(2030, 6, 15).unwrap(), 100.0);
        assert_eq!(cf.to_string(), "2030-06-15 Principal: 100.00");
    }
}
