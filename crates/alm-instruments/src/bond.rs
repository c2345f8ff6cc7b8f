//! Fixed rate bond.

use std::sync::Arc;

use alm_core::daycounts::DayCountConvention;
use alm_core::error::{CoreError, CoreResult};
use alm_core::traits::{Instrument, YieldCurve};
use alm_core::types::{CashFlow, Date, Frequency};

use crate::pricing::discount_flows;
use crate::schedule::Schedule;

/// A bond paying fixed coupons on a backward-generated schedule, with the
/// face value repaid at maturity.
///
/// Cash flows are generated once at construction.
#[derive(Debug, Clone)]
pub struct FixedRateBond {
    face: f64,
    coupon_rate: f64,
    frequency: Frequency,
    day_count: DayCountConvention,
    schedule: Schedule,
    curve: Arc<dyn YieldCurve>,
    cashflows: Vec<CashFlow>,
}

impl FixedRateBond {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> FixedRateBondBuilder {
        FixedRateBondBuilder::new()
    }

    /// Face value repaid at maturity.
    #[must_use]
    pub fn face(&self) -> f64 {
        self.face
    }

    /// Annual coupon rate as a decimal (0.05 = 5%).
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupon frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Accrual day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Coupon schedule.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.schedule.issue()
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.schedule.maturity()
    }

    fn generate_cashflows(
        face: f64,
        coupon_rate: f64,
        frequency: Frequency,
        day_count: DayCountConvention,
        schedule: &Schedule,
    ) -> Vec<CashFlow> {
        if frequency.is_zero() {
            return vec![CashFlow::principal(schedule.maturity(), face)];
        }

        let maturity = schedule.maturity();
        schedule
            .periods()
            .map(|(start, end)| {
                let coupon = face * coupon_rate * day_count.year_fraction(start, end);
                if end == maturity {
                    CashFlow::final_payment(end, coupon, face)
                } else {
                    CashFlow::coupon(end, coupon)
                }
            })
            .collect()
    }
}

impl Instrument for FixedRateBond {
    fn present_value(&self, as_of: Date) -> f64 {
        discount_flows(&self.cashflows, self.curve.as_ref(), as_of)
    }

    fn cashflows(&self) -> Vec<CashFlow> {
        self.cashflows.clone()
    }
}

/// Builder for [`FixedRateBond`].
#[derive(Debug, Clone)]
pub struct FixedRateBondBuilder {
    face: f64,
    coupon_rate: Option<f64>,
    frequency: Frequency,
    day_count: DayCountConvention,
    issue_date: Option<Date>,
    maturity: Option<Date>,
    curve: Option<Arc<dyn YieldCurve>>,
}

impl Default for FixedRateBondBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedRateBondBuilder {
    /// Creates a new builder: face 100, semi-annual, ACT/ACT ISDA.
    #[must_use]
    pub fn new() -> Self {
        Self {
            face: 100.0,
            coupon_rate: None,
            frequency: Frequency::SemiAnnual,
            day_count: DayCountConvention::ActActIsda,
            issue_date: None,
            maturity: None,
            curve: None,
        }
    }

    /// Sets the face value.
    #[must_use]
    pub fn face(mut self, face: f64) -> Self {
        self.face = face;
        self
    }

    /// Sets the coupon rate (as decimal, 0.05 = 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the accrual day count.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the discount curve.
    #[must_use]
    pub fn curve(mut self, curve: Arc<dyn YieldCurve>) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Builds the bond and generates its cash flows.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInstrument` if a required field is missing,
    /// the face or coupon is negative or non-finite, or the dates are out of
    /// order.
    pub fn build(self) -> CoreResult<FixedRateBond> {
        let missing =
            |field: &str| CoreError::invalid_instrument("FixedRateBond", format!("missing {field}"));

        let coupon_rate = self.coupon_rate.ok_or_else(|| missing("coupon_rate"))?;
        let issue_date = self.issue_date.ok_or_else(|| missing("issue_date"))?;
        let maturity = self.maturity.ok_or_else(|| missing("maturity"))?;
        let curve = self.curve.ok_or_else(|| missing("curve"))?;

        if !(self.face.is_finite() && self.face >= 0.0) {
            return Err(CoreError::invalid_instrument(
                "FixedRateBond",
                format!("face must be non-negative, got {}", self.face),
            ));
        }
        if !(coupon_rate.is_finite() && coupon_rate >= 0.0) {
            return Err(CoreError::invalid_instrument(
                "FixedRateBond",
                format!("coupon rate must be non-negative, got {coupon_rate}"),
            ));
        }

        let schedule = Schedule::backward(issue_date, maturity, self.frequency)?;
        let cashflows = FixedRateBond::generate_cashflows(
            self.face,
            coupon_rate,
            self.frequency,
            self.day_count,
            &schedule,
        );

        Ok(FixedRateBond {
            face: self.face,
            coupon_rate,
            frequency: self.frequency,
            day_count: self.day_count,
            schedule,
            curve,
            cashflows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatForward;
    use alm_core::types::{CashFlowType, Compounding};
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn curve(rate: f64) -> Arc<dyn YieldCurve> {
        Arc::new(FlatForward::new(rate).unwrap())
    }

    #[test]
    fn test_builder_and_cashflows() {
        let bond = FixedRateBond::builder()
            .coupon_rate(0.05)
            .issue_date(d(2024, 1, 31))
            .maturity(d(2034, 1, 31))
            .curve(curve(0.04))
            .build()
            .unwrap();

        let flows = bond.cashflows();
        assert_eq!(flows.len(), 20);
        assert_eq!(flows[0].date(), d(2024, 7, 31));
        assert_eq!(flows[0].cf_type(), CashFlowType::Coupon);

        let last = flows[19];
        assert_eq!(last.date(), d(2034, 1, 31));
        assert_eq!(last.cf_type(), CashFlowType::CouponAndPrincipal);
        assert!(last.amount() > 100.0 && last.amount() < 103.0);

        // Coupons sum to roughly ten years of 5%
        let total: f64 = flows.iter().map(CashFlow::amount).sum();
        assert_relative_eq!(total, 150.0, max_relative = 1e-2);
    }

    #[test]
    fn test_par_bond_prices_near_par() {
        // Coupon equal to the curve rate with matching compounding prices at par
        let bond = FixedRateBond::builder()
            .coupon_rate(0.04)
            .issue_date(d(2025, 1, 1))
            .maturity(d(2030, 1, 1))
            .day_count(DayCountConvention::ActActIsda)
            .curve(Arc::new(
                FlatForward::new(0.04)
                    .unwrap()
                    .with_compounding(Compounding::SemiAnnual),
            ))
            .build()
            .unwrap();

        assert_relative_eq!(bond.present_value(d(2025, 1, 1)), 100.0, max_relative = 1e-3);
    }

    #[test]
    fn test_value_drops_after_coupon() {
        let bond = FixedRateBond::builder()
            .coupon_rate(0.05)
            .issue_date(d(2025, 1, 1))
            .maturity(d(2027, 1, 1))
            .curve(curve(0.0))
            .build()
            .unwrap();

        // With a zero curve, PV is the sum of remaining flows
        let before = bond.present_value(d(2025, 6, 30));
        let on_date = bond.present_value(d(2025, 7, 1));
        assert!(before > on_date);
        assert_relative_eq!(before - on_date, bond.cashflows()[0].amount(), epsilon = 1e-12);

        // Nothing left after maturity
        assert_eq!(bond.present_value(d(2027, 1, 1)), 0.0);
    }

    #[test]
    fn test_linear_in_face() {
        let build = |face: f64| {
            FixedRateBond::builder()
                .face(face)
                .coupon_rate(0.05)
                .issue_date(d(2025, 1, 1))
                .maturity(d(2035, 1, 1))
                .curve(curve(0.04))
                .build()
                .unwrap()
        };
        let as_of = d(2025, 1, 1);

        assert_relative_eq!(
            build(2_500.0).present_value(as_of),
            25.0 * build(100.0).present_value(as_of),
            max_relative = 1e-12
        );
        assert_eq!(build(0.0).present_value(as_of), 0.0);
    }

    #[test]
    fn test_zero_coupon() {
        let bond = FixedRateBond::builder()
            .coupon_rate(0.0)
            .frequency(Frequency::Zero)
            .issue_date(d(2025, 1, 1))
            .maturity(d(2026, 1, 1))
            .curve(Arc::new(
                FlatForward::new(0.05)
                    .unwrap()
                    .with_compounding(Compounding::Annual),
            ))
            .build()
            .unwrap();

        assert_eq!(bond.cashflows().len(), 1);
        assert_relative_eq!(bond.present_value(d(2025, 1, 1)), 100.0 / 1.05, epsilon = 1e-10);
    }

    #[test]
    fn test_validation() {
        let base = || {
            FixedRateBond::builder()
                .coupon_rate(0.05)
                .issue_date(d(2025, 1, 1))
                .maturity(d(2030, 1, 1))
                .curve(curve(0.04))
        };

        assert!(base().build().is_ok());
        assert!(base().face(-1.0).build().is_err());
        assert!(base().coupon_rate(f64::NAN).build().is_err());
        assert!(base().maturity(d(2024, 1, 1)).build().is_err());
        assert!(FixedRateBond::builder().build().is_err());

        let err = FixedRateBond::builder().coupon_rate(0.05).build().unwrap_err();
        assert!(err.to_string().contains("issue_date"));
    }
}
