//! Sizing new instruments to a target value.
//!
//! The residual `build(notional).present_value(as_of) - target` is
//! bracketed outward from an initial guess and solved with Brent's
//! method. The solved instrument is returned as built, so the caller
//! never reconstructs it.

use std::cell::RefCell;
use std::sync::Arc;

use alm_core::error::CoreError;
use alm_core::traits::{Instrument, InstrumentFamily};
use alm_core::types::Date;
use alm_math::solvers::solve_from_guess;

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;

/// A value to hit and how to search for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationTarget {
    /// Present value the new instrument must have.
    pub target_price: f64,
    /// Starting notional for the search.
    pub initial_guess: f64,
    /// Relative tolerance on the repriced value.
    pub tolerance: f64,
}

impl CalibrationTarget {
    /// Creates a target.
    #[must_use]
    pub fn new(target_price: f64, initial_guess: f64, tolerance: f64) -> Self {
        Self {
            target_price,
            initial_guess,
            tolerance,
        }
    }

    /// Absolute tolerance: `tolerance * max(1, target_price)`.
    #[must_use]
    pub fn absolute_tolerance(&self) -> f64 {
        self.tolerance * self.target_price.abs().max(1.0)
    }
}

/// A freshly sized instrument.
#[derive(Debug, Clone)]
pub struct Calibrated {
    /// The instrument built at the solved notional.
    pub instrument: Arc<dyn Instrument>,
    /// Solved notional.
    pub notional: f64,
    /// Brent iterations used.
    pub iterations: u32,
    /// Repriced value minus target.
    pub residual: f64,
}

/// Solves instrument notionals against target values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    /// Creates a calibrator.
    #[must_use]
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// A target for `target_price` using the configured guess and tolerance.
    #[must_use]
    pub fn target(&self, target_price: f64) -> CalibrationTarget {
        CalibrationTarget::new(
            target_price,
            self.config.initial_guess,
            self.config.tolerance,
        )
    }

    /// Finds the notional at which `family` is worth `target.target_price`
    /// on `as_of`.
    ///
    /// The family's value must be continuous and monotonic in notional
    /// over the search range.
    ///
    /// # Errors
    ///
    /// - `InvalidTarget` for a non-positive or non-finite target
    /// - `Construction` if the family rejects a notional tried by the search
    /// - `Solver` if no bracket is found or Brent runs out of iterations
    /// - `ToleranceExceeded` if the solved instrument misses the target
    pub fn solve(
        &self,
        family: &dyn InstrumentFamily,
        target: &CalibrationTarget,
        as_of: Date,
    ) -> Result<Calibrated, CalibrationError> {
        let target_price = target.target_price;
        if !(target_price.is_finite() && target_price > 0.0) {
            return Err(CalibrationError::InvalidTarget {
                family: family.name().to_string(),
                as_of,
                target: target_price,
            });
        }

        let tolerance = target.absolute_tolerance();
        let failure: RefCell<Option<(f64, CoreError)>> = RefCell::new(None);
        let residual = |notional: f64| match family.build(notional, as_of) {
            Ok(instrument) => instrument.present_value(as_of) - target_price,
            Err(e) => {
                failure.borrow_mut().get_or_insert((notional, e));
                f64::NAN
            }
        };

        let solved = solve_from_guess(
            &residual,
            target.initial_guess,
            &self.config.bracket_config(),
            &self.config.solver_config(tolerance),
        );

        if let Some((notional, source)) = failure.into_inner() {
            return Err(CalibrationError::Construction {
                family: family.name().to_string(),
                as_of,
                notional,
                source,
            });
        }

        let solved = solved.map_err(|source| {
            if source.is_budget_exhausted() {
                tracing::warn!(
                    family = family.name(),
                    %as_of,
                    target = target_price,
                    error = %source,
                    "Calibration ran out of budget; consider widening the bracket search"
                );
            }
            CalibrationError::Solver {
                family: family.name().to_string(),
                as_of,
                target: target_price,
                source,
            }
        })?;

        let instrument =
            family
                .build(solved.root, as_of)
                .map_err(|source| CalibrationError::Construction {
                    family: family.name().to_string(),
                    as_of,
                    notional: solved.root,
                    source,
                })?;

        let value = instrument.present_value(as_of);
        let miss = (value - target_price).abs();
        if miss.is_nan() || miss > tolerance {
            return Err(CalibrationError::ToleranceExceeded {
                family: family.name().to_string(),
                as_of,
                target: target_price,
                value,
                tolerance,
            });
        }

        tracing::debug!(
            family = family.name(),
            date = %as_of,
            target = target_price,
            notional = solved.root,
            iterations = solved.iterations,
            "Instrument calibrated"
        );

        Ok(Calibrated {
            instrument,
            notional: solved.root,
            iterations: solved.iterations,
            residual: value - target_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alm_core::error::CoreResult;
    use alm_core::types::CashFlow;
    use approx::assert_abs_diff_eq;

    /// A zero coupon worth `price` per unit of notional.
    #[derive(Debug)]
    struct LinearFamily {
        price: f64,
        max_notional: f64,
    }

    #[derive(Debug)]
    struct Fixed(f64);

    impl Instrument for Fixed {
        fn present_value(&self, _as_of: Date) -> f64 {
            self.0
        }

        fn cashflows(&self) -> Vec<CashFlow> {
            Vec::new()
        }
    }

    impl InstrumentFamily for LinearFamily {
        fn name(&self) -> &str {
            "linear"
        }

        fn build(&self, notional: f64, _as_of: Date) -> CoreResult<Arc<dyn Instrument>> {
            if notional > self.max_notional {
                return Err(CoreError::invalid_instrument("linear", "notional too large"));
            }
            Ok(Arc::new(Fixed(self.price * notional)))
        }
    }

    fn as_of() -> Date {
        Date::from_ymd(2024, 1, 31).unwrap()
    }

    fn family() -> LinearFamily {
        LinearFamily {
            price: 0.93,
            max_notional: f64::INFINITY,
        }
    }

    #[test]
    fn test_solves_linear_family() {
        let calibrator = Calibrator::default();
        let target = calibrator.target(50_000.0);

        let result = calibrator.solve(&family(), &target, as_of()).unwrap();

        assert_abs_diff_eq!(result.notional, 50_000.0 / 0.93, epsilon = 1e-3);
        assert_abs_diff_eq!(
            result.instrument.present_value(as_of()),
            50_000.0,
            epsilon = target.absolute_tolerance()
        );
        assert!(result.residual.abs() <= target.absolute_tolerance());
    }

    #[test]
    fn test_small_target_below_guess() {
        let calibrator = Calibrator::default();
        let result = calibrator
            .solve(&family(), &calibrator.target(0.25), as_of())
            .unwrap();
        assert_abs_diff_eq!(result.instrument.present_value(as_of()), 0.25, epsilon = 1e-8);
    }

    #[test]
    fn test_rejects_non_positive_target() {
        let calibrator = Calibrator::default();
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let err = calibrator
                .solve(&family(), &calibrator.target(bad), as_of())
                .unwrap_err();
            assert!(matches!(err, CalibrationError::InvalidTarget { .. }));
        }
    }

    #[test]
    fn test_construction_failure_is_reported() {
        let calibrator = Calibrator::default();
        let capped = LinearFamily {
            price: 1.0,
            max_notional: 10_000.0,
        };

        let err = calibrator
            .solve(&capped, &calibrator.target(1.0e6), as_of())
            .unwrap_err();
        let CalibrationError::Construction { family, notional, .. } = err else {
            panic!("expected construction error, got {err:?}");
        };
        assert_eq!(family, "linear");
        assert!(notional > 10_000.0);
    }

    #[test]
    fn test_unreachable_target_fails_to_bracket() {
        let calibrator = Calibrator::new(CalibrationConfig::default().with_bracket(1.0, 1.6, 5));
        let err = calibrator
            .solve(&family(), &calibrator.target(1.0e9), as_of())
            .unwrap_err();
        assert!(matches!(err, CalibrationError::Solver { .. }));
    }
}
