//! Investment strategies applied to surplus or deficit cash.
//!
//! A strategy receives the asset portfolio and the cash amount of the
//! current step, trades, and leaves the unconsumed remainder in `amount`.

use std::fmt;
use std::sync::Arc;

use alm_core::traits::InstrumentFamily;
use alm_core::types::Date;
use alm_portfolio::{Portfolio, ScaledInstrument};

use crate::calibration::Calibrator;
use crate::config::{ProjectionConfig, ShortfallPolicy, SizingMethod};
use crate::error::{CalibrationError, EngineError, EngineResult};

/// Trades a cash amount against a portfolio.
pub trait InvestmentStrategy: fmt::Debug + Send + Sync {
    /// Strategy name for logs.
    fn name(&self) -> &str;

    /// Trades `amount` on `as_of`, leaving the unconsumed part in `amount`.
    fn apply(&self, portfolio: &mut Portfolio, amount: &mut f64, as_of: Date) -> EngineResult<()>;
}

/// One entry of a reinvestment mix.
#[derive(Debug, Clone)]
pub struct StrategyWeight {
    /// Family to buy.
    pub family: Arc<dyn InstrumentFamily>,
    /// Share of each surplus spent on it.
    pub weight: f64,
}

impl StrategyWeight {
    /// Creates an entry.
    #[must_use]
    pub fn new(family: Arc<dyn InstrumentFamily>, weight: f64) -> Self {
        Self { family, weight }
    }
}

/// Spends a surplus across instrument families in fixed proportions.
///
/// Weights must be non-negative and sum to 1; every purchase is sized so
/// its value on the trade date equals `weight * amount`.
#[derive(Debug, Clone)]
pub struct ReinvestmentStrategy {
    entries: Vec<StrategyWeight>,
    calibrator: Calibrator,
    sizing: SizingMethod,
}

impl ReinvestmentStrategy {
    /// Creates a strategy.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidWeights` for an empty mix, a negative or
    /// non-finite weight, or weights whose sum is further than
    /// `weight_tolerance` from 1.
    pub fn new(
        entries: Vec<StrategyWeight>,
        calibrator: Calibrator,
        sizing: SizingMethod,
        weight_tolerance: f64,
    ) -> EngineResult<Self> {
        if entries.is_empty() {
            return Err(EngineError::invalid_weights("no instrument families given"));
        }
        for entry in &entries {
            if !(entry.weight.is_finite() && entry.weight >= 0.0) {
                return Err(EngineError::invalid_weights(format!(
                    "weight {} for '{}' must be finite and non-negative",
                    entry.weight,
                    entry.family.name()
                )));
            }
        }
        let total: f64 = entries.iter().map(|e| e.weight).sum();
        if (total - 1.0).abs() > weight_tolerance {
            return Err(EngineError::invalid_weights(format!(
                "weights sum to {total}, expected 1"
            )));
        }

        Ok(Self {
            entries,
            calibrator,
            sizing,
        })
    }

    /// Creates a strategy with the calibration, sizing and weight
    /// tolerance of `config`.
    pub fn from_config(entries: Vec<StrategyWeight>, config: &ProjectionConfig) -> EngineResult<Self> {
        Self::new(
            entries,
            Calibrator::new(config.calibration),
            config.sizing,
            config.weight_tolerance,
        )
    }

    /// Returns the mix.
    #[must_use]
    pub fn entries(&self) -> &[StrategyWeight] {
        &self.entries
    }

    /// Returns the sizing method.
    #[must_use]
    pub fn sizing(&self) -> SizingMethod {
        self.sizing
    }

    /// Returns the calibrator.
    #[must_use]
    pub fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    /// Builds a position in `family` worth `stake` on `as_of`.
    pub fn buy(
        &self,
        family: &dyn InstrumentFamily,
        stake: f64,
        as_of: Date,
    ) -> EngineResult<ScaledInstrument> {
        match self.sizing {
            SizingMethod::Calibrated => {
                let target = self.calibrator.target(stake);
                let calibrated = self.calibrator.solve(family, &target, as_of)?;
                Ok(ScaledInstrument::unit(calibrated.instrument))
            }
            SizingMethod::UnitScaled => {
                let unit = family.build(1.0, as_of).map_err(|source| {
                    CalibrationError::Construction {
                        family: family.name().to_string(),
                        as_of,
                        notional: 1.0,
                        source,
                    }
                })?;
                let value = unit.present_value(as_of);
                if !(value.is_finite() && value > 0.0) {
                    return Err(CalibrationError::DegenerateUnit {
                        family: family.name().to_string(),
                        as_of,
                        value,
                    }
                    .into());
                }
                Ok(ScaledInstrument::new(unit, stake / value)?)
            }
        }
    }
}

impl InvestmentStrategy for ReinvestmentStrategy {
    fn name(&self) -> &str {
        "reinvestment"
    }

    fn apply(&self, portfolio: &mut Portfolio, amount: &mut f64, as_of: Date) -> EngineResult<()> {
        if *amount <= 0.0 {
            return Ok(());
        }
        let total = *amount;

        // All purchases are sized before any is booked.
        let mut purchases = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if entry.weight == 0.0 {
                continue;
            }
            let stake = entry.weight * total;
            let position = self.buy(entry.family.as_ref(), stake, as_of)?;
            tracing::debug!(
                date = %as_of,
                family = entry.family.name(),
                stake,
                scalar = position.scalar(),
                "Bought position"
            );
            purchases.push(position);
        }

        for position in purchases {
            portfolio.add(position);
        }
        *amount = 0.0;
        Ok(())
    }
}

/// Outcome of a pro-rata sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Liquidation {
    /// Part of the deficit raised by selling.
    pub covered: f64,
    /// Part of the deficit still open.
    pub remaining: f64,
}

/// Covers a deficit by selling the same fraction of every position.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisinvestmentStrategy {
    policy: ShortfallPolicy,
}

impl DisinvestmentStrategy {
    /// Creates a strategy with the given handling of worthless portfolios.
    #[must_use]
    pub fn new(policy: ShortfallPolicy) -> Self {
        Self { policy }
    }

    /// Returns the shortfall policy.
    #[must_use]
    pub fn policy(&self) -> ShortfallPolicy {
        self.policy
    }

    /// Sells enough of `portfolio` to raise `deficit`, or all of it.
    ///
    /// # Errors
    ///
    /// Under `ShortfallPolicy::Fail`, returns `EngineError::DegenerateValue`
    /// when the portfolio has no positive value to sell.
    pub fn liquidate(
        &self,
        portfolio: &mut Portfolio,
        deficit: f64,
        as_of: Date,
    ) -> EngineResult<Liquidation> {
        if deficit <= 0.0 {
            return Ok(Liquidation {
                covered: 0.0,
                remaining: 0.0,
            });
        }

        let npv = portfolio.present_value(as_of);
        if !(npv.is_finite() && npv > 0.0) {
            return match self.policy {
                ShortfallPolicy::Fail => Err(EngineError::DegenerateValue { date: as_of, npv }),
                ShortfallPolicy::CarryForward => {
                    tracing::warn!(date = %as_of, npv, deficit, "Nothing left to sell");
                    Ok(Liquidation {
                        covered: 0.0,
                        remaining: deficit,
                    })
                }
            };
        }

        if deficit >= npv {
            portfolio.scale(0.0);
            Ok(Liquidation {
                covered: npv,
                remaining: deficit - npv,
            })
        } else {
            portfolio.scale(1.0 - deficit / npv);
            Ok(Liquidation {
                covered: deficit,
                remaining: 0.0,
            })
        }
    }
}

impl InvestmentStrategy for DisinvestmentStrategy {
    fn name(&self) -> &str {
        "disinvestment"
    }

    fn apply(&self, portfolio: &mut Portfolio, amount: &mut f64, as_of: Date) -> EngineResult<()> {
        if *amount >= 0.0 {
            return Ok(());
        }
        let liquidation = self.liquidate(portfolio, -*amount, as_of)?;
        tracing::debug!(
            date = %as_of,
            covered = liquidation.covered,
            remaining = liquidation.remaining,
            "Sold pro rata"
        );
        *amount = -liquidation.remaining;
        Ok(())
    }
}
