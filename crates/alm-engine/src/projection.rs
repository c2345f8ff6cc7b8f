//! The projection loop.

use alm_core::types::{Date, Period};
use alm_portfolio::Portfolio;

use crate::builder::ProjectionEngineBuilder;
use crate::config::{ProjectionConfig, ShortfallPolicy};
use crate::error::{EngineError, EngineResult};
use crate::sample::{Metric, ProjectionSample};
use crate::strategy::{
    DisinvestmentStrategy, InvestmentStrategy, ReinvestmentStrategy, StrategyWeight,
};

/// Steps an asset and a liability portfolio through time.
///
/// At every step date the engine collects the cash flows paid since the
/// previous step, values both portfolios, records a [`ProjectionSample`],
/// then reinvests a surplus or sells assets against a deficit. Only the
/// asset portfolio is ever traded.
#[derive(Debug)]
pub struct ProjectionEngine {
    assets: Portfolio,
    liabilities: Portfolio,
    initial_cash: f64,
    cash: f64,
    reinvestment: Box<dyn InvestmentStrategy>,
    disinvestment: Box<dyn InvestmentStrategy>,
    config: ProjectionConfig,
    samples: Vec<ProjectionSample>,
}

impl ProjectionEngine {
    /// Creates an engine with the standard strategies: calibrated
    /// purchases across `mix` and pro-rata sales.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration, a non-finite initial
    /// cash amount, invalid weights or an invalid portfolio.
    pub fn new(
        assets: Portfolio,
        liabilities: Portfolio,
        initial_cash: f64,
        mix: Vec<StrategyWeight>,
        config: ProjectionConfig,
    ) -> EngineResult<Self> {
        config.validate()?;
        Self::builder()
            .with_assets(assets)
            .with_liabilities(liabilities)
            .with_initial_cash(initial_cash)
            .with_reinvestment(ReinvestmentStrategy::from_config(mix, &config)?)
            .with_disinvestment(DisinvestmentStrategy::new(config.shortfall))
            .with_config(config)
            .build()
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> ProjectionEngineBuilder {
        ProjectionEngineBuilder::new()
    }

    pub(crate) fn from_parts(
        assets: Portfolio,
        liabilities: Portfolio,
        initial_cash: f64,
        reinvestment: Box<dyn InvestmentStrategy>,
        disinvestment: Box<dyn InvestmentStrategy>,
        config: ProjectionConfig,
    ) -> Self {
        Self {
            assets,
            liabilities,
            initial_cash,
            cash: initial_cash,
            reinvestment,
            disinvestment,
            config,
            samples: Vec::new(),
        }
    }

    /// Runs the projection over `[start, end)` in steps of `step`.
    ///
    /// Samples from any previous run are replaced. Cash restarts from the
    /// initial amount; the asset portfolio continues from where the last
    /// run left it.
    ///
    /// # Errors
    ///
    /// - `InvalidTimeRange` if `end <= start` or `step` is not positive
    /// - `Calibration` if a purchase cannot be sized
    /// - `DegenerateValue` / `Insolvent` under `ShortfallPolicy::Fail`
    pub fn project(
        &mut self,
        start: Date,
        end: Date,
        step: Period,
    ) -> EngineResult<&[ProjectionSample]> {
        if end <= start {
            return Err(EngineError::invalid_time_range(format!(
                "end {end} is not after start {start}"
            )));
        }
        if !step.is_positive() {
            return Err(EngineError::invalid_time_range(format!(
                "step {step} is not positive"
            )));
        }
        self.assets.validate()?;
        self.liabilities.validate()?;

        self.samples.clear();
        self.cash = self.initial_cash;

        tracing::info!(
            start = %start,
            end = %end,
            step = %step,
            initial_cash = self.initial_cash,
            positions = self.assets.len(),
            "Projection started"
        );

        let mut date = start;
        let mut prior = start;
        while date < end {
            let asset_cf = self.assets.cashflow_between(prior, date);
            let liability_cf = self.liabilities.cashflow_between(prior, date);
            self.cash += asset_cf - liability_cf;

            let asset_mv = self.assets.present_value(date);
            let liability_mv = self.liabilities.present_value(date);

            self.samples.push(ProjectionSample {
                date,
                asset_cf,
                liability_cf,
                asset_mv,
                liability_mv,
                cash: self.cash,
                residual_cash: self.cash,
            });

            self.rebalance(date)?;

            if let Some(sample) = self.samples.last_mut() {
                sample.residual_cash = self.cash;
            }

            tracing::debug!(
                date = %date,
                asset_cf,
                liability_cf,
                asset_mv,
                liability_mv,
                cash = self.cash,
                "Projection step"
            );

            prior = date + 1;
            date = date.add_period(step)?;
        }

        tracing::info!(
            steps = self.samples.len(),
            cash = self.cash,
            positions = self.assets.len(),
            "Projection finished"
        );

        Ok(&self.samples)
    }

    /// Trades the current cash balance.
    fn rebalance(&mut self, date: Date) -> EngineResult<()> {
        if self.cash > 0.0 {
            self.reinvestment
                .apply(&mut self.assets, &mut self.cash, date)?;
        } else if self.cash < 0.0 {
            self.disinvestment
                .apply(&mut self.assets, &mut self.cash, date)?;

            if self.cash < 0.0 {
                let shortfall = -self.cash;
                match self.config.shortfall {
                    ShortfallPolicy::Fail => {
                        return Err(EngineError::Insolvent { date, shortfall });
                    }
                    ShortfallPolicy::CarryForward => {
                        tracing::warn!(date = %date, shortfall, "Deficit carried forward");
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns the samples of the last run.
    #[must_use]
    pub fn samples(&self) -> &[ProjectionSample] {
        &self.samples
    }

    /// Returns one recorded series as `(date, value)` pairs.
    #[must_use]
    pub fn get_data(&self, metric: Metric) -> Vec<(Date, f64)> {
        self.samples
            .iter()
            .map(|s| (s.date, s.value(metric)))
            .collect()
    }

    /// Cash after the last step.
    #[must_use]
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Cash every run starts from.
    #[must_use]
    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    /// Returns the asset portfolio.
    #[must_use]
    pub fn assets(&self) -> &Portfolio {
        &self.assets
    }

    /// Returns the liability portfolio.
    #[must_use]
    pub fn liabilities(&self) -> &Portfolio {
        &self.liabilities
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Returns the reinvestment strategy.
    #[must_use]
    pub fn reinvestment(&self) -> &dyn InvestmentStrategy {
        self.reinvestment.as_ref()
    }

    /// Returns the disinvestment strategy.
    #[must_use]
    pub fn disinvestment(&self) -> &dyn InvestmentStrategy {
        self.disinvestment.as_ref()
    }
}
