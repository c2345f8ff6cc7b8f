//! Builder for the projection engine.

use alm_portfolio::Portfolio;

use crate::config::ProjectionConfig;
use crate::error::{EngineError, EngineResult};
use crate::projection::ProjectionEngine;
use crate::strategy::InvestmentStrategy;

/// Builder for constructing a [`ProjectionEngine`].
///
/// Portfolios default to empty and initial cash to zero; both strategies
/// must be supplied.
#[derive(Debug, Default)]
pub struct ProjectionEngineBuilder {
    assets: Portfolio,
    liabilities: Portfolio,
    initial_cash: f64,
    reinvestment: Option<Box<dyn InvestmentStrategy>>,
    disinvestment: Option<Box<dyn InvestmentStrategy>>,
    config: Option<ProjectionConfig>,
}

impl ProjectionEngineBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset portfolio.
    #[must_use]
    pub fn with_assets(mut self, assets: Portfolio) -> Self {
        self.assets = assets;
        self
    }

    /// Set the liability portfolio.
    #[must_use]
    pub fn with_liabilities(mut self, liabilities: Portfolio) -> Self {
        self.liabilities = liabilities;
        self
    }

    /// Set the cash every run starts from.
    #[must_use]
    pub fn with_initial_cash(mut self, cash: f64) -> Self {
        self.initial_cash = cash;
        self
    }

    /// Set the strategy applied to a surplus.
    #[must_use]
    pub fn with_reinvestment(mut self, strategy: impl InvestmentStrategy + 'static) -> Self {
        self.reinvestment = Some(Box::new(strategy));
        self
    }

    /// Set the strategy applied to a deficit.
    #[must_use]
    pub fn with_disinvestment(mut self, strategy: impl InvestmentStrategy + 'static) -> Self {
        self.disinvestment = Some(Box::new(strategy));
        self
    }

    /// Set the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: ProjectionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the projection engine.
    pub fn build(self) -> EngineResult<ProjectionEngine> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        if !self.initial_cash.is_finite() {
            return Err(EngineError::config(format!(
                "initial cash must be finite, got {}",
                self.initial_cash
            )));
        }

        let reinvestment = self
            .reinvestment
            .ok_or_else(|| EngineError::config("reinvestment strategy not configured"))?;

        let disinvestment = self
            .disinvestment
            .ok_or_else(|| EngineError::config("disinvestment strategy not configured"))?;

        self.assets.validate()?;
        self.liabilities.validate()?;

        Ok(ProjectionEngine::from_parts(
            self.assets,
            self.liabilities,
            self.initial_cash,
            reinvestment,
            disinvestment,
            config,
        ))
    }
}
