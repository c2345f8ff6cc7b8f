//! Projection configuration.
//!
//! Every field has a default, so a TOML file only needs the keys it
//! changes:
//!
//! ```toml
//! sizing = "unit_scaled"
//! shortfall = "fail"
//!
//! [calibration]
//! tolerance = 1e-10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use alm_math::solvers::{BracketConfig, SolverConfig};

use crate::error::{EngineError, EngineResult};

/// How a reinvestment stake is turned into a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizingMethod {
    /// Solve for the notional whose value equals the stake; held at scalar 1.
    #[default]
    Calibrated,
    /// Build one unit of the family and hold `stake / unit value` of it.
    UnitScaled,
}

/// What happens to a deficit that liquidation cannot cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// Keep the uncovered amount as negative cash and continue.
    #[default]
    CarryForward,
    /// Abort the projection.
    Fail,
}

/// Root-finding settings for instrument calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Starting notional for the bracket search.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Relative tolerance, applied as `tolerance * max(1, target)`.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Brent iteration budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Initial half-width of the bracket around the guess.
    #[serde(default = "default_bracket_step")]
    pub bracket_step: f64,

    /// Bracket widening factor.
    #[serde(default = "default_bracket_growth")]
    pub bracket_growth: f64,

    /// Function evaluation budget for bracketing.
    #[serde(default = "default_max_bracket_evaluations")]
    pub max_bracket_evaluations: u32,
}

fn default_initial_guess() -> f64 {
    1_000.0
}

fn default_tolerance() -> f64 {
    1e-8
}

fn default_max_iterations() -> u32 {
    100
}

fn default_bracket_step() -> f64 {
    1.0
}

fn default_bracket_growth() -> f64 {
    1.6
}

fn default_max_bracket_evaluations() -> u32 {
    100
}

fn default_weight_tolerance() -> f64 {
    1e-9
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            initial_guess: default_initial_guess(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            bracket_step: default_bracket_step(),
            bracket_growth: default_bracket_growth(),
            max_bracket_evaluations: default_max_bracket_evaluations(),
        }
    }
}

impl CalibrationConfig {
    /// Sets the initial notional guess.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the Brent iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the bracketing parameters.
    #[must_use]
    pub fn with_bracket(mut self, step: f64, growth: f64, max_evaluations: u32) -> Self {
        self.bracket_step = step;
        self.bracket_growth = growth;
        self.max_bracket_evaluations = max_evaluations;
        self
    }

    /// Solver settings for a target with absolute tolerance `tolerance`.
    #[must_use]
    pub fn solver_config(&self, tolerance: f64) -> SolverConfig {
        SolverConfig::new(tolerance, self.max_iterations)
    }

    /// Bracket settings; notionals are never searched below zero.
    #[must_use]
    pub fn bracket_config(&self) -> BracketConfig {
        BracketConfig::default()
            .with_initial_step(self.bracket_step)
            .with_growth(self.bracket_growth)
            .with_max_evaluations(self.max_bracket_evaluations)
            .with_lower_bound(0.0)
    }

    /// Validates the settings.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.initial_guess.is_finite() && self.initial_guess >= 0.0) {
            return Err(EngineError::config(format!(
                "calibration.initial_guess must be finite and non-negative, got {}",
                self.initial_guess
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EngineError::config(format!(
                "calibration.tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(EngineError::config("calibration.max_iterations must be at least 1"));
        }
        if !(self.bracket_step.is_finite() && self.bracket_step > 0.0) {
            return Err(EngineError::config(format!(
                "calibration.bracket_step must be positive, got {}",
                self.bracket_step
            )));
        }
        if !(self.bracket_growth.is_finite() && self.bracket_growth > 1.0) {
            return Err(EngineError::config(format!(
                "calibration.bracket_growth must exceed 1, got {}",
                self.bracket_growth
            )));
        }
        if self.max_bracket_evaluations < 2 {
            return Err(EngineError::config(
                "calibration.max_bracket_evaluations must be at least 2",
            ));
        }
        Ok(())
    }
}

/// Projection configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Reinvestment sizing.
    #[serde(default)]
    pub sizing: SizingMethod,

    /// Uncovered deficit handling.
    #[serde(default)]
    pub shortfall: ShortfallPolicy,

    /// Allowed distance of the reinvestment weight sum from 1.
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,

    /// Calibration settings.
    #[serde(default)]
    pub calibration: CalibrationConfig,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            sizing: SizingMethod::default(),
            shortfall: ShortfallPolicy::default(),
            weight_tolerance: default_weight_tolerance(),
            calibration: CalibrationConfig::default(),
        }
    }
}

impl ProjectionConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| EngineError::config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> EngineResult<String> {
        toml::to_string(self)
            .map_err(|e| EngineError::config(format!("Failed to serialize config: {e}")))
    }

    /// Sets the calibration settings.
    #[must_use]
    pub fn with_calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = calibration;
        self
    }

    /// Sets the sizing method.
    #[must_use]
    pub fn with_sizing(mut self, sizing: SizingMethod) -> Self {
        self.sizing = sizing;
        self
    }

    /// Sets the shortfall policy.
    #[must_use]
    pub fn with_shortfall(mut self, shortfall: ShortfallPolicy) -> Self {
        self.shortfall = shortfall;
        self
    }

    /// Sets the weight tolerance.
    #[must_use]
    pub fn with_weight_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_tolerance = tolerance;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        self.calibration.validate()?;
        if !(self.weight_tolerance.is_finite() && self.weight_tolerance >= 0.0) {
            return Err(EngineError::config(format!(
                "weight_tolerance must be finite and non-negative, got {}",
                self.weight_tolerance
            )));
        }
        Ok(())
    }
}
