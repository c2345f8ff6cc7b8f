//! Engine error types.

use thiserror::Error;

use alm_core::error::CoreError;
use alm_core::types::Date;
use alm_math::error::MathError;
use alm_portfolio::error::PortfolioError;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure to size a new instrument to a target value.
#[derive(Debug, Clone, Error)]
pub enum CalibrationError {
    /// Target value is zero, negative or not finite.
    #[error("cannot calibrate '{family}' on {as_of}: target {target} must be positive")]
    InvalidTarget {
        /// Instrument family name.
        family: String,
        /// Valuation date.
        as_of: Date,
        /// Rejected target.
        target: f64,
    },

    /// The root finder could not bracket or converge.
    #[error("calibration of '{family}' on {as_of} to {target:.2} failed: {source}")]
    Solver {
        /// Instrument family name.
        family: String,
        /// Valuation date.
        as_of: Date,
        /// Target value.
        target: f64,
        /// Underlying solver failure.
        #[source]
        source: MathError,
    },

    /// The family refused to build an instrument during the search.
    #[error("cannot build '{family}' at notional {notional} on {as_of}: {source}")]
    Construction {
        /// Instrument family name.
        family: String,
        /// Valuation date.
        as_of: Date,
        /// Notional that failed.
        notional: f64,
        /// Construction error.
        #[source]
        source: CoreError,
    },

    /// The solved instrument does not reprice to the target.
    #[error(
        "calibrated '{family}' on {as_of} is worth {value:.6}, target {target:.6} (tolerance {tolerance:.2e})"
    )]
    ToleranceExceeded {
        /// Instrument family name.
        family: String,
        /// Valuation date.
        as_of: Date,
        /// Target value.
        target: f64,
        /// Value of the solved instrument.
        value: f64,
        /// Absolute tolerance applied.
        tolerance: f64,
    },

    /// A unit instrument has no positive value to scale against.
    #[error("unit '{family}' on {as_of} is worth {value}, cannot size a purchase from it")]
    DegenerateUnit {
        /// Instrument family name.
        family: String,
        /// Valuation date.
        as_of: Date,
        /// Unit value.
        value: f64,
    },
}

/// Engine error type.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed projection range or step
    #[error("invalid time range: {reason}")]
    InvalidTimeRange {
        /// What is wrong with the range.
        reason: String,
    },

    /// Reinvestment weights that would lose or invent cash
    #[error("invalid strategy weights: {reason}")]
    InvalidWeights {
        /// What is wrong with the weights.
        reason: String,
    },

    /// Purchase sizing failed
    #[error("calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// Nothing left to sell against a deficit
    #[error("asset portfolio worth {npv} on {date}: no value to liquidate")]
    DegenerateValue {
        /// Step date.
        date: Date,
        /// Asset portfolio value.
        npv: f64,
    },

    /// Deficit left uncovered after liquidation
    #[error("insolvent on {date}: shortfall of {shortfall:.2} left after liquidation")]
    Insolvent {
        /// Step date.
        date: Date,
        /// Uncovered amount.
        shortfall: f64,
    },

    /// Unknown metric name
    #[error("unknown metric: '{0}'")]
    UnknownMetric(String),

    /// Portfolio error
    #[error("portfolio error: {0}")]
    Portfolio(#[from] PortfolioError),

    /// Core error
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an invalid time range error.
    #[must_use]
    pub fn invalid_time_range(reason: impl Into<String>) -> Self {
        Self::InvalidTimeRange {
            reason: reason.into(),
        }
    }

    /// Creates an invalid weights error.
    #[must_use]
    pub fn invalid_weights(reason: impl Into<String>) -> Self {
        Self::InvalidWeights {
            reason: reason.into(),
        }
    }
}
