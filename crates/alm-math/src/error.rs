//! Solver failures.

use thiserror::Error;

/// Result alias for root finding and bracketing.
pub type MathResult<T> = Result<T, MathError>;

/// Why a root search stopped without an answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iteration budget spent before the tolerance was met.
    #[error("no convergence within {iterations} iterations, last residual {residual:.3e}")]
    ConvergenceFailed {
        /// Iterations performed.
        iterations: u32,
        /// Objective value at the last iterate.
        residual: f64,
    },

    /// The supplied endpoints do not straddle a root.
    #[error("[{a}, {b}] does not bracket a root: f(a) = {fa:.3e}, f(b) = {fb:.3e}")]
    InvalidBracket {
        /// Left endpoint.
        a: f64,
        /// Right endpoint.
        b: f64,
        /// `f(a)`
        fa: f64,
        /// `f(b)`
        fb: f64,
    },

    /// Outward search from `guess` never saw the function change sign.
    #[error("no sign change around guess {guess} in [{lower}, {upper}] after {evaluations} evaluations")]
    BracketNotFound {
        /// Search origin.
        guess: f64,
        /// Lowest point evaluated.
        lower: f64,
        /// Highest point evaluated.
        upper: f64,
        /// Objective calls spent.
        evaluations: u32,
    },

    /// The objective produced NaN or an infinity.
    #[error("objective returned {value} at x = {x}")]
    NonFiniteValue {
        /// Evaluation point.
        x: f64,
        /// Offending value.
        value: f64,
    },

    /// Bad solver settings or arguments.
    #[error("invalid solver input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },
}

impl MathError {
    /// Iteration budget exhausted.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Rejected argument or setting.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// NaN or infinite objective value at `x`.
    #[must_use]
    pub fn non_finite(x: f64, value: f64) -> Self {
        Self::NonFiniteValue { x, value }
    }

    /// True when more iterations or a wider search might have succeeded.
    #[must_use]
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(
            self,
            Self::ConvergenceFailed { .. } | Self::BracketNotFound { .. }
        )
    }
}
