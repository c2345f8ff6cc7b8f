//! Error types for portfolio operations.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A position scalar is negative or not finite.
    #[error("Invalid scalar {value}: positions must be finite and non-negative")]
    InvalidScalar {
        /// The rejected scalar.
        value: f64,
    },

    /// Invalid portfolio state.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// The reason the portfolio is invalid.
        reason: String,
    },
}

impl PortfolioError {
    /// Create an invalid scalar error.
    #[must_use]
    pub fn invalid_scalar(value: f64) -> Self {
        Self::InvalidScalar { value }
    }

    /// Create an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::invalid_portfolio("test reason");
        assert!(err.to_string().contains("test reason"));
    }

    #[test]
    fn test_invalid_scalar_display() {
        let err = PortfolioError::invalid_scalar(-0.5);
        assert!(err.to_string().contains("-0.5"));
    }
}
