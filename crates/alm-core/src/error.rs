//! Error types for the core crate.
//!
//! Dates, periods, cash flows and instrument construction all report
//! failures through [`CoreError`].

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A period string or value could not be interpreted.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// Description of the period error.
        message: String,
    },

    /// Invalid cash flow data.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the invalid cash flow.
        reason: String,
    },

    /// An instrument could not be constructed from its parameters.
    #[error("Invalid instrument '{instrument}': {reason}")]
    InvalidInstrument {
        /// Name of the instrument or family.
        instrument: String,
        /// Description of what's invalid.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid period error.
    #[must_use]
    pub fn invalid_period(message: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            message: message.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cashflow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }
}
