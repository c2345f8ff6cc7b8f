//! Portfolio builder for fluent construction.

use std::sync::Arc;

use alm_core::traits::Instrument;

use crate::{Portfolio, PortfolioResult, ScaledInstrument};

/// Builder for constructing a [`Portfolio`].
///
/// Scalars are checked once, at [`build`](Self::build).
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use alm_core::prelude::*;
/// use alm_instruments::{CashflowLeg, FlatForward};
/// use alm_portfolio::Portfolio;
///
/// let curve = Arc::new(FlatForward::new(0.03).unwrap());
/// let dates = (1..=10).map(|y| Date::from_ymd(2024 + y, 1, 31).unwrap());
/// let benefits = CashflowLeg::level(dates, 10_000.0, curve).unwrap();
///
/// let liabilities = Portfolio::builder()
///     .add_unit(Arc::new(benefits))
///     .build()
///     .unwrap();
/// assert_eq!(liabilities.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    positions: Vec<(Arc<dyn Instrument>, f64)>,
}

impl PortfolioBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `scalar` units of `instrument`.
    #[must_use]
    pub fn add(mut self, instrument: Arc<dyn Instrument>, scalar: f64) -> Self {
        self.positions.push((instrument, scalar));
        self
    }

    /// Adds one unit of `instrument`.
    #[must_use]
    pub fn add_unit(self, instrument: Arc<dyn Instrument>) -> Self {
        self.add(instrument, 1.0)
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidScalar` for the first negative or
    /// non-finite scalar.
    pub fn build(self) -> PortfolioResult<Portfolio> {
        self.positions
            .into_iter()
            .map(|(instrument, scalar)| ScaledInstrument::new(instrument, scalar))
            .collect()
    }
}
