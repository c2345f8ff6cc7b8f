//! Portfolio struct and core methods.

use std::sync::Arc;

use alm_core::traits::{total_cashflow_between, Instrument};
use alm_core::types::{CashFlow, Date};

use crate::error::{PortfolioError, PortfolioResult};
use crate::scaled::ScaledInstrument;

/// An ordered collection of scaled positions.
///
/// Value is the plain sum of position values, with no netting. Positions
/// are appended by strategies and never removed; selling everything leaves
/// the position in place with scalar 0.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    positions: Vec<ScaledInstrument>,
}

impl Portfolio {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder() -> super::PortfolioBuilder {
        super::PortfolioBuilder::new()
    }

    /// Appends a position.
    pub fn add(&mut self, position: ScaledInstrument) {
        self.positions.push(position);
    }

    /// Appends `scalar` units of `instrument`.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidScalar` if `scalar` is negative or
    /// not finite.
    pub fn add_instrument(
        &mut self,
        instrument: Arc<dyn Instrument>,
        scalar: f64,
    ) -> PortfolioResult<()> {
        self.add(ScaledInstrument::new(instrument, scalar)?);
        Ok(())
    }

    /// Multiplies every position's scalar by `factor`, in place.
    ///
    /// Not bounds checked: callers must not pass a negative factor.
    pub fn scale(&mut self, factor: f64) {
        for position in &mut self.positions {
            position.scale(factor);
        }
    }

    /// Sum of position values as of `as_of`.
    #[must_use]
    pub fn present_value(&self, as_of: Date) -> f64 {
        self.positions.iter().map(|p| p.present_value(as_of)).sum()
    }

    /// Concatenated scaled cash flows of every position, in position order.
    #[must_use]
    pub fn cashflows(&self) -> Vec<CashFlow> {
        self.positions
            .iter()
            .flat_map(ScaledInstrument::cashflows)
            .collect()
    }

    /// Sum of scaled cash flows dated in `[start, end]`, both inclusive.
    #[must_use]
    pub fn cashflow_between(&self, start: Date, end: Date) -> f64 {
        self.positions
            .iter()
            .map(|p| total_cashflow_between(&p.cashflows(), start, end))
            .sum()
    }

    /// Returns the number of positions, including sold-out ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the portfolio has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the positions in insertion order.
    #[must_use]
    pub fn positions(&self) -> &[ScaledInstrument] {
        &self.positions
    }

    /// Iterates over the positions.
    pub fn iter(&self) -> std::slice::Iter<'_, ScaledInstrument> {
        self.positions.iter()
    }

    /// Validates portfolio state.
    ///
    /// Checks that every scalar is finite and non-negative, which
    /// unchecked [`scale`](Self::scale) calls could break.
    pub fn validate(&self) -> PortfolioResult<()> {
        for (index, position) in self.positions.iter().enumerate() {
            let scalar = position.scalar();
            if !(scalar.is_finite() && scalar >= 0.0) {
                return Err(PortfolioError::invalid_portfolio(format!(
                    "position {index} has scalar {scalar}"
                )));
            }
        }
        Ok(())
    }
}

impl Instrument for Portfolio {
    fn present_value(&self, as_of: Date) -> f64 {
        Portfolio::present_value(self, as_of)
    }

    fn cashflows(&self) -> Vec<CashFlow> {
        Portfolio::cashflows(self)
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a ScaledInstrument;
    type IntoIter = std::slice::Iter<'a, ScaledInstrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

impl FromIterator<ScaledInstrument> for Portfolio {
    fn from_iter<I: IntoIterator<Item = ScaledInstrument>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
