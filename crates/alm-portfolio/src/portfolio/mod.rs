//! Position lists.
//!
//! [`Portfolio`] holds scaled positions and answers value and cash flow
//! queries; [`PortfolioBuilder`] assembles one with scalar checks.

mod builder;
#[allow(clippy::module_inception)]
mod portfolio;

pub use builder::PortfolioBuilder;
pub use portfolio::Portfolio;
