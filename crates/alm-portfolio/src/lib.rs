//! # ALM Portfolio
//!
//! Position composition for asset/liability projections.
//!
//! - [`ScaledInstrument`]: a shared instrument held at a multiple of its
//!   definition, so fractional buys and sells never touch the instrument
//! - [`Portfolio`]: an ordered list of positions with aggregate value,
//!   cash flows and in-place pro-rata rescaling
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use alm_core::prelude::*;
//! use alm_instruments::{FixedRateBondTemplate, FlatForward};
//! use alm_portfolio::prelude::*;
//!
//! let as_of = Date::from_ymd(2024, 1, 31).unwrap();
//! let curve = Arc::new(FlatForward::new(0.04).unwrap());
//! let family = FixedRateBondTemplate::new(Period::Years(10), 0.05, curve).unwrap();
//!
//! let mut portfolio = Portfolio::new();
//! portfolio.add_instrument(family.build(1_000.0, as_of).unwrap(), 1.0).unwrap();
//!
//! let before = portfolio.present_value(as_of);
//! portfolio.scale(0.7);
//! assert!((portfolio.present_value(as_of) - 0.7 * before).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod portfolio;
pub mod scaled;

pub use error::{PortfolioError, PortfolioResult};
pub use portfolio::{Portfolio, PortfolioBuilder};
pub use scaled::ScaledInstrument;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::portfolio::{Portfolio, PortfolioBuilder};
    pub use crate::scaled::ScaledInstrument;
}
