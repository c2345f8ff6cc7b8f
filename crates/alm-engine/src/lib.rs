//! # ALM Engine
//!
//! Asset/liability projection for insurance-style balance sheets.
//!
//! This crate provides:
//! - [`ProjectionEngine`]: steps asset and liability portfolios through
//!   time and records a [`ProjectionSample`] per step
//! - [`Calibrator`]: sizes a new instrument so its value hits a target
//! - [`ReinvestmentStrategy`] / [`DisinvestmentStrategy`]: fixed-weight
//!   purchases of a surplus and pro-rata sales against a deficit
//! - [`ProjectionConfig`]: TOML-loadable settings
//!
//! ## Step
//!
//! ```text
//! cash += asset flows - liability flows      (window: day after last step .. today)
//! record sample (cash, flows, market values)
//! cash > 0  ─> ReinvestmentStrategy ─> Calibrator ─> new positions
//! cash < 0  ─> DisinvestmentStrategy ─> Portfolio::scale
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use alm_core::prelude::*;
//! use alm_engine::prelude::*;
//! use alm_instruments::{FixedRateBondTemplate, FlatForward};
//! use alm_portfolio::Portfolio;
//!
//! let curve: Arc<dyn YieldCurve> = Arc::new(FlatForward::new(0.04).unwrap());
//! let family = FixedRateBondTemplate::new(Period::Years(10), 0.05, curve).unwrap();
//!
//! let mut engine = ProjectionEngine::new(
//!     Portfolio::new(),
//!     Portfolio::new(),
//!     100_000.0,
//!     vec![StrategyWeight::new(Arc::new(family), 1.0)],
//!     ProjectionConfig::default(),
//! )
//! .unwrap();
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = start.add_years(1).unwrap();
//! let samples = engine.project(start, end, Period::Months(1)).unwrap();
//!
//! assert_eq!(samples.len(), 12);
//! assert_eq!(samples[0].cash, 100_000.0);
//! assert!(samples[0].residual_cash.abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod calibration;
pub mod config;
pub mod error;
pub mod projection;
pub mod sample;
pub mod strategy;

// Re-exports
pub use builder::ProjectionEngineBuilder;
pub use calibration::{Calibrated, CalibrationTarget, Calibrator};
pub use config::{CalibrationConfig, ProjectionConfig, ShortfallPolicy, SizingMethod};
pub use error::{CalibrationError, EngineError, EngineResult};
pub use projection::ProjectionEngine;
pub use sample::{Metric, ProjectionSample};
pub use strategy::{
    DisinvestmentStrategy, InvestmentStrategy, Liquidation, ReinvestmentStrategy, StrategyWeight,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::ProjectionEngineBuilder;
    pub use crate::calibration::{Calibrated, CalibrationTarget, Calibrator};
    pub use crate::config::{CalibrationConfig, ProjectionConfig, ShortfallPolicy, SizingMethod};
    pub use crate::error::{CalibrationError, EngineError, EngineResult};
    pub use crate::projection::ProjectionEngine;
    pub use crate::sample::{Metric, ProjectionSample};
    pub use crate::strategy::{
        DisinvestmentStrategy, InvestmentStrategy, Liquidation, ReinvestmentStrategy,
        StrategyWeight,
    };
}
