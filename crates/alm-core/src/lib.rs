//! # ALM Core
//!
//! Dates, cash flows and the valuation traits every other `alm-*` crate
//! builds on:
//!
//! - **Types**: `Date`, `Period`, `CashFlow`, `Frequency`, `Compounding`
//! - **Day Count Conventions**: year fractions used for accrual and discounting
//! - **Traits**: the valuation capability (`Instrument`), instrument families
//!   used for calibration (`InstrumentFamily`) and discount curves (`YieldCurve`)
//!
//! ## Valuation Date
//!
//! There is no process-wide evaluation date. Every valuation takes the as-of
//! date as an argument, so a stale date can never leak into a price.
//!
//! ## Example
//!
//! ```rust
//! use alm_core::prelude::*;
//!
//! let flows = vec![
//!     CashFlow::coupon(Date::from_ymd(2025, 1, 31).unwrap(), 2.5),
//!     CashFlow::principal(Date::from_ymd(2025, 7, 31).unwrap(), 100.0),
//! ];
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 6, 30).unwrap();
//! assert_eq!(total_cashflow_between(&flows, start, end), 2.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod daycounts;
pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::{total_cashflow_between, Instrument, InstrumentFamily, YieldCurve};
    pub use crate::types::{CashFlow, CashFlowType, Compounding, Date, Frequency, Period};
}

pub use error::{CoreError, CoreResult};
pub use traits::{total_cashflow_between, Instrument, InstrumentFamily, YieldCurve};
pub use types::{CashFlow, CashFlowType, Compounding, Date, Frequency, Period};
