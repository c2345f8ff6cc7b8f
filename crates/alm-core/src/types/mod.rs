//! Domain types for projection calculations.
//!
//! - [`Date`]: Calendar date
//! - [`Period`]: Tenor or time step (`1M`, `6M`, `10Y`)
//! - [`CashFlow`]: Dated cash flow amount
//! - [`Frequency`]: Payment frequency
//! - [`Compounding`]: Interest compounding convention

mod cashflow;
mod date;
mod frequency;
mod period;

pub use cashflow::{CashFlow, CashFlowType};
pub use date::Date;
pub use frequency::{Compounding, Frequency};
pub use period::Period;
