//! # ALM Instruments
//!
//! Reference instruments implementing the `alm-core` valuation traits:
//!
//! - [`FlatForward`]: flat discount curve, re-anchored at every as-of date
//! - [`FixedRateBond`]: fixed coupon bond on a backward-generated schedule
//! - [`FixedRateBondTemplate`]: bond family for calibrated reinvestment
//! - [`CashflowLeg`]: fixed dated amounts, typically a liability stream
//!
//! The projection engine only sees the traits, so any other instrument
//! library can be plugged in instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod bond;
pub mod curve;
pub mod leg;
pub mod pricing;
pub mod schedule;
pub mod template;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{FixedRateBond, FixedRateBondBuilder};
    pub use crate::curve::FlatForward;
    pub use crate::leg::CashflowLeg;
    pub use crate::pricing::discount_flows;
    pub use crate::schedule::Schedule;
    pub use crate::template::FixedRateBondTemplate;
}

pub use bond::{FixedRateBond, FixedRateBondBuilder};
pub use curve::FlatForward;
pub use leg::CashflowLeg;
pub use schedule::Schedule;
pub use template::FixedRateBondTemplate;
