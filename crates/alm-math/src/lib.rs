//! Root finding for position sizing.
//!
//! Calibration needs the notional at which an instrument is worth a given
//! amount. The value is monotone in notional but the scale is unknown, so
//! [`solvers::bracket_root`] first widens an interval around a guess until
//! the residual changes sign, and [`solvers::brent`] then closes it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bracket_root, brent, solve_from_guess, Bracket, BracketConfig, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
