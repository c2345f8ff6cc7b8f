//! Root-finding algorithms.
//!
//! [`brent`] needs a sign-changing bracket; [`bracket_root`] finds one by
//! widening around a guess; [`solve_from_guess`] does both.
//!
//! # Example
//!
//! ```rust
//! use alm_math::solvers::{solve_from_guess, BracketConfig, SolverConfig};
//!
//! // Value is linear in notional: 0.97 per unit, target value 250,000
//! let residual = |notional: f64| 0.97 * notional - 250_000.0;
//!
//! let bracket = BracketConfig::default().with_lower_bound(0.0);
//! let result = solve_from_guess(residual, 1000.0, &bracket, &SolverConfig::default()).unwrap();
//! assert!((0.97 * result.root - 250_000.0).abs() < 1e-6);
//! ```

mod bracket;
mod brent;

pub use bracket::{bracket_root, Bracket, BracketConfig};
pub use brent::brent;

use crate::error::{MathError, MathResult};

/// Stopping rule for [`brent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Converged once `|f(x)|` is at most this.
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    /// `|f| <= 1e-10` within 100 iterations.
    fn default() -> Self {
        Self::new(1e-10, 100)
    }
}

impl SolverConfig {
    /// Tolerance on `|f|` and iteration budget.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Replaces the tolerance.
    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self { tolerance, ..self }
    }

    /// Replaces the iteration budget.
    #[must_use]
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }

    /// Rejects non-positive or non-finite tolerances and a zero budget.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// Abscissa of the root.
    pub root: f64,
    /// Interpolation or bisection steps taken; 0 when a bracket endpoint was the root.
    pub iterations: u32,
    /// `f(root)`
    pub residual: f64,
}

/// Brackets from `guess` with [`bracket_root`] and refines with [`brent`].
///
/// # Errors
///
/// Whatever either stage reports: `BracketNotFound`, `NonFiniteValue`,
/// `ConvergenceFailed` or `InvalidInput`.
pub fn solve_from_guess<F>(
    f: F,
    guess: f64,
    bracket_config: &BracketConfig,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let Bracket {
        lower,
        upper,
        f_lower,
        f_upper,
        ..
    } = bracket_root(&f, guess, bracket_config)?;

    let exact = |root| SolverResult {
        root,
        iterations: 0,
        residual: 0.0,
    };
    match (f_lower == 0.0, f_upper == 0.0) {
        (true, _) => Ok(exact(lower)),
        (false, true) => Ok(exact(upper)),
        (false, false) => brent(f, lower, upper, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);
        assert_eq!(config, SolverConfig::new(1e-8, 50));
        assert!(config.validate().is_ok());

        assert!(config.with_tolerance(0.0).validate().is_err());
        assert!(config.with_tolerance(f64::NAN).validate().is_err());
        assert!(config.with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_solve_from_guess_far_root() {
        // Root far above the guess forces several expansions
        let f = |x: f64| 1.02 * x - 1_000_000.0;
        let bracket = BracketConfig::default().with_lower_bound(0.0);

        let result = solve_from_guess(f, 1000.0, &bracket, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 1_000_000.0 / 1.02, max_relative = 1e-12);
    }

    #[test]
    fn test_solve_from_guess_root_below_guess() {
        let f = |x: f64| 0.5 * x - 10.0;
        let bracket = BracketConfig::default().with_lower_bound(0.0);

        let result = solve_from_guess(f, 1000.0, &bracket, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 20.0, epsilon = 1e-8);
    }

    #[test]
    fn test_solve_from_guess_exact_hit() {
        let f = |x: f64| x - 1001.0;
        let bracket = BracketConfig::default().with_initial_step(1.0);

        let result = solve_from_guess(f, 1000.0, &bracket, &SolverConfig::default()).unwrap();
        assert_eq!(result.root, 1001.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_solve_from_guess_no_root() {
        let f = |x: f64| x * x + 1.0;
        let bracket = BracketConfig::default().with_max_evaluations(20);

        let err = solve_from_guess(f, 1.0, &bracket, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, MathError::BracketNotFound { .. }));
    }
}
