//! Outward bracket search from an initial guess.

use crate::error::{MathError, MathResult};

/// Default half-width of the first bracket around the guess.
pub const DEFAULT_INITIAL_STEP: f64 = 1e-3;

/// Default geometric growth factor applied on each expansion.
pub const DEFAULT_GROWTH: f64 = 1.6;

/// Default evaluation budget for the bracket search.
pub const DEFAULT_MAX_EVALUATIONS: u32 = 100;

/// Configuration for [`bracket_root`].
#[derive(Debug, Clone, Copy)]
pub struct BracketConfig {
    /// Half-width of the first bracket around the guess.
    pub initial_step: f64,
    /// Factor by which a side is pushed out, relative to the current width.
    pub growth: f64,
    /// Maximum number of function evaluations.
    pub max_evaluations: u32,
    /// Hard lower limit on the search, if any.
    pub lower_bound: Option<f64>,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            initial_step: DEFAULT_INITIAL_STEP,
            growth: DEFAULT_GROWTH,
            max_evaluations: DEFAULT_MAX_EVALUATIONS,
            lower_bound: None,
        }
    }
}

impl BracketConfig {
    /// Sets the initial half-width.
    #[must_use]
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    /// Sets the growth factor.
    #[must_use]
    pub fn with_growth(mut self, growth: f64) -> Self {
        self.growth = growth;
        self
    }

    /// Sets the evaluation budget.
    #[must_use]
    pub fn with_max_evaluations(mut self, max_evaluations: u32) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Sets a hard lower limit on the search.
    #[must_use]
    pub fn with_lower_bound(mut self, lower_bound: f64) -> Self {
        self.lower_bound = Some(lower_bound);
        self
    }

    fn validate(&self) -> MathResult<()> {
        if !(self.initial_step.is_finite() && self.initial_step > 0.0) {
            return Err(MathError::invalid_input(format!(
                "bracket step must be positive, got {}",
                self.initial_step
            )));
        }
        if !(self.growth.is_finite() && self.growth > 1.0) {
            return Err(MathError::invalid_input(format!(
                "bracket growth must exceed 1, got {}",
                self.growth
            )));
        }
        if self.max_evaluations < 2 {
            return Err(MathError::invalid_input(
                "bracket search needs at least 2 evaluations",
            ));
        }
        Ok(())
    }
}

/// An interval on which the function changes sign (or hits zero).
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    /// Lower end.
    pub lower: f64,
    /// Upper end.
    pub upper: f64,
    /// Function value at `lower`.
    pub f_lower: f64,
    /// Function value at `upper`.
    pub f_upper: f64,
    /// Function evaluations spent finding it.
    pub evaluations: u32,
}

/// Expands outward from `guess` until `f` changes sign.
///
/// Starts from `[guess - step, guess + step]` (clipped at the lower bound)
/// and repeatedly pushes out the side whose value is closer to zero, by
/// `growth` times the current width. A side pinned at the lower bound is
/// never pushed further down.
///
/// # Errors
///
/// - `MathError::InvalidInput` for a non-finite guess or a bad config
/// - `MathError::NonFiniteValue` if `f` returns NaN or an infinity
/// - `MathError::BracketNotFound` when the budget runs out
pub fn bracket_root<F>(f: F, guess: f64, config: &BracketConfig) -> MathResult<Bracket>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    if !guess.is_finite() {
        return Err(MathError::invalid_input(format!(
            "initial guess must be finite, got {guess}"
        )));
    }

    let floor = config.lower_bound.unwrap_or(f64::NEG_INFINITY);
    let guess = guess.max(floor);

    let eval = |x: f64| -> MathResult<f64> {
        let fx = f(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(MathError::non_finite(x, fx))
        }
    };

    let mut lower = (guess - config.initial_step).max(floor);
    let mut upper = guess + config.initial_step;
    let mut f_lower = eval(lower)?;
    let mut f_upper = eval(upper)?;
    let mut evaluations = 2;

    loop {
        if f_lower * f_upper <= 0.0 {
            log::debug!(
                "bracketed root in [{}, {}] after {} evaluations",
                lower,
                upper,
                evaluations
            );
            return Ok(Bracket {
                lower,
                upper,
                f_lower,
                f_upper,
                evaluations,
            });
        }

        if evaluations >= config.max_evaluations {
            log::warn!(
                "no sign change found from guess {} in [{}, {}] after {} evaluations",
                guess,
                lower,
                upper,
                evaluations
            );
            return Err(MathError::BracketNotFound {
                guess,
                lower,
                upper,
                evaluations,
            });
        }

        let width = upper - lower;
        if f_lower.abs() < f_upper.abs() && lower > floor {
            lower = (lower - config.growth * width).max(floor);
            f_lower = eval(lower)?;
        } else {
            upper += config.growth * width;
            f_upper = eval(upper)?;
        }
        evaluations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_bracketed() {
        let f = |x: f64| x - 1.0;
        let bracket = bracket_root(f, 1.0, &BracketConfig::default()).unwrap();

        assert!(bracket.lower < 1.0 && bracket.upper > 1.0);
        assert_eq!(bracket.evaluations, 2);
    }

    #[test]
    fn test_expands_upward() {
        let f = |x: f64| x - 500_000.0;
        let config = BracketConfig::default().with_initial_step(1.0);
        let bracket = bracket_root(f, 1000.0, &config).unwrap();

        assert!(bracket.f_lower * bracket.f_upper <= 0.0);
        assert!(bracket.lower <= 500_000.0 && bracket.upper >= 500_000.0);
    }

    #[test]
    fn test_expands_downward() {
        let f = |x: f64| x + 250.0;
        let config = BracketConfig::default().with_initial_step(1.0);
        let bracket = bracket_root(f, 1000.0, &config).unwrap();

        assert!(bracket.lower <= -250.0 && bracket.upper >= -250.0);
    }

    #[test]
    fn test_lower_bound_respected() {
        // Root below the floor: search must never evaluate under it
        let f = |x: f64| {
            assert!(x >= 0.0, "evaluated below floor at {x}");
            x + 5.0
        };
        let config = BracketConfig::default()
            .with_lower_bound(0.0)
            .with_max_evaluations(30);

        let err = bracket_root(f, 10.0, &config).unwrap_err();
        assert!(matches!(err, MathError::BracketNotFound { evaluations: 30, .. }));
    }

    #[test]
    fn test_guess_below_floor_is_clamped() {
        let f = |x: f64| x - 3.0;
        let config = BracketConfig::default().with_lower_bound(0.0);
        let bracket = bracket_root(f, -100.0, &config).unwrap();

        assert!(bracket.lower >= 0.0);
        assert!(bracket.upper >= 3.0);
    }

    #[test]
    fn test_invalid_config() {
        let f = |x: f64| x;
        assert!(bracket_root(f, 1.0, &BracketConfig::default().with_growth(1.0)).is_err());
        assert!(bracket_root(f, 1.0, &BracketConfig::default().with_initial_step(0.0)).is_err());
        assert!(bracket_root(f, 1.0, &BracketConfig::default().with_max_evaluations(1)).is_err());
        assert!(bracket_root(f, f64::NAN, &BracketConfig::default()).is_err());
    }

    #[test]
    fn test_non_finite_aborts() {
        let f = |x: f64| if x > 2.0 { f64::INFINITY } else { -1.0 };
        let config = BracketConfig::default().with_initial_step(0.5);

        let err = bracket_root(f, 1.0, &config).unwrap_err();
        assert!(matches!(err, MathError::NonFiniteValue { .. }));
    }
}
