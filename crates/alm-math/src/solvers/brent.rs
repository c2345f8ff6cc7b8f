//! Brent's root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Keeps a sign-changing bracket and steps by inverse quadratic
/// interpolation or secant when the step is safe, bisecting otherwise.
/// `f(a)` and `f(b)` must not share a sign.
///
/// Stops when `|f(b)| <= config.tolerance` or when the bracket is down to
/// float resolution around `b`.
///
/// # Example
///
/// ```rust
/// use alm_math::solvers::{brent, SolverConfig};
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn brent<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let eval = |x: f64| -> MathResult<f64> {
        let fx = f(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(MathError::non_finite(x, fx))
        }
    };

    let (mut a, mut fa) = (a, eval(a)?);
    let (mut b, mut fb) = (b, eval(b)?);
    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // b: best estimate, a: previous estimate, c: keeps the sign change with b
    let (mut c, mut fc) = (b, fb);
    let mut step = b - a;
    let mut prev_step = step;

    for iteration in 0..config.max_iterations {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            step = b - a;
            prev_step = step;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let resolution = 2.0 * f64::EPSILON * b.abs().max(1.0);
        let half_width = 0.5 * (c - b);
        if fb.abs() <= config.tolerance || half_width.abs() <= resolution {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if prev_step.abs() >= resolution && fa.abs() > fb.abs() {
            // Secant when only two points are known, inverse quadratic otherwise
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * half_width * s, 1.0 - s)
            } else {
                let q0 = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half_width * q0 * (q0 - r) - (b - a) * (r - 1.0)),
                    (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let limit = (3.0 * half_width * q - (resolution * q).abs()).min((prev_step * q).abs());
            if 2.0 * p < limit {
                prev_step = step;
                step = p / q;
            } else {
                step = half_width;
                prev_step = step;
            }
        } else {
            step = half_width;
            prev_step = step;
        }

        a = b;
        fa = fb;
        b += if step.abs() > resolution {
            step
        } else {
            resolution.copysign(half_width)
        };
        fb = eval(b)?;
    }

    log::debug!(
        "brent: no convergence after {} iterations, best x = {}, residual = {:.3e}",
        config.max_iterations,
        b,
        fb
    );
    Err(MathError::convergence_failed(
        config.max_iterations,
        fb.abs(),
    ))
}
