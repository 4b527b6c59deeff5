//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Halves the bracketing interval until the midpoint residual or the
/// interval width falls below the tolerance. Slow but unconditionally
/// convergent inside a valid bracket.
///
/// Requires: `f(a) * f(b) < 0` (opposite signs at endpoints)
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a;
    let mut hi = b;
    let mut flo = f(lo);
    let fhi = f(hi);

    if flo == 0.0 {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: flo,
        });
    }
    if fhi == 0.0 {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: fhi,
        });
    }
    if flo * fhi > 0.0 || flo.is_nan() || fhi.is_nan() {
        return Err(MathError::InvalidBracket {
            a,
            b,
            fa: flo,
            fb: fhi,
        });
    }

    let mut mid = 0.5 * (lo + hi);
    let mut fmid = f(mid);

    for iteration in 0..config.max_iterations {
        if fmid.abs() < config.tolerance || (hi - lo).abs() < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration,
                residual: fmid,
            });
        }

        if flo * fmid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            flo = fmid;
        }

        mid = 0.5 * (lo + hi);
        fmid = f(mid);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        mid,
        fmid,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::new(1e-12, 100);

        let result = bisection(f, 1.0, 2.0, &config).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x + 1.0;
        assert!(bisection(f, -1.0, 1.0, &SolverConfig::default()).is_err());
    }

    #[test]
    fn test_agrees_with_brent() {
        let f = |x: f64| x.exp() - 2.0;
        let config = SolverConfig::new(1e-12, 200);

        let bis = bisection(f, 0.0, 1.0, &config).unwrap();
        let br = super::super::brent(f, 0.0, 1.0, &config).unwrap();

        assert_relative_eq!(bis.root, br.root, epsilon = 1e-9);
    }
}
