//! Bracket-and-bisect root finding over Julian Dates.
//!
//! All angam boundaries and rise/set events are located by stepping a
//! function forward until it changes sign in the wanted direction, then
//! bisecting the bracket. Both stages are bounded.

use crate::error::BaseError;

/// Direction of a sign change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Negative to non-negative.
    Rising,
    /// Positive to non-positive.
    Falling,
}

impl Crossing {
    fn matches(self, before: f64, after: f64) -> bool {
        match self {
            Self::Rising => before < 0.0 && after >= 0.0,
            Self::Falling => before > 0.0 && after <= 0.0,
        }
    }
}

/// Bisect `f` on `[lo, hi]`, where `f(lo)` and `f(hi)` have opposite signs.
///
/// Stops after `max_iter` halvings or when the bracket is narrower than
/// `tol` days, and returns the bracket midpoint.
pub fn bisect<F>(f: F, mut lo: f64, mut hi: f64, max_iter: u32, tol: f64) -> Result<f64, BaseError>
where
    F: Fn(f64) -> Result<f64, BaseError>,
{
    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(BaseError::NoConvergence("bisection bracket has no sign change"));
    }
    for _ in 0..max_iter {
        if hi - lo < tol {
            break;
        }
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid)?;
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// Find the first crossing of `f` in `direction` after `jd_start`.
///
/// Steps by `step` days for at most `max_steps` steps. Returns `Ok(None)`
/// when no crossing is found in that window.
pub fn find_crossing<F>(
    f: F,
    jd_start: f64,
    step: f64,
    max_steps: u32,
    direction: Crossing,
    max_iter: u32,
    tol: f64,
) -> Result<Option<f64>, BaseError>
where
    F: Fn(f64) -> Result<f64, BaseError>,
{
    let mut t0 = jd_start;
    let mut f0 = f(t0)?;
    for _ in 0..max_steps {
        let t1 = t0 + step;
        let f1 = f(t1)?;
        if direction.matches(f0, f1) {
            return bisect(&f, t0, t1, max_iter, tol).map(Some);
        }
        t0 = t1;
        f0 = f1;
    }
    Ok(None)
}
