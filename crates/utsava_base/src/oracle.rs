//! Angam queries built on an [`Ephemeris`].
//!
//! `angam_at`, `angam_span` and `angam_transitions` are the three oracle
//! operations the series builder consumes. Boundaries are bracketed by a
//! forward scan and refined by bounded bisection.

use crate::angam::{
    AngamKind, AngamSpan, AngamTransition, angam_distance, angam_end_angle, angam_from_angle,
    previous_angam,
};
use crate::ephemeris::Ephemeris;
use crate::error::BaseError;
use crate::util::normalize_to_pm180;

/// Bisection iteration cap for boundary refinement.
const MAX_BISECT_ITER: u32 = 50;
/// Boundary tolerance in days (~0.1 s).
const BOUNDARY_TOL_DAYS: f64 = 1e-6;
/// Cap on backward steps when the span starts before the search window.
const MAX_BACKTRACK_STEPS: u32 = 64;
/// Lagna scan step in days (a lagna lasts roughly two hours).
const LAGNA_STEP_DAYS: f64 = 1.0 / 48.0;

/// Continuous angam position: angle / segment, in `[0, count)`.
pub fn angam_float<E: Ephemeris + ?Sized>(
    eph: &E,
    jd: f64,
    kind: AngamKind,
) -> Result<f64, BaseError> {
    Ok(eph.angle_deg(jd, kind)? / kind.segment_deg())
}

/// 1-based angam active at `jd`.
pub fn angam_at<E: Ephemeris + ?Sized>(eph: &E, jd: f64, kind: AngamKind) -> Result<u8, BaseError> {
    Ok(angam_from_angle(eph.angle_deg(jd, kind)?, kind))
}

/// Instant in `[lo, hi]` at which angam `index` ends, given an angle function.
///
/// `angle(lo)` must lie inside `index` and `angle(hi)` past its end.
fn boundary_between<F>(angle: F, index: u8, kind: AngamKind, lo: f64, hi: f64) -> Result<f64, BaseError>
where
    F: Fn(f64) -> Result<f64, BaseError>,
{
    let boundary = angam_end_angle(index, kind);
    let g = |t: f64| -> Result<f64, BaseError> { Ok(normalize_to_pm180(angle(t)? - boundary)) };
    crate::search::bisect(g, lo, hi, MAX_BISECT_ITER, BOUNDARY_TOL_DAYS)
}

/// Angams ending inside `[jd_sunrise, jd_next_sunrise)`.
///
/// Returns one entry per angam that ends in the window, starting with the
/// angam at `jd_sunrise`, each with its end instant. When the angam at the
/// start is still running at `jd_next_sunrise` the result is the single
/// entry `(angam, None)`.
pub fn angam_transitions<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_sunrise: f64,
    jd_next_sunrise: f64,
    kind: AngamKind,
) -> Result<Vec<AngamTransition>, BaseError> {
    let now = angam_at(eph, jd_sunrise, kind)?;
    let tmrw = angam_at(eph, jd_next_sunrise, kind)?;
    let ending = angam_distance(now, tmrw, kind);
    if ending == 0 {
        return Ok(vec![AngamTransition::new(now, None)]);
    }
    let angle = |t: f64| eph.angle_deg(t, kind);
    let mut out = Vec::with_capacity(usize::from(ending));
    let mut lo = jd_sunrise;
    let mut index = now;
    for _ in 0..ending {
        let end = boundary_between(angle, index, kind, lo, jd_next_sunrise)?;
        out.push(AngamTransition::new(index, Some(end)));
        lo = end;
        index = index % kind.count() + 1;
    }
    Ok(out)
}

/// Start and end of the occurrence of `target` found in `[jd_start, jd_end]`.
///
/// The start may precede `jd_start` when the window opens inside the
/// target. Returns `Ok(None)` when the target does not begin, or does not
/// end, inside the window.
pub fn angam_span<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_start: f64,
    jd_end: f64,
    kind: AngamKind,
    target: u8,
) -> Result<Option<AngamSpan>, BaseError> {
    let target = kind.check_index(u32::from(target))?;
    let step = kind.scan_step_days();
    let angle = |t: f64| eph.angle_deg(t, kind);

    let mut t = jd_start;
    while angam_at(eph, t, kind)? != target {
        t += step;
        if t > jd_end {
            return Ok(None);
        }
    }

    let mut lo = t - step;
    let mut backtrack = 0;
    while angam_at(eph, lo, kind)? == target {
        backtrack += 1;
        if backtrack > MAX_BACKTRACK_STEPS {
            return Err(BaseError::NoConvergence("angam span start"));
        }
        lo -= step;
    }
    let start = boundary_between(angle, previous_angam(target, kind), kind, lo, t)?;

    while angam_at(eph, t, kind)? == target {
        t += step;
        if t > jd_end + step {
            return Ok(None);
        }
    }
    let end = boundary_between(angle, target, kind, t - step, t)?;
    Ok(Some(AngamSpan { start, end }))
}

/// Lagna (ascendant rashi) changes inside `[jd_start, jd_end)`.
///
/// Same shape as [`angam_transitions`]: one entry per lagna ending in the
/// window, or `(lagna, None)` when none ends.
pub fn lagna_transitions<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_start: f64,
    jd_end: f64,
) -> Result<Vec<AngamTransition>, BaseError> {
    let kind = AngamKind::SolarRashi;
    let angle = |t: f64| eph.lagna_deg(t);
    let mut current = angam_from_angle(angle(jd_start)?, kind);
    let mut out = Vec::new();
    let mut lo = jd_start;
    let mut t = jd_start;
    while t < jd_end {
        let t1 = (t + LAGNA_STEP_DAYS).min(jd_end);
        let lagna = angam_from_angle(angle(t1)?, kind);
        if lagna != current {
            let end = boundary_between(angle, current, kind, lo.max(t), t1)?;
            out.push(AngamTransition::new(current, Some(end)));
            current = lagna;
            lo = end;
        }
        t = t1;
    }
    if out.is_empty() {
        out.push(AngamTransition::new(current, None));
    }
    Ok(out)
}
