//! Amanta lunar month assignment.
//!
//! A lunar month runs from one new moon (end of tithi 30) to the next and
//! takes its number from the Sun's rashi at the closing new moon. When
//! both bounding new moons fall in the same rashi the month is adhika.

use tracing::debug;
use utsava_base::{AngamKind, AngamSpan, Ephemeris, angam_at, angam_span};

use crate::day::LunarMonth;
use crate::error::SeriesError;

/// Tithi of the new moon.
const AMAVASYA: u8 = 30;
/// Search window for the next new moon, in days after the previous one.
const NEXT_NEW_MOON_WINDOW: (f64, f64) = (24.0, 32.0);

fn new_moon_in<E: Ephemeris + ?Sized>(eph: &E, lo: f64, hi: f64) -> Result<AngamSpan, SeriesError> {
    angam_span(eph, lo, hi, AngamKind::Tithi, AMAVASYA)?.ok_or(SeriesError::SpanNotFound {
        kind: AngamKind::Tithi,
        target: AMAVASYA,
        start: lo,
        end: hi,
    })
}

/// Lunar month for each sunrise in `sunrises` (ascending).
///
/// A day belongs to the month whose closing new moon ends at or after
/// its sunrise.
pub fn assign_lunar_months<E: Ephemeris + ?Sized>(
    eph: &E,
    sunrises: &[f64],
) -> Result<Vec<LunarMonth>, SeriesError> {
    let Some(&jd0) = sunrises.first() else {
        return Ok(Vec::new());
    };
    let tithi = f64::from(angam_at(eph, jd0, AngamKind::Tithi)?);
    let mut last = new_moon_in(eph, jd0 - tithi - 3.0, jd0 - tithi + 3.0)?;
    let mut last_rashi = angam_at(eph, last.end, AngamKind::SolarRashi)?;

    let mut months = Vec::with_capacity(sunrises.len());
    while months.len() < sunrises.len() {
        let this = new_moon_in(
            eph,
            last.end + NEXT_NEW_MOON_WINDOW.0,
            last.end + NEXT_NEW_MOON_WINDOW.1,
        )?;
        let this_rashi = angam_at(eph, this.end, AngamKind::SolarRashi)?;
        let month = LunarMonth::from_new_moon_rashis(last_rashi, this_rashi);
        debug!(new_moon = this.end, %month, "lunar month");
        while let Some(&sr) = sunrises.get(months.len()) {
            if sr > this.end {
                break;
            }
            months.push(month);
        }
        last = this;
        last_rashi = this_rashi;
    }
    Ok(months)
}
