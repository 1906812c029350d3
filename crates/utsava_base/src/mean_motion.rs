//! Low-precision analytic ephemeris.
//!
//! Mean orbital elements with the leading periodic terms (Sun: equation of
//! centre; Moon: evection, variation, annual equation and the largest
//! latitude term). Longitudes are good to roughly a tenth of a degree for
//! the Sun and half a degree for the Moon, which places angam boundaries
//! within tens of minutes. Rise and set instants come from a stepped
//! altitude search. UT and TT are not distinguished.

use crate::angam::AngamKind;
use crate::ayanamsha::{AyanamshaSystem, ayanamsha_deg};
use crate::calendar::{J2000_JD, jd_to_centuries};
use crate::ephemeris::Ephemeris;
use crate::error::BaseError;
use crate::riseset::{GeoLocation, Luminary, RiseSetEvent};
use crate::search::{Crossing, find_crossing};
use crate::util::normalize_360;

/// Altitude scan step in days (15 minutes).
const ALTITUDE_STEP_DAYS: f64 = 1.0 / 96.0;
/// Altitude scan window: two days of steps.
const ALTITUDE_MAX_STEPS: u32 = 192;

/// Tropical ecliptic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
}

/// Apparent tropical position of the Sun.
pub fn sun_position(jd: f64) -> EclipticPosition {
    let d = jd - J2000_JD;
    let l = 280.46646 + 0.985_647_36 * d;
    let g = (357.52911 + 0.985_600_28 * d).to_radians();
    let lon = l + 1.914_602 * g.sin() + 0.019_993 * (2.0 * g).sin();
    EclipticPosition {
        longitude_deg: normalize_360(lon),
        latitude_deg: 0.0,
    }
}

/// Tropical position of the Moon.
pub fn moon_position(jd: f64) -> EclipticPosition {
    let d = jd - J2000_JD;
    let l = 218.316_447_7 + 13.176_396_48 * d;
    let elong = (297.850_192_1 + 12.190_749_12 * d).to_radians();
    let m_sun = (357.529_109_2 + 0.985_600_28 * d).to_radians();
    let m_moon = (134.963_396_4 + 13.064_992_95 * d).to_radians();
    let f = (93.272_095_0 + 13.229_350_24 * d).to_radians();
    let lon = l + 6.289 * m_moon.sin() + 1.274 * (2.0 * elong - m_moon).sin()
        + 0.658 * (2.0 * elong).sin()
        + 0.214 * (2.0 * m_moon).sin()
        - 0.186 * m_sun.sin()
        - 0.114 * (2.0 * f).sin();
    EclipticPosition {
        longitude_deg: normalize_360(lon),
        latitude_deg: 5.128 * f.sin(),
    }
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    23.439_291 - 0.013_004_2 * jd_to_centuries(jd)
}

/// Greenwich mean sidereal time in degrees.
pub fn gmst_deg(jd: f64) -> f64 {
    normalize_360(280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD))
}

/// Equatorial coordinates (right ascension, declination) in radians.
fn equatorial(pos: EclipticPosition, obliquity_deg: f64) -> (f64, f64) {
    let lam = pos.longitude_deg.to_radians();
    let beta = pos.latitude_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let sin_dec = beta.sin() * eps.cos() + beta.cos() * eps.sin() * lam.sin();
    let ra = (lam.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lam.cos());
    (ra, sin_dec.clamp(-1.0, 1.0).asin())
}

/// Reference ephemeris from mean motions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanMotionEphemeris {
    pub location: GeoLocation,
    pub ayanamsha: AyanamshaSystem,
}

impl MeanMotionEphemeris {
    pub fn new(location: GeoLocation, ayanamsha: AyanamshaSystem) -> Result<Self, BaseError> {
        location.validate()?;
        Ok(Self { location, ayanamsha })
    }

    fn sidereal(&self, tropical_deg: f64, jd: f64) -> f64 {
        normalize_360(tropical_deg - ayanamsha_deg(self.ayanamsha, jd))
    }

    /// Geocentric altitude of a luminary's centre in degrees.
    pub fn altitude_deg(&self, jd: f64, body: Luminary) -> f64 {
        let pos = match body {
            Luminary::Sun => sun_position(jd),
            Luminary::Moon => moon_position(jd),
        };
        let (ra, dec) = equatorial(pos, mean_obliquity_deg(jd));
        let lst = (gmst_deg(jd) + self.location.longitude_deg).to_radians();
        let h = lst - ra;
        let lat = self.location.latitude_rad();
        let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos();
        sin_alt.clamp(-1.0, 1.0).asin().to_degrees()
    }
}

impl Ephemeris for MeanMotionEphemeris {
    fn angle_deg(&self, jd: f64, kind: AngamKind) -> Result<f64, BaseError> {
        let sun = sun_position(jd).longitude_deg;
        let moon = moon_position(jd).longitude_deg;
        Ok(match kind {
            AngamKind::Tithi | AngamKind::Karana => normalize_360(moon - sun),
            AngamKind::Nakshatra | AngamKind::NakshatraPada => self.sidereal(moon, jd),
            AngamKind::Yoga => normalize_360(self.sidereal(moon, jd) + self.sidereal(sun, jd)),
            AngamKind::SolarRashi | AngamKind::SolarNakshatra | AngamKind::SolarNakshatraPada => {
                self.sidereal(sun, jd)
            }
            AngamKind::TropicalRashi => sun,
        })
    }

    fn next_event(&self, jd: f64, event: RiseSetEvent) -> Result<f64, BaseError> {
        let body = event.luminary();
        let h0 = event.horizon_altitude_deg();
        let f = |t: f64| -> Result<f64, BaseError> { Ok(self.altitude_deg(t, body) - h0) };
        let direction = if event.is_rising() {
            Crossing::Rising
        } else {
            Crossing::Falling
        };
        match find_crossing(f, jd, ALTITUDE_STEP_DAYS, ALTITUDE_MAX_STEPS, direction, 50, 1e-6)? {
            Some(t) => Ok(t),
            None if self.altitude_deg(jd, body) < h0 => Err(BaseError::NeverRises(event)),
            None => Err(BaseError::NeverSets(event)),
        }
    }

    fn lagna_deg(&self, jd: f64) -> Result<f64, BaseError> {
        let ramc = (gmst_deg(jd) + self.location.longitude_deg).to_radians();
        let eps = mean_obliquity_deg(jd).to_radians();
        let lat = self.location.latitude_rad();
        let asc = ramc
            .cos()
            .atan2(-(ramc.sin() * eps.cos() + lat.tan() * eps.sin()))
            .to_degrees();
        Ok(self.sidereal(asc, jd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::calendar_to_jd;
    use crate::oracle::angam_at;

    fn chennai() -> MeanMotionEphemeris {
        MeanMotionEphemeris::new(GeoLocation::new(13.08, 80.27, 0.0), AyanamshaSystem::ChitraAt180)
            .unwrap()
    }

    #[test]
    fn sun_near_equinox() {
        // 2000-03-20 07:35 UT vernal equinox
        let jd = calendar_to_jd(2000, 3, 20.316);
        let lon = sun_position(jd).longitude_deg;
        assert!(lon < 0.2 || lon > 359.8, "sun lon = {lon}");
    }

    #[test]
    fn sunrise_chennai_equinox() {
        // Around 00:45 UT (06:15 IST) near the March equinox
        let midnight = calendar_to_jd(2000, 3, 21.0) - 5.5 / 24.0;
        let sr = chennai().next_event(midnight, RiseSetEvent::Sunrise).unwrap();
        let ut_hours = (sr - calendar_to_jd(2000, 3, 21.0)) * 24.0;
        assert!((ut_hours - 0.75).abs() < 0.25, "sunrise at {ut_hours} h UT");
    }

    #[test]
    fn sunset_follows_sunrise() {
        let e = chennai();
        let midnight = calendar_to_jd(2020, 6, 1.0) - 5.5 / 24.0;
        let sr = e.next_event(midnight, RiseSetEvent::Sunrise).unwrap();
        let ss = e.next_event(sr, RiseSetEvent::Sunset).unwrap();
        let day_len = (ss - sr) * 24.0;
        assert!(day_len > 12.0 && day_len < 13.5, "day length {day_len} h");
    }

    #[test]
    fn polar_night_reported() {
        let e = MeanMotionEphemeris::new(GeoLocation::new(80.0, 0.0, 0.0), AyanamshaSystem::Lahiri)
            .unwrap();
        let jd = calendar_to_jd(2020, 12, 21.0);
        assert_eq!(
            e.next_event(jd, RiseSetEvent::Sunrise),
            Err(BaseError::NeverRises(RiseSetEvent::Sunrise))
        );
    }

    #[test]
    fn new_moon_tithi() {
        // New moon 2000-01-06 18:14 UT: tithi 30 just before, 1 just after
        let e = chennai();
        let nm = calendar_to_jd(2000, 1, 6.76);
        assert_eq!(angam_at(&e, nm - 0.3, AngamKind::Tithi).unwrap(), 30);
        assert_eq!(angam_at(&e, nm + 0.3, AngamKind::Tithi).unwrap(), 1);
    }

    #[test]
    fn mid_january_solar_rashi() {
        // Sun enters sidereal Capricorn (rashi 10) around 14-15 January
        let e = chennai();
        let jd = calendar_to_jd(2020, 1, 20.0);
        assert_eq!(angam_at(&e, jd, AngamKind::SolarRashi).unwrap(), 10);
    }

    #[test]
    fn june_solstice_ends_tropical_rashi_3() {
        // 2020-06-20 21:43 UT
        let e = chennai();
        let jd = calendar_to_jd(2020, 6, 20.9);
        assert_eq!(angam_at(&e, jd - 0.5, AngamKind::TropicalRashi).unwrap(), 3);
        assert_eq!(angam_at(&e, jd + 0.5, AngamKind::TropicalRashi).unwrap(), 4);
        // The sidereal Sun is then still in mithuna.
        assert_eq!(angam_at(&e, jd, AngamKind::SolarRashi).unwrap(), 3);
    }

    #[test]
    fn lagna_advances() {
        let e = chennai();
        let jd = calendar_to_jd(2020, 1, 1.0);
        let a = e.lagna_deg(jd).unwrap();
        let b = e.lagna_deg(jd + 1.0 / 96.0).unwrap();
        let diff = normalize_360(b - a);
        assert!(diff > 0.0 && diff < 10.0, "lagna moved {diff}");
    }

    #[test]
    fn invalid_location_rejected() {
        assert!(
            MeanMotionEphemeris::new(GeoLocation::new(95.0, 0.0, 0.0), AyanamshaSystem::Lahiri)
                .is_err()
        );
    }
}
