//! The astronomical oracle seam.
//!
//! Everything above this trait is ephemeris-agnostic: the series builder
//! only needs the continuous angles behind each angam kind and the next
//! rise/set instants for an observer.

use crate::angam::AngamKind;
use crate::error::BaseError;
use crate::riseset::RiseSetEvent;

/// Source of sidereal angles and rise/set instants.
///
/// All instants are Julian Dates on one consistent time scale.
pub trait Ephemeris {
    /// Continuous angle underlying `kind` at `jd`, in degrees `[0, 360)`.
    ///
    /// Tithi and karana use the Moon-Sun elongation. Nakshatra and its
    /// pada use the Moon's sidereal longitude, yoga the sum of sidereal
    /// longitudes. Solar rashi and the solar nakshatra kinds use the Sun's
    /// sidereal longitude, the tropical rashi its tropical longitude.
    fn angle_deg(&self, jd: f64, kind: AngamKind) -> Result<f64, BaseError>;

    /// First occurrence of `event` at or after `jd`.
    fn next_event(&self, jd: f64, event: RiseSetEvent) -> Result<f64, BaseError>;

    /// Sidereal longitude of the ascendant at `jd`, in degrees.
    fn lagna_deg(&self, jd: f64) -> Result<f64, BaseError> {
        let _ = jd;
        Err(BaseError::Unsupported("lagna"))
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn angle_deg(&self, jd: f64, kind: AngamKind) -> Result<f64, BaseError> {
        (**self).angle_deg(jd, kind)
    }

    fn next_event(&self, jd: f64, event: RiseSetEvent) -> Result<f64, BaseError> {
        (**self).next_event(jd, event)
    }

    fn lagna_deg(&self, jd: f64) -> Result<f64, BaseError> {
        (**self).lagna_deg(jd)
    }
}
