//! Observer location and rise/set event types.

use serde::{Deserialize, Serialize};

use crate::error::BaseError;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    #[serde(default)]
    pub altitude_m: f64,
}

impl GeoLocation {
    /// Create a new geographic location.
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Reject coordinates outside their valid ranges.
    pub fn validate(&self) -> Result<(), BaseError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(BaseError::InvalidLocation("latitude outside [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(BaseError::InvalidLocation("longitude outside [-180, 180]"));
        }
        Ok(())
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Body whose rising or setting is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Luminary {
    Sun,
    Moon,
}

/// Rise/set events the day records carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiseSetEvent {
    Sunrise,
    Sunset,
    Moonrise,
    Moonset,
}

impl RiseSetEvent {
    pub fn luminary(self) -> Luminary {
        match self {
            Self::Sunrise | Self::Sunset => Luminary::Sun,
            Self::Moonrise | Self::Moonset => Luminary::Moon,
        }
    }

    /// Whether this is a rising event.
    pub fn is_rising(self) -> bool {
        matches!(self, Self::Sunrise | Self::Moonrise)
    }

    /// Apparent altitude of the body's centre at the event, in degrees.
    ///
    /// Sun: -(34' refraction + 16' semidiameter).
    /// Moon: mean horizontal parallax minus refraction and semidiameter.
    pub fn horizon_altitude_deg(self) -> f64 {
        match self.luminary() {
            Luminary::Sun => -50.0 / 60.0,
            Luminary::Moon => 0.125,
        }
    }
}

/// Approximate local solar noon for a date's 0h UT Julian Date.
pub fn approximate_local_noon_jd(jd_0h: f64, longitude_deg: f64) -> f64 {
    jd_0h + 0.5 - longitude_deg / 360.0
}

/// Julian Date of local civil midnight starting a date, given the zone
/// offset in hours east of UTC.
pub fn local_midnight_jd(jd_0h: f64, timezone_offset_hours: f64) -> f64 {
    jd_0h - timezone_offset_hours / 24.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_validation() {
        assert!(GeoLocation::new(12.97, 77.59, 900.0).validate().is_ok());
        assert!(GeoLocation::new(91.0, 0.0, 0.0).validate().is_err());
        assert!(GeoLocation::new(0.0, 200.0, 0.0).validate().is_err());
    }

    #[test]
    fn noon_shifts_with_longitude() {
        let jd = 2_451_544.5;
        assert!((approximate_local_noon_jd(jd, 0.0) - 2_451_545.0).abs() < 1e-12);
        assert!((approximate_local_noon_jd(jd, 90.0) - 2_451_544.75).abs() < 1e-12);
    }

    #[test]
    fn ist_midnight() {
        let m = local_midnight_jd(2_451_544.5, 5.5);
        assert!((m - (2_451_544.5 - 5.5 / 24.0)).abs() < 1e-12);
    }

    #[test]
    fn event_luminaries() {
        assert_eq!(RiseSetEvent::Moonset.luminary(), Luminary::Moon);
        assert!(RiseSetEvent::Sunrise.is_rising());
        assert!(!RiseSetEvent::Sunset.is_rising());
    }
}
