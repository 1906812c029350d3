//! Store construction parameters.

use serde::{Deserialize, Serialize};
use utsava_base::{AyanamshaSystem, GeoLocation, GregorianDate};

use crate::error::SeriesError;

/// Days stored after the requested range for look-ahead queries.
pub const LOOKAHEAD_DAYS: i64 = 3;

/// Location, date range and options for one panchangam computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanchangaConfig {
    pub location: GeoLocation,
    /// Civil time zone, hours east of UTC. Day boundaries are local midnights.
    #[serde(default)]
    pub timezone_offset_hours: f64,
    /// First requested day (ordinal 1).
    pub start: GregorianDate,
    /// Last requested day, inclusive.
    pub end: GregorianDate,
    #[serde(default)]
    pub ayanamsha: AyanamshaSystem,
    /// Also store lagna transitions per day.
    #[serde(default)]
    pub compute_lagnams: bool,
}

impl PanchangaConfig {
    pub fn new(
        location: GeoLocation,
        timezone_offset_hours: f64,
        start: GregorianDate,
        end: GregorianDate,
    ) -> Self {
        Self {
            location,
            timezone_offset_hours,
            start,
            end,
            ayanamsha: AyanamshaSystem::default(),
            compute_lagnams: false,
        }
    }

    /// Number of requested days, `end - start + 1`.
    pub fn duration(&self) -> Result<i64, SeriesError> {
        let n = self.start.days_until(&self.end) + 1;
        if n < 1 {
            return Err(SeriesError::InvalidRange(format!(
                "end {} precedes start {}",
                self.end, self.start
            )));
        }
        Ok(n)
    }

    pub fn validate(&self) -> Result<(), SeriesError> {
        self.location.validate()?;
        if !(-14.0..=14.0).contains(&self.timezone_offset_hours) {
            return Err(SeriesError::InvalidRange(format!(
                "timezone offset {} h",
                self.timezone_offset_hours
            )));
        }
        self.duration().map(|_| ())
    }
}
