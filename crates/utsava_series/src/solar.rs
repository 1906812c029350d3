//! Solar month and solar month-day counting.
//!
//! The solar month of a civil day is the Sun's rashi at sunset. A month
//! whose sankranti falls after sunset (but before the next sunrise) starts
//! counting on the following day.

use utsava_base::{AngamKind, Ephemeris, RiseSetEvent, angam_at, angam_span};

use crate::error::SeriesError;

/// Search half-width around a sunset for the current rashi's start, in days.
const RASHI_SEARCH_DAYS: f64 = 35.0;

/// Solar rashi observations for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSample {
    pub at_sunrise: u8,
    pub at_sunset: u8,
    /// First rashi change in `[sunrise, next_sunrise)`, if any.
    pub sankranti: Option<f64>,
}

/// Counter state carried into the first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarStart {
    pub month_day: u32,
    pub month_start_after_sunset: bool,
}

/// Solar month-day result for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    pub month_day: u32,
    pub month_end: Option<f64>,
}

/// Month-day counter over `samples`.
///
/// `samples[0]` is the day whose state is `start`. Every later sample but
/// the last gets a result; the last is only consulted as "tomorrow".
pub fn count_solar_month_days(samples: &[SolarSample], start: SolarStart) -> Vec<SolarDay> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(samples.len().saturating_sub(1));
    out.push(SolarDay {
        month_day: start.month_day,
        month_end: first.sankranti,
    });
    let mut month_day = start.month_day;
    let mut after_sunset = start.month_start_after_sunset;
    for w in samples.windows(2).skip(1) {
        let (today, tomorrow) = (&w[0], &w[1]);
        if after_sunset {
            month_day = 0;
            after_sunset = false;
        }
        let mut month_end = None;
        if today.at_sunset != tomorrow.at_sunset {
            month_day += 1;
            if today.at_sunset != tomorrow.at_sunrise {
                after_sunset = true;
                month_end = today.sankranti;
            }
        } else if today.at_sunrise != today.at_sunset {
            month_day = 1;
            month_end = today.sankranti;
        } else {
            month_day += 1;
        }
        out.push(SolarDay {
            month_day,
            month_end,
        });
    }
    out
}

/// Counter state for the day with the given sunset and next sunrise.
///
/// Finds the start of the rashi in force at sunset and counts sunsets
/// since then.
pub fn initial_solar_start<E: Ephemeris + ?Sized>(
    eph: &E,
    sunset: f64,
    next_sunrise: f64,
) -> Result<SolarStart, SeriesError> {
    let kind = AngamKind::SolarRashi;
    let month = angam_at(eph, sunset, kind)?;
    let (lo, hi) = (sunset - RASHI_SEARCH_DAYS, sunset + RASHI_SEARCH_DAYS);
    let span = angam_span(eph, lo, hi, kind, month)?.ok_or(SeriesError::SpanNotFound {
        kind,
        target: month,
        start: lo,
        end: hi,
    })?;
    let first_sunset = eph.next_event(span.start, RiseSetEvent::Sunset)?;
    let month_day = ((sunset - first_sunset).round() as i64 + 1).max(1) as u32;
    Ok(SolarStart {
        month_day,
        month_start_after_sunset: angam_at(eph, next_sunrise, kind)? != month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(at_sunrise: u8, at_sunset: u8, sankranti: Option<f64>) -> SolarSample {
        SolarSample {
            at_sunrise,
            at_sunset,
            sankranti,
        }
    }

    fn days(out: &[SolarDay]) -> Vec<u32> {
        out.iter().map(|d| d.month_day).collect()
    }

    #[test]
    fn sankranti_during_daytime() {
        let samples = [
            s(1, 1, None),
            s(1, 1, None),
            s(1, 2, Some(10.4)),
            s(2, 2, None),
            s(2, 2, None),
        ];
        let start = SolarStart {
            month_day: 29,
            month_start_after_sunset: false,
        };
        let out = count_solar_month_days(&samples, start);
        assert_eq!(days(&out), vec![29, 30, 1, 2]);
        assert_eq!(out[2].month_end, Some(10.4));
        assert_eq!(out[1].month_end, None);
    }

    #[test]
    fn sankranti_after_sunset_counts_from_next_day() {
        // Change between day 1 sunset and day 2 sunrise
        let samples = [
            s(1, 1, None),
            s(1, 1, Some(11.9)),
            s(2, 2, None),
            s(2, 2, None),
            s(2, 2, None),
        ];
        let start = SolarStart {
            month_day: 29,
            month_start_after_sunset: false,
        };
        let out = count_solar_month_days(&samples, start);
        assert_eq!(days(&out), vec![29, 30, 1, 2]);
        assert_eq!(out[1].month_end, Some(11.9));
    }

    #[test]
    fn sankranti_after_next_sunrise() {
        // Sunset month differs from tomorrow's, but tomorrow's sunrise is still old
        let samples = [
            s(1, 1, None),
            s(1, 1, None),
            s(1, 2, Some(12.3)),
            s(2, 2, None),
        ];
        let start = SolarStart {
            month_day: 30,
            month_start_after_sunset: false,
        };
        let out = count_solar_month_days(&samples, start);
        assert_eq!(days(&out), vec![30, 31, 1]);
        assert_eq!(out[1].month_end, None);
    }

    #[test]
    fn start_flag_resets_first_day() {
        let samples = [s(1, 1, Some(0.9)), s(2, 2, None), s(2, 2, None)];
        let start = SolarStart {
            month_day: 31,
            month_start_after_sunset: true,
        };
        let out = count_solar_month_days(&samples, start);
        assert_eq!(days(&out), vec![31, 1]);
    }

    #[test]
    fn empty_samples() {
        let start = SolarStart {
            month_day: 1,
            month_start_after_sunset: false,
        };
        assert!(count_solar_month_days(&[], start).is_empty());
    }
}
