//! Sequential construction of a [`TimeSeries`] from an [`Ephemeris`].
//!
//! Days are computed strictly in order: the solar month-day counter of
//! each day depends on the day before, and lunar months are assigned by
//! walking new moons forward from before the first day.

use tracing::{debug, info};
use utsava_base::{
    ANGAM_KIND_COUNT, AngamKind, AngamTransition, Ephemeris, GregorianDate, RiseSetEvent,
    angam_at, angam_transitions, lagna_transitions, local_midnight_jd,
};

use crate::config::{LOOKAHEAD_DAYS, PanchangaConfig};
use crate::day::DayRecord;
use crate::error::SeriesError;
use crate::lunar::assign_lunar_months;
use crate::series::TimeSeries;
use crate::solar::{SolarSample, count_solar_month_days, initial_solar_start};

#[derive(Debug, Clone, Copy)]
struct RiseSet {
    date: GregorianDate,
    midnight: f64,
    sunrise: f64,
    sunset: f64,
    moonrise: f64,
    moonset: f64,
}

fn rise_set_for<E: Ephemeris + ?Sized>(
    eph: &E,
    date: GregorianDate,
    timezone_offset_hours: f64,
) -> Result<RiseSet, SeriesError> {
    let midnight = local_midnight_jd(date.jd_0h(), timezone_offset_hours);
    let sunrise = eph.next_event(midnight, RiseSetEvent::Sunrise)?;
    Ok(RiseSet {
        date,
        midnight,
        sunrise,
        sunset: eph.next_event(sunrise, RiseSetEvent::Sunset)?,
        moonrise: eph.next_event(midnight, RiseSetEvent::Moonrise)?,
        moonset: eph.next_event(midnight, RiseSetEvent::Moonset)?,
    })
}

/// Build the store for `config`: ordinals `0..=duration + LOOKAHEAD_DAYS`.
pub fn build_series<E: Ephemeris + ?Sized>(
    eph: &E,
    config: &PanchangaConfig,
) -> Result<TimeSeries, SeriesError> {
    config.validate()?;
    let duration = config.duration()?;
    let len = (duration + LOOKAHEAD_DAYS + 1) as usize;
    let day0 = config.start.add_days(-1);
    info!(start = %config.start, end = %config.end, duration, "building panchangam series");

    // One extra day so that every stored day knows its next sunrise.
    let rise_set = (0..=len as i64)
        .map(|i| rise_set_for(eph, day0.add_days(i), config.timezone_offset_hours))
        .collect::<Result<Vec<_>, _>>()?;

    let mut transitions: Vec<[Vec<AngamTransition>; ANGAM_KIND_COUNT]> = Vec::with_capacity(len);
    let mut solar = Vec::with_capacity(len + 1);
    for w in rise_set.windows(2) {
        let (today, tomorrow) = (&w[0], &w[1]);
        let mut tr: [Vec<AngamTransition>; ANGAM_KIND_COUNT] = Default::default();
        for kind in AngamKind::all() {
            tr[kind.slot()] = angam_transitions(eph, today.sunrise, tomorrow.sunrise, *kind)?;
        }
        let rashi = &tr[AngamKind::SolarRashi.slot()];
        solar.push(SolarSample {
            at_sunrise: rashi.first().map_or(0, |t| t.angam),
            at_sunset: angam_at(eph, today.sunset, AngamKind::SolarRashi)?,
            sankranti: rashi.first().and_then(|t| t.end),
        });
        transitions.push(tr);
    }
    let last = &rise_set[len];
    solar.push(SolarSample {
        at_sunrise: angam_at(eph, last.sunrise, AngamKind::SolarRashi)?,
        at_sunset: angam_at(eph, last.sunset, AngamKind::SolarRashi)?,
        sankranti: None,
    });

    let start = initial_solar_start(eph, rise_set[0].sunset, rise_set[1].sunrise)?;
    let solar_days = count_solar_month_days(&solar, start);

    let sunrises: Vec<f64> = rise_set[..len].iter().map(|r| r.sunrise).collect();
    let lunar_months = assign_lunar_months(eph, &sunrises)?;

    let mut days = Vec::with_capacity(len);
    for (i, tr) in transitions.into_iter().enumerate() {
        let today = &rise_set[i];
        let next_sunrise = rise_set[i + 1].sunrise;
        let lagna = if config.compute_lagnams {
            Some(lagna_transitions(eph, today.sunrise, next_sunrise)?)
        } else {
            None
        };
        let sunrise_angams: [u8; ANGAM_KIND_COUNT] =
            std::array::from_fn(|s| tr[s].first().map_or(0, |t| t.angam));
        let solar_day = solar_days[i];
        if let Some(end) = solar_day.month_end {
            debug!(date = %today.date, sankranti = end, month = solar[i + 1].at_sunset, "sankranti");
        }
        days.push(DayRecord {
            ordinal: i as i64,
            date: today.date,
            jd_midnight: today.midnight,
            sunrise: today.sunrise,
            sunset: today.sunset,
            moonrise: today.moonrise,
            moonset: today.moonset,
            next_sunrise,
            weekday: today.date.weekday(),
            sunrise_angams,
            transitions: tr,
            solar_month: solar[i].at_sunset,
            solar_month_sunrise: solar[i].at_sunrise,
            solar_month_day: solar_day.month_day,
            solar_month_end: solar_day.month_end,
            lunar_month: lunar_months[i],
            lagna_transitions: lagna,
        });
    }
    info!(days = days.len(), "panchangam series built");
    TimeSeries::from_days(config.start, duration, days)
}
