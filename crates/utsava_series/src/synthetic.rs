//! Handcrafted stores for tests, benches and golden fixtures.
//!
//! Days run from local midnight with sunrise at 06:00, sunset at 18:00,
//! moonrise at 19:12 and moonset at 07:12 (times as fractions of the JD
//! day from midnight). Every angam defaults to 1 all day, every solar and
//! lunar month to 1.

use utsava_base::{ANGAM_KIND_COUNT, AngamKind, AngamTransition, GregorianDate};

use crate::config::LOOKAHEAD_DAYS;
use crate::day::{DayOrdinal, DayRecord, LunarMonth};
use crate::error::SeriesError;
use crate::series::TimeSeries;

/// Builder for a synthetic [`TimeSeries`].
///
/// Setters index days by ordinal and panic on ordinals outside
/// `0..=duration + LOOKAHEAD_DAYS`.
#[derive(Debug, Clone)]
pub struct SeriesFixture {
    start: GregorianDate,
    duration: i64,
    days: Vec<DayRecord>,
}

impl SeriesFixture {
    pub fn new(start: GregorianDate, duration: i64) -> Self {
        let len = duration + LOOKAHEAD_DAYS + 1;
        let days = (0..len)
            .map(|d| {
                let date = start.add_days(d - 1);
                let midnight = date.jd_0h();
                DayRecord {
                    ordinal: d,
                    date,
                    jd_midnight: midnight,
                    sunrise: midnight + 0.25,
                    sunset: midnight + 0.75,
                    moonrise: midnight + 0.8,
                    moonset: midnight + 0.3,
                    next_sunrise: midnight + 1.25,
                    weekday: date.weekday(),
                    sunrise_angams: [1; ANGAM_KIND_COUNT],
                    transitions: std::array::from_fn(|_| vec![AngamTransition::new(1, None)]),
                    solar_month: 1,
                    solar_month_sunrise: 1,
                    solar_month_day: (d + 1) as u32,
                    solar_month_end: None,
                    lunar_month: LunarMonth::Nija(1),
                    lagna_transitions: None,
                }
            })
            .collect();
        Self {
            start,
            duration,
            days,
        }
    }

    fn idx(d: DayOrdinal) -> usize {
        usize::try_from(d).unwrap_or(usize::MAX)
    }

    pub fn sunrise(&self, d: DayOrdinal) -> f64 {
        self.days[Self::idx(d)].sunrise
    }

    pub fn sunset(&self, d: DayOrdinal) -> f64 {
        self.days[Self::idx(d)].sunset
    }

    pub fn day_mut(&mut self, d: DayOrdinal) -> &mut DayRecord {
        &mut self.days[Self::idx(d)]
    }

    /// Piecewise-constant angam timeline: each `(angam, end)` is active
    /// until `end`, starting where the previous entry ended. Consecutive
    /// entries should be consecutive angams.
    pub fn timeline(&mut self, kind: AngamKind, entries: &[(u8, f64)]) -> &mut Self {
        let Some(&(last_angam, _)) = entries.last() else {
            return self;
        };
        for rec in &mut self.days {
            let first = entries.iter().position(|&(_, end)| end > rec.sunrise);
            let at_sunrise = first.map_or(last_angam, |i| entries[i].0);
            let mut tr: Vec<AngamTransition> = first
                .map(|i| {
                    entries[i..]
                        .iter()
                        .take_while(|&&(_, end)| end < rec.next_sunrise)
                        .map(|&(a, end)| AngamTransition::new(a, Some(end)))
                        .collect()
                })
                .unwrap_or_default();
            if tr.is_empty() {
                tr.push(AngamTransition::new(at_sunrise, None));
            }
            rec.sunrise_angams[kind.slot()] = at_sunrise;
            rec.transitions[kind.slot()] = tr;
        }
        self
    }

    /// Timeline from per-day sunrise angams, ordinal 0 first. Where the
    /// next day's sunrise angam differs, the change happens at `frac` of
    /// this sunrise-to-sunrise day.
    pub fn sunrise_angams(&mut self, kind: AngamKind, angams: &[u8], frac: f64) -> &mut Self {
        let mut entries: Vec<(u8, f64)> = angams
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                let rec = &self.days[i.min(self.days.len() - 1)];
                let end = rec.sunrise + frac * (rec.next_sunrise - rec.sunrise);
                (a, end)
            })
            .fold(Vec::new(), |mut acc: Vec<(u8, f64)>, (a, end)| {
                match acc.last_mut() {
                    Some(last) if last.0 == a => last.1 = end,
                    _ => acc.push((a, end)),
                }
                acc
            });
        if let Some(last) = entries.last_mut() {
            last.1 = f64::INFINITY;
        }
        self.timeline(kind, &entries)
    }

    /// Solar month (at sunrise and sunset) per ordinal, from ordinal 0.
    pub fn solar_months(&mut self, months: &[u8]) -> &mut Self {
        for (rec, &m) in self.days.iter_mut().zip(months) {
            rec.solar_month = m;
            rec.solar_month_sunrise = m;
        }
        self
    }

    /// Solar month day per ordinal, from ordinal 0.
    pub fn solar_month_days(&mut self, month_days: &[u32]) -> &mut Self {
        for (rec, &n) in self.days.iter_mut().zip(month_days) {
            rec.solar_month_day = n;
        }
        self
    }

    /// Lunar month per ordinal, from ordinal 0.
    pub fn lunar_months(&mut self, months: &[LunarMonth]) -> &mut Self {
        for (rec, &m) in self.days.iter_mut().zip(months) {
            rec.lunar_month = m;
        }
        self
    }

    /// Set the same lunar month on every day.
    pub fn lunar_month_all(&mut self, month: LunarMonth) -> &mut Self {
        for rec in &mut self.days {
            rec.lunar_month = month;
        }
        self
    }

    /// Set the same solar month on every day.
    pub fn solar_month_all(&mut self, month: u8) -> &mut Self {
        for rec in &mut self.days {
            rec.solar_month = month;
            rec.solar_month_sunrise = month;
        }
        self
    }

    pub fn build(&self) -> Result<TimeSeries, SeriesError> {
        TimeSeries::from_days(self.start, self.duration, self.days.clone())
    }
}
