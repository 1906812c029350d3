//! Per-day panchangam records.

use std::fmt;

use utsava_base::{ANGAM_KIND_COUNT, AngamKind, AngamTransition, GregorianDate};

/// Index of a day in the store. Ordinal 0 is the day before the requested
/// range, ordinal 1 its first day.
pub type DayOrdinal = i64;

/// Amanta lunar month.
///
/// A month whose bounding new moons fall in the same solar rashi is adhika
/// and carries the number of the nija month it precedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunarMonth {
    Nija(u8),
    Adhika(u8),
}

impl LunarMonth {
    /// Month ended by a new moon in `this_rashi`, the previous new moon
    /// having fallen in `prev_rashi`.
    pub fn from_new_moon_rashis(prev_rashi: u8, this_rashi: u8) -> Self {
        if prev_rashi == this_rashi {
            Self::Adhika(this_rashi % 12 + 1)
        } else {
            Self::Nija(this_rashi)
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Nija(n) | Self::Adhika(n) => n,
        }
    }

    pub fn is_adhika(self) -> bool {
        matches!(self, Self::Adhika(_))
    }

    /// Whether this is nija month `month`. Adhika months never match a
    /// month number.
    pub fn matches(self, month: u8) -> bool {
        self == Self::Nija(month)
    }

    /// Numeric form: `n` for nija, `n - 0.5` for adhika.
    pub fn value(self) -> f64 {
        match self {
            Self::Nija(n) => f64::from(n),
            Self::Adhika(n) => f64::from(n) - 0.5,
        }
    }
}

impl fmt::Display for LunarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nija(n) => write!(f, "{n}"),
            Self::Adhika(n) => write!(f, "adhika-{n}"),
        }
    }
}

/// Everything the resolver needs to know about one civil day.
///
/// Instants are Julian Dates. Transitions cover `[sunrise, next_sunrise)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub ordinal: DayOrdinal,
    pub date: GregorianDate,
    pub jd_midnight: f64,
    pub sunrise: f64,
    pub sunset: f64,
    pub moonrise: f64,
    pub moonset: f64,
    pub next_sunrise: f64,
    /// 0 = Sunday.
    pub weekday: u8,
    /// Indexed by [`AngamKind::slot`].
    pub sunrise_angams: [u8; ANGAM_KIND_COUNT],
    pub transitions: [Vec<AngamTransition>; ANGAM_KIND_COUNT],
    /// Solar rashi at sunset.
    pub solar_month: u8,
    /// Solar rashi at sunrise.
    pub solar_month_sunrise: u8,
    pub solar_month_day: u32,
    /// Sankranti instant when the solar month changes during this day.
    pub solar_month_end: Option<f64>,
    pub lunar_month: LunarMonth,
    pub lagna_transitions: Option<Vec<AngamTransition>>,
}

impl DayRecord {
    pub fn angam_at_sunrise(&self, kind: AngamKind) -> u8 {
        self.sunrise_angams[kind.slot()]
    }

    pub fn transitions(&self, kind: AngamKind) -> &[AngamTransition] {
        &self.transitions[kind.slot()]
    }

    pub fn day_length(&self) -> f64 {
        self.sunset - self.sunrise
    }

    pub fn night_length(&self) -> f64 {
        self.next_sunrise - self.sunset
    }

    pub fn contains(&self, jd: f64) -> bool {
        jd >= self.sunrise && jd < self.next_sunrise
    }

    /// Angam active at `jd`, which must lie in `[sunrise, next_sunrise]`.
    pub fn angam_at(&self, kind: AngamKind, jd: f64) -> u8 {
        let tr = self.transitions(kind);
        for t in tr {
            match t.end {
                None => return t.angam,
                Some(end) if jd < end => return t.angam,
                Some(_) => {}
            }
        }
        match tr.last() {
            Some(last) => last.angam % kind.count() + 1,
            None => self.angam_at_sunrise(kind),
        }
    }

    /// Whether the angam at sunrise is still running at the next sunrise.
    pub fn angam_spans_day(&self, kind: AngamKind) -> bool {
        matches!(self.transitions(kind), [t] if t.end.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adhika_from_equal_rashis() {
        assert_eq!(LunarMonth::from_new_moon_rashis(3, 3), LunarMonth::Adhika(4));
        assert_eq!(LunarMonth::from_new_moon_rashis(12, 12), LunarMonth::Adhika(1));
        assert_eq!(LunarMonth::from_new_moon_rashis(2, 3), LunarMonth::Nija(3));
    }

    #[test]
    fn adhika_value_is_half_below() {
        assert_eq!(LunarMonth::Adhika(4).value(), 3.5);
        assert_eq!(LunarMonth::Adhika(1).value(), 0.5);
        assert_eq!(LunarMonth::Nija(7).value(), 7.0);
    }

    #[test]
    fn adhika_never_matches() {
        assert!(LunarMonth::Nija(5).matches(5));
        assert!(!LunarMonth::Adhika(5).matches(5));
        assert!(!LunarMonth::Nija(5).matches(6));
    }
}
