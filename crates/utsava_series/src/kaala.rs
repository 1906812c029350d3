//! Kaala windows: named portions of a day or night.
//!
//! Day windows divide sunrise..sunset into fifths; night windows divide
//! sunset..next sunrise into fifths or fifteenths (muhurtas). Sunrise,
//! sunset and moonrise are zero-length windows.

use std::fmt;
use std::str::FromStr;

use utsava_base::AngamKind;

use crate::day::{DayOrdinal, DayRecord};
use crate::error::SeriesError;
use crate::series::TimeSeries;

/// Ghatikas per civil day.
pub const GHATIKAS_PER_DAY: f64 = 60.0;

/// Named windows against which angams are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kaala {
    Sunrise,
    Sunset,
    Moonrise,
    Praatah,
    Sangava,
    Madhyaahna,
    Aparaahna,
    Saayaahna,
    Dinamaana,
    Pradosha,
    Nishita,
    Madhyaraatri,
    Raatrimaana,
    Arunodaya,
}

/// All kaalas.
pub const ALL_KAALAS: [Kaala; 14] = [
    Kaala::Sunrise,
    Kaala::Sunset,
    Kaala::Moonrise,
    Kaala::Praatah,
    Kaala::Sangava,
    Kaala::Madhyaahna,
    Kaala::Aparaahna,
    Kaala::Saayaahna,
    Kaala::Dinamaana,
    Kaala::Pradosha,
    Kaala::Nishita,
    Kaala::Madhyaraatri,
    Kaala::Raatrimaana,
    Kaala::Arunodaya,
];

/// How a kaala sits inside its day.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Extent {
    Sunrise,
    Sunset,
    Moonrise,
    /// `[start/den, end/den]` of sunrise..sunset.
    Day { start: u8, end: u8, den: u8 },
    /// `[start/den, end/den]` of sunset..next sunrise.
    Night { start: u8, end: u8, den: u8 },
}

impl Kaala {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Moonrise => "moonrise",
            Self::Praatah => "praatah",
            Self::Sangava => "sangava",
            Self::Madhyaahna => "madhyaahna",
            Self::Aparaahna => "aparaahna",
            Self::Saayaahna => "saayaahna",
            Self::Dinamaana => "dinamaana",
            Self::Pradosha => "pradosha",
            Self::Nishita => "nishita",
            Self::Madhyaraatri => "madhyaraatri",
            Self::Raatrimaana => "raatrimaana",
            Self::Arunodaya => "arunodaya",
        }
    }

    pub const fn all() -> &'static [Kaala] {
        &ALL_KAALAS
    }

    const fn extent(self) -> Extent {
        match self {
            Self::Sunrise => Extent::Sunrise,
            Self::Sunset => Extent::Sunset,
            Self::Moonrise => Extent::Moonrise,
            Self::Praatah => Extent::Day { start: 0, end: 1, den: 5 },
            Self::Sangava => Extent::Day { start: 1, end: 2, den: 5 },
            Self::Madhyaahna => Extent::Day { start: 2, end: 3, den: 5 },
            Self::Aparaahna => Extent::Day { start: 3, end: 4, den: 5 },
            Self::Saayaahna => Extent::Day { start: 4, end: 5, den: 5 },
            Self::Dinamaana => Extent::Day { start: 0, end: 5, den: 5 },
            Self::Pradosha => Extent::Night { start: 0, end: 1, den: 15 },
            Self::Nishita => Extent::Night { start: 7, end: 8, den: 15 },
            Self::Madhyaraatri => Extent::Night { start: 2, end: 3, den: 5 },
            Self::Raatrimaana => Extent::Night { start: 0, end: 15, den: 15 },
            Self::Arunodaya => Extent::Night { start: 13, end: 15, den: 15 },
        }
    }

    /// Whether the window is a single instant anchored at sunrise or moonrise.
    pub fn is_rise_instant(self) -> bool {
        matches!(self, Self::Sunrise | Self::Moonrise)
    }

    /// Window `(start, end)` of this kaala on `day`.
    pub fn window(self, day: &DayRecord) -> KaalaWindow {
        let frac = |t0: f64, t1: f64, num: u8, den: u8| t0 + (t1 - t0) * f64::from(num) / f64::from(den);
        let (start, end) = match self.extent() {
            Extent::Sunrise => (day.sunrise, day.sunrise),
            Extent::Sunset => (day.sunset, day.sunset),
            Extent::Moonrise => (day.moonrise, day.moonrise),
            Extent::Day { start, end, den } => (
                frac(day.sunrise, day.sunset, start, den),
                frac(day.sunrise, day.sunset, end, den),
            ),
            Extent::Night { start, end, den } => (
                frac(day.sunset, day.next_sunrise, start, den),
                frac(day.sunset, day.next_sunrise, end, den),
            ),
        };
        KaalaWindow { start, end }
    }
}

impl fmt::Display for Kaala {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kaala {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_KAALAS
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| SeriesError::UnknownKaala(s.to_string()))
    }
}

/// Start and end instants (JD) of a kaala on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KaalaWindow {
    pub start: f64,
    pub end: f64,
}

impl KaalaWindow {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn duration_ghatikas(&self) -> f64 {
        self.duration() * GHATIKAS_PER_DAY
    }
}

/// Windows of `kaala` on day `d` and day `d + 1`.
pub fn kaala_windows(
    series: &TimeSeries,
    d: DayOrdinal,
    kaala: Kaala,
) -> Result<[KaalaWindow; 2], SeriesError> {
    Ok([kaala.window(series.day(d)?), kaala.window(series.day(d + 1)?)])
}

/// The four-sample pattern for `kind` over `kaala`:
/// `[today start, today end, tomorrow start, tomorrow end]`.
pub fn kaala_angams(
    series: &TimeSeries,
    d: DayOrdinal,
    kind: AngamKind,
    kaala: Kaala,
) -> Result<[u8; 4], SeriesError> {
    let [today, tomorrow] = kaala_windows(series, d, kaala)?;
    Ok([
        series.angam_at(kind, today.start)?,
        series.angam_at(kind, today.end)?,
        series.angam_at(kind, tomorrow.start)?,
        series.angam_at(kind, tomorrow.end)?,
    ])
}
