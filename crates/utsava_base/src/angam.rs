//! Angam kinds and index arithmetic.
//!
//! An angam is one of the integral divisions of a continuous angle:
//! tithi (Moon-Sun elongation / 12 deg), nakshatra (Moon / 13 deg 20'),
//! yoga (Moon + Sun / 13 deg 20'), karana (elongation / 6 deg) and the
//! solar rashi (Sun / 30 deg). The pada kinds quarter a nakshatra
//! (3 deg 20'), and the tropical rashi divides the Sun's tropical
//! longitude. Indices are 1-based and wrap modulo the kind's period.

use std::fmt;

use crate::error::BaseError;
use crate::util::normalize_360;

/// The angam kinds the store tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AngamKind {
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
    SolarRashi,
    /// Quarter of the Moon's nakshatra.
    NakshatraPada,
    /// Nakshatra of the Sun.
    SolarNakshatra,
    /// Quarter of the Sun's nakshatra.
    SolarNakshatraPada,
    /// Sun's tropical (sayana) rashi; its 3/4 and 9/10 boundaries are the
    /// solstices.
    TropicalRashi,
}

/// Number of angam kinds; length of per-kind tables.
pub const ANGAM_KIND_COUNT: usize = 9;

/// All angam kinds in slot order.
pub const ALL_ANGAM_KINDS: [AngamKind; ANGAM_KIND_COUNT] = [
    AngamKind::Tithi,
    AngamKind::Nakshatra,
    AngamKind::Yoga,
    AngamKind::Karana,
    AngamKind::SolarRashi,
    AngamKind::NakshatraPada,
    AngamKind::SolarNakshatra,
    AngamKind::SolarNakshatraPada,
    AngamKind::TropicalRashi,
];

impl AngamKind {
    /// Number of angams in one cycle.
    pub const fn count(self) -> u8 {
        match self {
            Self::Tithi => 30,
            Self::Nakshatra | Self::Yoga | Self::SolarNakshatra => 27,
            Self::Karana => 60,
            Self::SolarRashi | Self::TropicalRashi => 12,
            Self::NakshatraPada | Self::SolarNakshatraPada => 108,
        }
    }

    /// Arc covered by one angam, in degrees.
    pub fn segment_deg(self) -> f64 {
        360.0 / f64::from(self.count())
    }

    /// Stable index into per-kind tables, `0..ANGAM_KIND_COUNT`.
    pub const fn slot(self) -> usize {
        match self {
            Self::Tithi => 0,
            Self::Nakshatra => 1,
            Self::Yoga => 2,
            Self::Karana => 3,
            Self::SolarRashi => 4,
            Self::NakshatraPada => 5,
            Self::SolarNakshatra => 6,
            Self::SolarNakshatraPada => 7,
            Self::TropicalRashi => 8,
        }
    }

    /// Lower-case name as used in rule files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tithi => "tithi",
            Self::Nakshatra => "nakshatra",
            Self::Yoga => "yoga",
            Self::Karana => "karana",
            Self::SolarRashi => "solar_rashi",
            Self::NakshatraPada => "nakshatra_pada",
            Self::SolarNakshatra => "solar_nakshatra",
            Self::SolarNakshatraPada => "solar_nakshatra_pada",
            Self::TropicalRashi => "tropical_rashi",
        }
    }

    /// Coarse scan step for span searches, in days.
    ///
    /// Shorter than the quickest possible angam of this kind so that a
    /// scan cannot step over one entirely.
    pub fn scan_step_days(self) -> f64 {
        match self {
            Self::Tithi | Self::Nakshatra | Self::Yoga => 0.25,
            Self::Karana => 0.125,
            Self::NakshatraPada => 0.1,
            Self::SolarNakshatraPada => 1.0,
            Self::SolarRashi | Self::SolarNakshatra | Self::TropicalRashi => 2.0,
        }
    }

    /// Validate a 1-based index for this kind.
    pub fn check_index(self, index: u32) -> Result<u8, BaseError> {
        if index == 0 || index > u32::from(self.count()) {
            return Err(BaseError::InvalidAngam { kind: self, index });
        }
        Ok(index as u8)
    }

    /// All angam kinds.
    pub const fn all() -> &'static [AngamKind] {
        &ALL_ANGAM_KINDS
    }
}

impl fmt::Display for AngamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 1-based angam index for a continuous angle in degrees.
pub fn angam_from_angle(angle_deg: f64, kind: AngamKind) -> u8 {
    let idx = (normalize_360(angle_deg) / kind.segment_deg()).floor() as u32;
    // Floating-point edge at exactly 360 deg maps back to the first angam.
    (idx % u32::from(kind.count())) as u8 + 1
}

/// Angle at which angam `index` ends (and `index + 1` begins), in degrees.
pub fn angam_end_angle(index: u8, kind: AngamKind) -> f64 {
    normalize_360(f64::from(index) * kind.segment_deg())
}

/// Angam preceding `index`, wrapping 1 back to the period.
pub fn previous_angam(index: u8, kind: AngamKind) -> u8 {
    if index <= 1 { kind.count() } else { index - 1 }
}

/// Angam following `index`, wrapping the period to 1.
pub fn next_angam(index: u8, kind: AngamKind) -> u8 {
    index % kind.count() + 1
}

/// Forward distance from `from` to `to` in angams, `0..count`.
pub fn angam_distance(from: u8, to: u8, kind: AngamKind) -> u8 {
    let n = i32::from(kind.count());
    (i32::from(to) - i32::from(from)).rem_euclid(n) as u8
}

/// The target angam with its immediate neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngamNeighbours {
    pub prev: u8,
    pub target: u8,
    pub next: u8,
    pub after_next: u8,
}

impl AngamNeighbours {
    pub fn around(target: u8, kind: AngamKind) -> Result<Self, BaseError> {
        let target = kind.check_index(u32::from(target))?;
        let next = next_angam(target, kind);
        Ok(Self {
            prev: previous_angam(target, kind),
            target,
            next,
            after_next: next_angam(next, kind),
        })
    }
}

/// One angam active during a sunrise-to-sunrise window.
///
/// `end` is `None` when the angam is still running at the end of the
/// window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngamTransition {
    pub angam: u8,
    pub end: Option<f64>,
}

impl AngamTransition {
    pub fn new(angam: u8, end: Option<f64>) -> Self {
        Self { angam, end }
    }
}

/// Start and end instants (JD) of one occurrence of an angam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngamSpan {
    pub start: f64,
    pub end: f64,
}

impl AngamSpan {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
