//! Gregorian calendar dates and Julian Day conversion.
//!
//! Algorithms follow Meeus, "Astronomical Algorithms", ch. 7, restricted to
//! the proleptic Gregorian calendar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;

/// Julian Date of J2000.0 (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian Date for a Gregorian calendar date with fractional day.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (f64::from(y) / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (f64::from(y) + 4716.0)).floor() + (30.6001 * (f64::from(m) + 1.0)).floor() + day + b
        - 1524.5
}

/// Gregorian calendar date (year, month, fractional day) for a Julian Date.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd5 = jd + 0.5;
    let z = jd5.floor();
    let f = jd5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();
    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Day of week for the civil day containing `jd`: 0 = Sunday .. 6 = Saturday.
pub fn weekday_from_jd(jd: f64) -> u8 {
    ((jd + 1.5).floor() as i64).rem_euclid(7) as u8
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a Gregorian month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// A civil date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GregorianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl GregorianDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, BaseError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(BaseError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")));
        }
        Ok(Self { year, month, day })
    }

    /// Julian Date at 0h UT of this date.
    pub fn jd_0h(&self) -> f64 {
        calendar_to_jd(self.year, self.month, f64::from(self.day))
    }

    /// Date containing the given Julian Date (UT).
    pub fn from_jd(jd: f64) -> Self {
        let (year, month, day) = jd_to_calendar(jd);
        Self {
            year,
            month,
            day: day.floor() as u32,
        }
    }

    /// Date `n` days later (or earlier for negative `n`).
    pub fn add_days(&self, n: i64) -> Self {
        Self::from_jd(self.jd_0h() + n as f64 + 0.5)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &GregorianDate) -> i64 {
        (other.jd_0h() - self.jd_0h()).round() as i64
    }

    /// Day of week, 0 = Sunday.
    pub fn weekday(&self) -> u8 {
        weekday_from_jd(self.jd_0h())
    }
}

impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for GregorianDate {
    type Err = BaseError;

    /// Parses `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || BaseError::InvalidDate(s.to_string());
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let month = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        let day = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
        Self::new(year, month, day)
    }
}

impl TryFrom<String> for GregorianDate {
    type Error = BaseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<GregorianDate> for String {
    fn from(d: GregorianDate) -> Self {
        d.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 Oct 4.81 = JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn inverse_conversion() {
        let (y, m, d) = jd_to_calendar(2_436_116.31);
        assert_eq!((y, m), (1957, 10));
        assert!((d - 4.81).abs() < 1e-6);
    }

    #[test]
    fn weekday_known_dates() {
        // 2000-01-01 was a Saturday
        assert_eq!(GregorianDate::new(2000, 1, 1).unwrap().weekday(), 6);
        // 2024-01-01 was a Monday
        assert_eq!(GregorianDate::new(2024, 1, 1).unwrap().weekday(), 1);
    }

    #[test]
    fn add_days_crosses_year() {
        let d = GregorianDate::new(2023, 12, 31).unwrap();
        assert_eq!(d.add_days(1), GregorianDate::new(2024, 1, 1).unwrap());
        assert_eq!(d.add_days(-365), GregorianDate::new(2022, 12, 31).unwrap());
        assert_eq!(d.days_until(&d.add_days(60)), 60);
    }

    #[test]
    fn parse_and_display() {
        let d: GregorianDate = "2019-02-28".parse().unwrap();
        assert_eq!(d.to_string(), "2019-02-28");
        assert!("2019-02-29".parse::<GregorianDate>().is_err());
        assert!("2019-13-01".parse::<GregorianDate>().is_err());
        assert!("garbage".parse::<GregorianDate>().is_err());
    }

    #[test]
    fn leap_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }
}
