//! The immutable time-series store.
//!
//! Built once (see [`crate::builder`]) and then only read. All angam
//! lookups at arbitrary instants are answered from the stored per-day
//! transitions, so nothing downstream needs the ephemeris.

use std::ops::RangeInclusive;

use utsava_base::{AngamKind, GregorianDate};

use crate::config::LOOKAHEAD_DAYS;
use crate::day::{DayOrdinal, DayRecord};
use crate::error::SeriesError;

/// A maximal interval during which one angam is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngamSegment {
    pub angam: u8,
    pub start: f64,
    pub end: f64,
}

/// Day records for ordinals `0..=duration + LOOKAHEAD_DAYS`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    start: GregorianDate,
    duration: i64,
    days: Vec<DayRecord>,
}

impl TimeSeries {
    /// Assemble a store from complete day records.
    ///
    /// Records must be ordered by ordinal starting at 0, cover the
    /// look-ahead buffer, chain sunrise to next sunrise, and carry a first
    /// transition matching each sunrise angam.
    pub fn from_days(
        start: GregorianDate,
        duration: i64,
        days: Vec<DayRecord>,
    ) -> Result<Self, SeriesError> {
        if duration < 1 {
            return Err(SeriesError::InvalidRange(format!("duration {duration}")));
        }
        let needed = duration + LOOKAHEAD_DAYS + 1;
        if (days.len() as i64) < needed {
            return Err(SeriesError::MalformedDays {
                ordinal: days.len() as i64,
                reason: "records do not cover the look-ahead buffer",
            });
        }
        for (i, rec) in days.iter().enumerate() {
            let ordinal = i as i64;
            if rec.ordinal != ordinal {
                return Err(SeriesError::MalformedDays {
                    ordinal,
                    reason: "ordinals not contiguous from 0",
                });
            }
            if !(rec.sunrise < rec.sunset && rec.sunset < rec.next_sunrise) {
                return Err(SeriesError::MalformedDays {
                    ordinal,
                    reason: "sunrise, sunset and next sunrise out of order",
                });
            }
            let chained = days
                .get(i + 1)
                .is_none_or(|next| (next.sunrise - rec.next_sunrise).abs() <= 1e-9);
            if !chained {
                return Err(SeriesError::MalformedDays {
                    ordinal,
                    reason: "next sunrise differs from following day's sunrise",
                });
            }
            for kind in AngamKind::all() {
                match rec.transitions(*kind).first() {
                    Some(t) if t.angam == rec.angam_at_sunrise(*kind) => {}
                    _ => {
                        return Err(SeriesError::MalformedDays {
                            ordinal,
                            reason: "first transition differs from sunrise angam",
                        });
                    }
                }
            }
        }
        Ok(Self {
            start,
            duration,
            days,
        })
    }

    /// Date of ordinal 1.
    pub fn start_date(&self) -> GregorianDate {
        self.start
    }

    /// Number of requested days.
    pub fn duration(&self) -> i64 {
        self.duration
    }

    /// Requested ordinals, `1..=duration`.
    pub fn requested(&self) -> RangeInclusive<DayOrdinal> {
        1..=self.duration
    }

    pub fn last_ordinal(&self) -> DayOrdinal {
        self.days.len() as i64 - 1
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// Record for ordinal `d`.
    pub fn day(&self, d: DayOrdinal) -> Result<&DayRecord, SeriesError> {
        usize::try_from(d)
            .ok()
            .and_then(|i| self.days.get(i))
            .ok_or(SeriesError::DayOutOfRange {
                ordinal: d,
                first: 0,
                last: self.last_ordinal(),
            })
    }

    /// Weekday of ordinal 1, 0 = Sunday.
    pub fn weekday_start(&self) -> u8 {
        self.start.weekday()
    }

    /// The day whose `[sunrise, next_sunrise)` contains `jd`.
    pub fn day_containing(&self, jd: f64) -> Result<&DayRecord, SeriesError> {
        let idx = self.days.partition_point(|r| r.sunrise <= jd);
        if idx == 0 {
            return Err(SeriesError::InstantOutOfRange { jd });
        }
        let rec = &self.days[idx - 1];
        // The final record's next sunrise is still answerable from its transitions.
        if rec.contains(jd) || (idx == self.days.len() && jd == rec.next_sunrise) {
            Ok(rec)
        } else {
            Err(SeriesError::InstantOutOfRange { jd })
        }
    }

    /// Angam of `kind` active at `jd`.
    pub fn angam_at(&self, kind: AngamKind, jd: f64) -> Result<u8, SeriesError> {
        Ok(self.day_containing(jd)?.angam_at(kind, jd))
    }

    /// Angam timeline over `[start, end]`, clipped to that interval.
    pub fn angam_segments(
        &self,
        kind: AngamKind,
        start: f64,
        end: f64,
    ) -> Result<Vec<AngamSegment>, SeriesError> {
        let first = self.day_containing(start)?.ordinal;
        let mut out: Vec<AngamSegment> = Vec::new();
        let mut push = |angam: u8, s: f64, e: f64| {
            let (s, e) = (s.max(start), e.min(end));
            if e <= s {
                return;
            }
            match out.last_mut() {
                Some(last) if last.angam == angam && (last.end - s).abs() < 1e-9 => last.end = e,
                _ => out.push(AngamSegment { angam, start: s, end: e }),
            }
        };
        let mut d = first;
        loop {
            let rec = self.day(d)?;
            if rec.sunrise > end {
                break;
            }
            let mut cursor = rec.sunrise;
            let tr = rec.transitions(kind);
            for t in tr {
                let seg_end = t.end.unwrap_or(rec.next_sunrise);
                push(t.angam, cursor, seg_end);
                cursor = seg_end;
            }
            if let Some(last) = tr.last().filter(|t| t.end.is_some()) {
                push(last.angam % kind.count() + 1, cursor, rec.next_sunrise);
            }
            if rec.next_sunrise >= end {
                break;
            }
            d += 1;
        }
        Ok(out)
    }

    /// Time in days during which `target` is active inside `[start, end]`.
    pub fn angam_overlap(
        &self,
        kind: AngamKind,
        target: u8,
        start: f64,
        end: f64,
    ) -> Result<f64, SeriesError> {
        Ok(self
            .angam_segments(kind, start, end)?
            .iter()
            .filter(|s| s.angam == target)
            .map(|s| s.end - s.start)
            .sum())
    }

    /// First instant strictly inside `(start, end)` at which `angam` gives
    /// way to the next angam of `kind`.
    pub fn angam_end_within(
        &self,
        kind: AngamKind,
        angam: u8,
        start: f64,
        end: f64,
    ) -> Result<Option<f64>, SeriesError> {
        Ok(self
            .angam_segments(kind, start, end)?
            .iter()
            .find(|s| s.angam == angam && s.end < end)
            .map(|s| s.end))
    }

    /// Intervals inside `[start, end]` during which every `(kind, angam)`
    /// condition holds at once, in time order.
    pub fn joint_intervals(
        &self,
        conditions: &[(AngamKind, u8)],
        start: f64,
        end: f64,
    ) -> Result<Vec<(f64, f64)>, SeriesError> {
        let mut joint = vec![(start, end)];
        for &(kind, angam) in conditions {
            let held: Vec<(f64, f64)> = self
                .angam_segments(kind, start, end)?
                .into_iter()
                .filter(|s| s.angam == angam)
                .map(|s| (s.start, s.end))
                .collect();
            joint = intersect(&joint, &held);
            if joint.is_empty() {
                break;
            }
        }
        Ok(joint)
    }
}

/// Pairwise intersection of two sorted, disjoint interval lists.
fn intersect(a: &[(f64, f64)], b: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let lo = a[i].0.max(b[j].0);
        let hi = a[i].1.min(b[j].1);
        if lo < hi {
            out.push((lo, hi));
        }
        if a[i].1 < b[j].1 {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}
