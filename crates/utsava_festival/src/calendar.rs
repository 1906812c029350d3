//! Final day to festival mapping.

use serde::Serialize;
use utsava_base::GregorianDate;
use utsava_series::{DayOrdinal, SeriesError, TimeSeries};

use crate::instance::FestivalInstance;
use crate::registry::FestivalRegistry;

/// Festivals of one civil day, deduplicated and in [`FestivalInstance`]
/// order: by base name, then by number, so `x#7` precedes `x#10` even
/// though the strings sort the other way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub ordinal: DayOrdinal,
    pub date: GregorianDate,
    pub festivals: Vec<String>,
}

/// Requested days that carry at least one festival, in day order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FestivalCalendar {
    days: Vec<CalendarDay>,
}

impl FestivalCalendar {
    /// Invert `registry`, keeping requested days and festivals `keep`
    /// accepts. Each day lists its festivals in [`FestivalInstance`] order.
    pub fn from_registry(
        series: &TimeSeries,
        registry: &FestivalRegistry,
        keep: impl Fn(&FestivalInstance) -> bool,
    ) -> Result<Self, SeriesError> {
        let requested = series.requested();
        let mut days = Vec::new();
        for (ordinal, festivals) in registry.by_day() {
            if !requested.contains(&ordinal) {
                continue;
            }
            let festivals: Vec<String> = festivals
                .into_iter()
                .filter(|f| keep(f))
                .map(ToString::to_string)
                .collect();
            if festivals.is_empty() {
                continue;
            }
            days.push(CalendarDay {
                ordinal,
                date: series.day(ordinal)?.date,
                festivals,
            });
        }
        Ok(Self { days })
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Festivals on ordinal `d`; empty for days without any.
    pub fn festivals_on(&self, d: DayOrdinal) -> &[String] {
        self.days
            .binary_search_by_key(&d, |day| day.ordinal)
            .map_or(&[][..], |i| self.days[i].festivals.as_slice())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
