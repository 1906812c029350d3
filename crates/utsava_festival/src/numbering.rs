//! Instance numbers for festivals counted from a first year.
//!
//! A festival first celebrated in `year_start` gets the number of the
//! year it falls in: years elapsed from the first year to the start of
//! the computed range, plus one for every solar or lunar new year crossed
//! inside the range before the festival day.

use tracing::debug;
use utsava_series::{DayOrdinal, LunarMonth, SeriesError, TimeSeries};

use crate::diagnostics::{Anomaly, Diagnostics};
use crate::instance::FestivalInstance;
use crate::registry::FestivalRegistry;
use crate::rule::{FestivalRule, MonthType, YearStart};

/// Two occurrences closer than this are reported as a repeat.
pub const MIN_YEARLY_GAP_DAYS: i64 = 300;

/// New-year days inside the requested range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearStarts {
    /// First days of solar month 1.
    pub solar: Vec<DayOrdinal>,
    /// First days of nija lunar month 1.
    pub lunar: Vec<DayOrdinal>,
}

impl YearStarts {
    pub fn scan(series: &TimeSeries) -> Result<Self, SeriesError> {
        let mut starts = Self::default();
        for d in series.requested() {
            let today = series.day(d)?;
            let yesterday = series.day(d - 1)?;
            if today.solar_month == 1 && yesterday.solar_month != 1 {
                starts.solar.push(d);
            }
            let first = LunarMonth::Nija(1);
            if today.lunar_month == first && yesterday.lunar_month != first {
                starts.lunar.push(d);
            }
        }
        Ok(starts)
    }

    fn crossed(&self, month_type: MonthType, day: DayOrdinal) -> i64 {
        let starts = match month_type {
            MonthType::SolarMonth => &self.solar,
            MonthType::LunarMonth => &self.lunar,
            MonthType::GregorianMonth => return 0,
        };
        starts.iter().filter(|&&s| s <= day).count() as i64
    }
}

/// Instance number of a festival on `day`; may be zero or negative for
/// festivals whose first year lies after the range.
pub fn instance_number(
    start: YearStart,
    month_type: MonthType,
    range_start_year: i64,
    starts: &YearStarts,
    day: DayOrdinal,
) -> i64 {
    range_start_year + start.era.offset() - start.year + 1 + starts.crossed(month_type, day)
}

/// Rename every numbered festival in `registry` to its per-day instances.
///
/// The unnumbered key is removed, except for days whose number is not
/// positive; those stay under the base name.
pub fn number_festivals(
    series: &TimeSeries,
    rules: &[FestivalRule],
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let starts = YearStarts::scan(series)?;
    let range_start_year = i64::from(series.start_date().year);

    for rule in rules {
        let Some(year_start) = rule.year_start else {
            continue;
        };
        let base = FestivalInstance::new(rule.name.as_str());
        let Some(days) = registry.remove(&base) else {
            continue;
        };
        let ordered: Vec<DayOrdinal> = days.iter().copied().collect();
        for pair in ordered.windows(2) {
            if pair[1] - pair[0] < MIN_YEARLY_GAP_DAYS {
                diag.record(Anomaly::RepeatWithinYear {
                    festival: rule.name.clone(),
                    first: pair[0],
                    second: pair[1],
                });
            }
        }

        let mut future = Vec::new();
        for day in ordered {
            let number = instance_number(year_start, rule.month_type, range_start_year, &starts, day);
            let Some(n) = u32::try_from(number).ok().filter(|&n| n > 0) else {
                diag.record(Anomaly::FutureNumbered {
                    festival: rule.name.clone(),
                    day,
                    number,
                });
                future.push(day);
                continue;
            };
            let numbered = FestivalInstance::numbered(rule.name.as_str(), n);
            if let Some(previous) = registry.days(&numbered).and_then(|d| d.first().copied()) {
                diag.record(Anomaly::NumberReassigned {
                    festival: numbered.clone(),
                    previous,
                    day,
                });
            }
            debug!(festival = %numbered, day, "numbered");
            registry.set(numbered, [day]);
        }
        if !future.is_empty() {
            registry.set(base, future);
        }
    }
    Ok(())
}
