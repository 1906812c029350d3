//! Rule resolution over a built time series.
//!
//! For every requested day and every rule whose month filter matches,
//! the rule's kaala is sampled on that day and the next, the priority
//! table picks a day, the month filter is rechecked on that day and the
//! festival is committed through [`FestivalRegistry::add`].

use tracing::debug;
use utsava_base::{AngamKind, AngamNeighbours};
use utsava_series::{DayOrdinal, Kaala, SeriesError, TimeSeries, kaala_angams, kaala_windows};

use crate::diagnostics::{Anomaly, Diagnostics};
use crate::instance::FestivalInstance;
use crate::priority::{Outcome, decide, overlap_choice, report_no_match};
use crate::registry::FestivalRegistry;
use crate::rule::{FestivalRule, MonthType, RuleAngamType};

/// Resolve `rules` into a fresh registry.
pub fn resolve_rules(
    series: &TimeSeries,
    rules: &[FestivalRule],
) -> (FestivalRegistry, Diagnostics) {
    let mut registry = FestivalRegistry::new();
    let mut diag = Diagnostics::new();
    resolve(series, rules, &mut registry, &mut diag);
    (registry, diag)
}

/// Resolve `rules` into `registry`, day by day.
///
/// A rule that fails on some day is recorded and skipped for that day
/// only.
pub fn resolve(
    series: &TimeSeries,
    rules: &[FestivalRule],
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) {
    for d in series.requested() {
        for rule in rules {
            if let Err(error) = evaluate(series, rule, d, registry, diag) {
                diag.record(Anomaly::EvaluationFailed {
                    festival: rule.name.clone(),
                    day: d,
                    error,
                });
            }
        }
    }
}

fn lunar_month_matches(
    series: &TimeSeries,
    rule: &FestivalRule,
    d: DayOrdinal,
) -> Result<bool, SeriesError> {
    if rule.every_month() || series.day(d)?.lunar_month.matches(rule.month_number) {
        return Ok(true);
    }
    Ok(rule.angam_number == 1 && series.day(d + 1)?.lunar_month.matches(rule.month_number))
}

fn solar_month_matches(
    series: &TimeSeries,
    rule: &FestivalRule,
    d: DayOrdinal,
) -> Result<bool, SeriesError> {
    Ok(rule.every_month() || series.day(d)?.solar_month == rule.month_number)
}

/// Evaluate one rule on day `d`.
pub fn evaluate(
    series: &TimeSeries,
    rule: &FestivalRule,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let Some(kind) = rule.angam_type.kind() else {
        return evaluate_day_rule(series, rule, d, registry, diag);
    };
    let today = series.day(d)?;
    let tomorrow = series.day(d + 1)?;

    if rule.angam_type == RuleAngamType::Tithi
        && rule.month_type == MonthType::LunarMonth
        && rule.angam_number == 1
        && today.angam_at_sunrise(kind) == 30
        && tomorrow.angam_at_sunrise(kind) == 2
        && tomorrow.lunar_month.matches(rule.month_number)
    {
        // Prathama touched neither sunrise; the month changed overnight.
        registry.add(rule.name.as_str(), d, diag);
        return Ok(());
    }

    let month_ok = match rule.month_type {
        MonthType::LunarMonth => lunar_month_matches(series, rule, d)?,
        MonthType::SolarMonth => solar_month_matches(series, rule, d)?,
        MonthType::GregorianMonth => false,
    };
    if !month_ok {
        return Ok(());
    }

    let nb = AngamNeighbours::around(rule.angam_number, kind)?;
    let at_sunrise = today.angam_at_sunrise(kind);
    if at_sunrise != nb.prev && at_sunrise != nb.target {
        return Ok(());
    }

    let sample_day = if rule.kaala == Kaala::Arunodaya { d - 1 } else { d };
    let samples = kaala_angams(series, sample_day, kind, rule.kaala)?;
    let festival = FestivalInstance::new(rule.name.as_str());
    debug!(festival = %rule.name, day = d, ?samples, "kaala samples");

    let outcome = decide(rule.priority, samples, nb, rule.kaala, |k| {
        registry.has(&festival, d + k)
    });
    let offset = match outcome {
        Outcome::Assign(offset) => offset,
        Outcome::AssignUntouched(offset) => {
            diag.record(Anomaly::KaalaUntouched {
                festival: rule.name.clone(),
                day: d,
                kaala: rule.kaala,
                samples,
            });
            offset
        }
        Outcome::CompareOverlap => overlap_offset(series, d, kind, nb.target)?,
        Outcome::AlreadyAssigned => return Ok(()),
        Outcome::NoMatch => {
            if report_no_match(rule.priority, samples, nb, registry.contains(&festival)) {
                diag.record(Anomaly::Unresolved {
                    festival: rule.name.clone(),
                    day: d,
                    priority: rule.priority,
                    kaala: rule.kaala,
                    samples,
                });
            }
            return Ok(());
        }
    };
    let fday = d + offset;

    let still_ok = match rule.month_type {
        // The lunar month is rechecked on the evaluated day.
        MonthType::LunarMonth => lunar_month_matches(series, rule, d)?,
        _ => solar_month_matches(series, rule, fday)?,
    };
    if !still_ok {
        debug!(festival = %rule.name, fday, "month differs on chosen day");
        return Ok(());
    }
    if rule.month_type == MonthType::LunarMonth
        && rule.angam_number == 1
        && !rule.every_month()
        && !series.day(fday + 1)?.lunar_month.matches(rule.month_number)
    {
        return Ok(());
    }
    registry.add(festival, fday, diag);
    Ok(())
}

/// Offset (0 or 1) of the aparaahna window `target` covers longer.
fn overlap_offset(
    series: &TimeSeries,
    d: DayOrdinal,
    kind: AngamKind,
    target: u8,
) -> Result<i64, SeriesError> {
    let [today, tomorrow] = kaala_windows(series, d, Kaala::Aparaahna)?;
    let v1 = series.angam_overlap(kind, target, today.start, today.end)?;
    let v2 = series.angam_overlap(kind, target, tomorrow.start, tomorrow.end)?;
    debug!(day = d, today = v1, tomorrow = v2, "vyApti");
    Ok(overlap_choice(v1, v2))
}

/// Day-of-month rules on the solar or Gregorian calendar.
fn evaluate_day_rule(
    series: &TimeSeries,
    rule: &FestivalRule,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let today = series.day(d)?;
    match rule.month_type {
        MonthType::SolarMonth => {
            if today.solar_month != rule.month_number
                || today.solar_month_day != u32::from(rule.angam_number)
            {
                return Ok(());
            }
            if rule.kaala == Kaala::Arunodaya {
                let rashi = kaala_angams(series, d - 1, AngamKind::SolarRashi, Kaala::Arunodaya)?;
                if rashi[1] == rule.month_number {
                    registry.add(rule.name.as_str(), d, diag);
                } else if rashi[2] == rule.month_number {
                    registry.add(rule.name.as_str(), d + 1, diag);
                }
            } else {
                registry.add(rule.name.as_str(), d, diag);
            }
        }
        MonthType::GregorianMonth => {
            if u32::from(rule.month_number) == today.date.month
                && u32::from(rule.angam_number) == today.date.day
            {
                registry.add(rule.name.as_str(), d, diag);
            }
        }
        MonthType::LunarMonth => {}
    }
    Ok(())
}
