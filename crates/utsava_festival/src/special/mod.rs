//! Observances placed by dedicated algorithms rather than by rule files.
//!
//! Each assigner looks at one requested day at a time and adds festivals
//! to the registry. [`SPECIAL_ASSIGNERS`] run in a fixed order, each over
//! the whole range, before the rule pass; [`AMAVASYA_ASSIGNER`] runs after
//! the amAvAsyA days are named.

mod ekadashi;
mod month_day;
mod solar;
mod vara;
mod vratam;

use utsava_base::AngamKind;
use utsava_series::{DayOrdinal, SeriesError, TimeSeries};

use crate::diagnostics::{Anomaly, Diagnostics};
use crate::registry::FestivalRegistry;

pub use ekadashi::{EkadashiDays, select_ekadashi_days};

/// One assigner: inspects day `d`, may add festivals.
pub type DayAssigner = fn(
    &TimeSeries,
    DayOrdinal,
    &mut FestivalRegistry,
    &mut Diagnostics,
) -> Result<(), SeriesError>;

/// All assigners, in evaluation order.
pub const SPECIAL_ASSIGNERS: [(&str, DayAssigner); 18] = [
    ("candra-darzanam", vratam::chandra_darshanam),
    ("saGkaTahara-caturthI", vratam::sankatahara_chaturthi),
    ("SaSThI-vratam", vratam::shashthi_vratam),
    ("vizESa-saptamI", vratam::vishesha_saptami),
    ("EkAdazI", ekadashi::ekadashi_vratam),
    ("mahAdvAdazI", ekadashi::mahadvadashi),
    ("pradOSa-vratam", vratam::pradosha_vratam),
    ("vAruNI~trayOdazI", vratam::varuni_trayodashi),
    ("mahOdaya", vara::mahodaya_ardhodaya),
    ("tithi-vAra", vara::tithi_vara_yoga),
    ("bhRguvAra-subrahmaNya-vratam", vara::bhriguvara_subrahmanya),
    ("mAsa-vAra", vara::masa_vara_yoga),
    ("nakSatra-vAra", vara::nakshatra_vara_yoga),
    ("mAsa-dina", month_day::month_day_festivals),
    ("AyuSmAn-bava-saumya", vara::ayushman_bava_saumya),
    ("agninakSatra", solar::agni_nakshatram),
    ("gajacchAyA-yOgaH", solar::gajachhaya_yoga),
    ("ayana-puNyakAlaH", solar::ayana_punyakala),
];

/// Observances that need the amAvAsyA to be known; run after the rules.
pub const AMAVASYA_ASSIGNER: (&str, DayAssigner) = ("amAvAsyA", vara::amavasya_yoga);

/// Run every special assigner over the requested range.
pub fn assign_special_festivals(
    series: &TimeSeries,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) {
    for (name, assigner) in SPECIAL_ASSIGNERS {
        run_assigner(series, name, assigner, registry, diag);
    }
}

/// Run one assigner over the requested range; failures are recorded per
/// day.
pub fn run_assigner(
    series: &TimeSeries,
    name: &str,
    assigner: DayAssigner,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) {
    for d in series.requested() {
        if let Err(error) = assigner(series, d, registry, diag) {
            diag.record(Anomaly::EvaluationFailed {
                festival: name.to_string(),
                day: d,
                error,
            });
        }
    }
}

fn sunrise_angam(series: &TimeSeries, d: DayOrdinal, kind: AngamKind) -> Result<u8, SeriesError> {
    Ok(series.day(d)?.angam_at_sunrise(kind))
}

fn tithi_sunrise(series: &TimeSeries, d: DayOrdinal) -> Result<u8, SeriesError> {
    sunrise_angam(series, d, AngamKind::Tithi)
}

fn sunset_angam(series: &TimeSeries, d: DayOrdinal, kind: AngamKind) -> Result<u8, SeriesError> {
    let day = series.day(d)?;
    Ok(day.angam_at(kind, day.sunset))
}

fn weekday(series: &TimeSeries, d: DayOrdinal) -> Result<u8, SeriesError> {
    Ok(series.day(d)?.weekday)
}

/// Angam at the arunodaya before sunrise of `d`: one fifteenth of the
/// previous sunrise-to-sunrise span earlier.
fn arunodaya_angam(series: &TimeSeries, d: DayOrdinal, kind: AngamKind) -> Result<u8, SeriesError> {
    let sunrise = series.day(d)?.sunrise;
    let prev = series.day(d - 1)?.sunrise;
    series.angam_at(kind, sunrise - (sunrise - prev) / 15.0)
}
