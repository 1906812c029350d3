//! Ekadashi for the smarta, vaishnava and yati traditions, and the eight
//! mahadvadashis.

use utsava_base::AngamKind;
use utsava_series::{DayOrdinal, LunarMonth, SeriesError, TimeSeries};

use super::{arunodaya_angam, sunrise_angam, tithi_sunrise};
use crate::diagnostics::Diagnostics;
use crate::names::{Paksha, ekadashi_name};
use crate::registry::FestivalRegistry;

/// Ekadashi days as offsets from the day the pattern was read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EkadashiDays {
    pub smarta: i64,
    pub vaishnava: i64,
    /// Set only when sannyasins observe a different day from householders.
    pub yati: Option<i64>,
}

impl EkadashiDays {
    fn uniform(&self) -> bool {
        self.yati.is_none() && self.smarta == self.vaishnava
    }
}

/// Pick the ekadashi days from the paksha-relative tithis at three
/// consecutive sunrises.
///
/// `arunodaya_today` and `arunodaya_tomorrow` are the paksha-relative
/// tithis at arunodaya of the first and second day; vaishnavas reject an
/// ekadashi touched by dashami at arunodaya. Patterns not listed are
/// handled on a neighbouring day and give `None`.
pub fn select_ekadashi_days(
    pattern: [u8; 3],
    arunodaya_today: u8,
    arunodaya_tomorrow: u8,
) -> Option<EkadashiDays> {
    match pattern {
        [11, 11, 12] | [10, 12, 12] => Some(EkadashiDays {
            smarta: 1,
            vaishnava: if arunodaya_tomorrow == 10 { 2 } else { 1 },
            yati: None,
        }),
        [10, 12, 13] | [11, 12, 13] | [11, 12, 12] | [11, 12, 14] => {
            let clean = arunodaya_today == 11 && matches!(pattern, [11, 12, 13] | [11, 12, 14]);
            Some(EkadashiDays {
                smarta: 0,
                vaishnava: if clean { 0 } else { 1 },
                yati: None,
            })
        }
        [10, 11, 13] | [11, 11, 13] => Some(EkadashiDays {
            smarta: 0,
            vaishnava: 1,
            yati: Some(1),
        }),
        _ => None,
    }
}

pub(super) fn ekadashi_vratam(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let tithi = tithi_sunrise(series, d)?;
    if !matches!(tithi % 15, 10 | 11) {
        return Ok(());
    }
    let pattern = [
        tithi % 15,
        tithi_sunrise(series, d + 1)? % 15,
        tithi_sunrise(series, d + 2)? % 15,
    ];
    let arunodaya_today = arunodaya_angam(series, d, AngamKind::Tithi)? % 15;
    let arunodaya_tomorrow = arunodaya_angam(series, d + 1, AngamKind::Tithi)? % 15;
    let Some(days) = select_ekadashi_days(pattern, arunodaya_today, arunodaya_tomorrow) else {
        return Ok(());
    };

    let today = series.day(d)?;
    let paksha = Paksha::of_tithi(tithi);
    let shukla = paksha == Paksha::Shukla;
    let name = ekadashi_name(paksha, today.lunar_month);
    let smarta = d + days.smarta;
    let vaishnava = d + days.vaishnava;
    let dhanus = today.solar_month == 9;

    match days.yati {
        None if days.uniform() => {
            registry.add(format!("sarva-{name}"), smarta, diag);
            if shukla && dhanus {
                registry.add("sarva-vaikuNTha-EkAdazI", smarta, diag);
            }
        }
        None => {
            registry.add(format!("smArta-{name}"), smarta, diag);
            registry.add(format!("vaiSNava-{name}"), vaishnava, diag);
            if shukla && dhanus {
                registry.add("smArta-vaikuNTha-EkAdazI", smarta, diag);
                registry.add("vaiSNava-vaikuNTha-EkAdazI", vaishnava, diag);
            }
        }
        Some(yati) => {
            let yati = d + yati;
            registry.add(format!("smArta-{name} (gRhastha)"), smarta, diag);
            registry.add(format!("smArta-{name} (sannyastha)"), yati, diag);
            registry.add(format!("vaiSNava-{name}"), vaishnava, diag);
            if shukla && dhanus {
                registry.add("smArta-vaikuNTha-EkAdazI (gRhastha)", smarta, diag);
                registry.add("smArta-vaikuNTha-EkAdazI (sannyastha)", yati, diag);
                registry.add("vaiSNava-vaikuNTha-EkAdazI", vaishnava, diag);
            }
        }
    }
    if shukla && today.solar_month == 8 {
        registry.add("guruvAyupura-EkAdazI", vaishnava, diag);
        registry.add("kaizika-EkAdazI", vaishnava, diag);
    }
    Ok(())
}

/// Whether the first tithi ending on day `d` is an ekadashi or dvadashi
/// that ends in zravaNa.
fn ends_in_shravana(series: &TimeSeries, d: DayOrdinal) -> Result<bool, SeriesError> {
    let Some(first) = series.day(d)?.transitions(AngamKind::Tithi).first().copied() else {
        return Ok(false);
    };
    let Some(end) = first.end else {
        return Ok(false);
    };
    if !matches!(first.angam % 15, 11 | 12) {
        return Ok(false);
    }
    Ok(series.angam_at(AngamKind::Nakshatra, end)? == 22)
}

pub(super) fn mahadvadashi(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let t = tithi_sunrise(series, d)? % 15;
    let t_next = tithi_sunrise(series, d + 1)? % 15;
    let star = sunrise_angam(series, d, AngamKind::Nakshatra)?;

    match (t, t_next) {
        (11, 11) => registry.add("unmIlanI~mahAdvAdazI", d + 1, diag),
        (12, 12) => registry.add("vyaJjulI~mahAdvAdazI", d, diag),
        (11, 13) => registry.add("trisparzA~mahAdvAdazI", d, diag),
        // Purnima or amavasya spanning two sunrises.
        (0, 0) if d - 3 > 0 => registry.add("pakSavardhinI~mahAdvAdazI", d - 3, diag),
        _ => {}
    }
    if t != 12 {
        return Ok(());
    }
    match star {
        4 => registry.add("pApanAzinI~mahAdvAdazI", d, diag),
        7 => registry.add("jayantI~mahAdvAdazI", d, diag),
        8 => {
            registry.add("jayA~mahAdvAdazI", d, diag);
            if series.day(d)?.lunar_month == LunarMonth::Nija(12) {
                registry.add("gOvinda~mahAdvAdazI", d, diag);
            }
        }
        _ => {}
    }
    let shravana = star == 22
        || (matches!(star, 21..=23)
            && (ends_in_shravana(series, d)? || ends_in_shravana(series, d + 1)?));
    if shravana {
        registry.add("vijayA/zravaNa-mahAdvAdazI", d, diag);
    }
    Ok(())
}
