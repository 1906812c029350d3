//! Yogas of a weekday with a tithi, nakshatra, month or yoga.

use utsava_base::AngamKind;
use utsava_series::{DayOrdinal, Kaala, LunarMonth, SeriesError, TimeSeries, kaala_angams};

use super::{sunrise_angam, sunset_angam, tithi_sunrise, weekday};
use crate::diagnostics::Diagnostics;
use crate::instance::FestivalInstance;
use crate::registry::FestivalRegistry;

const SUNDAY: u8 = 0;
const MONDAY: u8 = 1;
const TUESDAY: u8 = 2;
const WEDNESDAY: u8 = 3;
const FRIDAY: u8 = 5;

/// Solar month, weekday, festival.
const MASA_VARA: [(u8, u8, &str); 6] = [
    (5, 0, "ta:AvaNi~JAyir2r2ukkizhamai"),
    (6, 6, "ta:puraTTAci~can2ikkizhamai"),
    (8, 0, "ta:kArttigai~JAyir2r2ukkizhamai"),
    (4, 5, "ta:ADi~veLLikkizhamai"),
    (10, 5, "ta:tai~veLLikkizhamai"),
    (11, 2, "ta:mAci~cevvAy"),
];

/// Nakshatra, weekday, festival.
const NAKSHATRA_VARA: [(u8, u8, &str); 10] = [
    (13, 0, "Adityahasta-puNyakAlaH"),
    (8, 0, "ravipuSyayOga-puNyakAlaH"),
    (22, 1, "sOmazrAvaNI-puNyakAlaH"),
    (5, 1, "sOmamRgazIrSa-puNyakAlaH"),
    (1, 2, "bhaumAzvinI-puNyakAlaH"),
    (6, 2, "bhaumArdrA-puNyakAlaH"),
    (17, 3, "budhAnurAdhA-puNyakAlaH"),
    (8, 4, "gurupuSya-puNyakAlaH"),
    (27, 5, "bhRgurEvatI-puNyakAlaH"),
    (4, 6, "zanirOhiNI-puNyakAlaH"),
];

/// Nakshatras that make a Sunday amavasya a vyatipata.
const VYATIPATA_STARS: [u8; 5] = [1, 6, 9, 22, 23];

fn at_sunrise_or_sunset(
    series: &TimeSeries,
    d: DayOrdinal,
    kind: AngamKind,
    angam: u8,
) -> Result<bool, SeriesError> {
    Ok(sunrise_angam(series, d, kind)? == angam || sunset_angam(series, d, kind)? == angam)
}

/// Amavasya with vyatipata yoga and zravaNa on a Monday or Sunday.
pub(super) fn mahodaya_ardhodaya(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let month = series.day(d)?.lunar_month;
    let amavasya = (matches!(month, LunarMonth::Nija(10 | 11)) && tithi_sunrise(series, d)? == 30)
        || sunset_angam(series, d, AngamKind::Tithi)? == 30;
    if !amavasya
        || !at_sunrise_or_sunset(series, d, AngamKind::Yoga, 17)?
        || !at_sunrise_or_sunset(series, d, AngamKind::Nakshatra, 22)?
    {
        return Ok(());
    }
    match weekday(series, d)? {
        MONDAY => registry.add("mahOdaya-puNyakAlaH", d, diag),
        SUNDAY => registry.add("ardhOdaya-puNyakAlaH", d, diag),
        _ => {}
    }
    Ok(())
}

pub(super) fn tithi_vara_yoga(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let tithi = tithi_sunrise(series, d)?;
    match weekday(series, d)? {
        TUESDAY if tithi % 15 == 4 => {
            let name = if tithi == 4 { "sukhA~aGgAraka-caturthI" } else { "aGgAraka-caturthI" };
            registry.add(name, d, diag);
        }
        TUESDAY if tithi == 29 => {
            registry.add("kRSNAGgAraka-caturdazI-puNyakAlaH/yamatarpaNam", d, diag);
        }
        WEDNESDAY if tithi % 15 == 8 => registry.add("budhASTamI", d, diag),
        _ => {}
    }
    Ok(())
}

/// First Friday of solar tulA.
pub(super) fn bhriguvara_subrahmanya(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    const NAME: &str = "bhRguvAra-subrahmaNya-vratam";
    let day = series.day(d)?;
    let first = !registry.contains(&FestivalInstance::new(NAME));
    if day.solar_month == 7 && day.weekday == FRIDAY && first {
        registry.add(NAME, d, diag);
    }
    Ok(())
}

pub(super) fn masa_vara_yoga(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let day = series.day(d)?;
    if day.lunar_month == LunarMonth::Nija(8) && day.weekday == MONDAY {
        registry.add("kRttikA~sOmavAsaraH", d, diag);
    }
    for (month, vara, name) in MASA_VARA {
        if day.solar_month == month && day.weekday == vara {
            registry.add(name, d, diag);
        }
    }
    Ok(())
}

pub(super) fn nakshatra_vara_yoga(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let star = sunrise_angam(series, d, AngamKind::Nakshatra)?;
    let vara = weekday(series, d)?;
    for (n, wd, name) in NAKSHATRA_VARA {
        let n_prev = (n + 25) % 27 + 1;
        if vara != wd || (star != n && star != n_prev) {
            continue;
        }
        let s = kaala_angams(series, d, AngamKind::Nakshatra, Kaala::Dinamaana)?;
        if [star, s[0], s[1]].contains(&n) {
            registry.add(name, d, diag);
        }
    }
    Ok(())
}

/// Wednesday with Ayushman yoga and Bava karana, at sunrise or at sunset.
pub(super) fn ayushman_bava_saumya(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    if weekday(series, d)? != WEDNESDAY {
        return Ok(());
    }
    let bava = |karana: u8| (2..52).step_by(7).any(|k| k == karana);
    let day = series.day(d)?;
    let hit = [day.sunrise, day.sunset].into_iter().any(|jd| {
        day.angam_at(AngamKind::Yoga, jd) == 3 && bava(day.angam_at(AngamKind::Karana, jd))
    });
    if hit {
        registry.add("AyuSmAn-bava-saumya", d, diag);
    }
    Ok(())
}

/// Amavasya on a Monday, and the vyatipata of a Sunday amavasya.
pub(super) fn amavasya_yoga(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let tithi = tithi_sunrise(series, d)?;
    let vara = weekday(series, d)?;
    if tithi == 30 && vara == MONDAY {
        registry.add("sOmavatI amAvAsyA", d, diag);
    }
    if vara != SUNDAY {
        return Ok(());
    }
    let tithi_sunset = sunset_angam(series, d, AngamKind::Tithi)?;
    let vyatipata = (tithi == 30
        && VYATIPATA_STARS.contains(&sunrise_angam(series, d, AngamKind::Nakshatra)?))
        || (tithi_sunset == 30
            && VYATIPATA_STARS.contains(&sunset_angam(series, d, AngamKind::Nakshatra)?));
    if vyatipata {
        registry.add("vyatIpAta-yOgaH (alabhyam)", d, diag);
    }
    Ok(())
}
