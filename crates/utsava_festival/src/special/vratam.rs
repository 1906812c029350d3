//! Monthly tithi vratas with their own day-selection rules.

use utsava_base::AngamKind;
use utsava_series::{DayOrdinal, Kaala, LunarMonth, SeriesError, TimeSeries, kaala_angams};

use super::{sunrise_angam, sunset_angam, tithi_sunrise, weekday};
use crate::diagnostics::Diagnostics;
use crate::names::sankatahara_ganapati_name;
use crate::instance::FestivalInstance;
use crate::registry::FestivalRegistry;

const TUESDAY: u8 = 2;

/// First sighting of the moon after the new moon: the evening on which
/// dvitiya prevails at sunset.
pub(super) fn chandra_darshanam(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    _: &mut Diagnostics,
) -> Result<(), SeriesError> {
    if !matches!(tithi_sunrise(series, d)?, 1 | 2) {
        return Ok(());
    }
    let sunset = sunset_angam(series, d, AngamKind::Tithi)?;
    let sunset_tomorrow = sunset_angam(series, d + 1, AngamKind::Tithi)?;
    let day = match sunset {
        1 => Some(d + 1),
        2 => Some(d),
        _ if sunset_tomorrow == 2 => Some(d + 1),
        _ => None,
    };
    if let Some(day) = day {
        registry.insert("candra-darzanam", day);
    }
    Ok(())
}

fn tithi_at_moonrise(series: &TimeSeries, d: DayOrdinal) -> Result<u8, SeriesError> {
    series.angam_at(AngamKind::Tithi, series.day(d)?.moonrise)
}

/// Krishna chaturthi observed on the day chaturthi prevails at moonrise.
pub(super) fn sankatahara_chaturthi(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    _: &mut Diagnostics,
) -> Result<(), SeriesError> {
    if !matches!(tithi_sunrise(series, d)?, 18 | 19) {
        return Ok(());
    }
    let yesterday = tithi_at_moonrise(series, d - 1)?;
    let today = tithi_at_moonrise(series, d)?;
    let tomorrow = tithi_at_moonrise(series, d + 1)?;

    let fday = if today == 19 {
        // Otherwise yesterday already took it.
        (yesterday != 19).then_some(d)
    } else if tomorrow == 19 {
        Some(d + 1)
    } else if yesterday != 19 && today == 18 && tomorrow == 20 {
        // Chaturthi touches neither moonrise; take the later day.
        Some(d + 1)
    } else {
        None
    };
    let Some(fday) = fday else {
        return Ok(());
    };
    let month = series.day(d)?.lunar_month;
    let base = if month == LunarMonth::Nija(5) {
        "mahAsaGkaTahara-caturthI-vratam"
    } else {
        "saGkaTahara-caturthI-vratam"
    };
    let prefix = if weekday(series, fday)? == TUESDAY { "aGgArakI~" } else { "" };
    let form = sankatahara_ganapati_name(month);
    registry.insert(format!("{prefix}{form}-mahAgaNapati {base}"), fday);
    Ok(())
}

/// Name of the shashthi vrata in `month`.
fn shashthi_name(month: LunarMonth) -> &'static str {
    match month {
        LunarMonth::Nija(8) => "skandaSaSThI-vratam",
        LunarMonth::Nija(4) => "kumAra-SaSThI-vratam",
        LunarMonth::Nija(6) => "SaSThIdEvI-SaSThI-vratam",
        LunarMonth::Nija(9) => "subrahmaNya-SaSThI-vratam",
        _ => "SaSThI-vratam",
    }
}

/// Shashthi at madhyaahna, puurvaviddha.
pub(super) fn shashthi_vratam(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    if !matches!(tithi_sunrise(series, d)?, 5 | 6) {
        return Ok(());
    }
    let festival = FestivalInstance::new(shashthi_name(series.day(d)?.lunar_month));
    let s = kaala_angams(series, d, AngamKind::Tithi, Kaala::Madhyaahna)?;
    let yesterday_taken = registry.has(&festival, d - 1);
    if s[0] == 6 || s[1] == 6 {
        if !yesterday_taken {
            registry.add(festival, d, diag);
        }
    } else if s[2] == 6 || s[3] == 6 {
        registry.add(festival, d + 1, diag);
    } else if (s[2] == 7 || s[3] == 7) && !yesterday_taken {
        // Shashthi fell between the two madhyaahnas.
        registry.add(festival, d, diag);
    }
    Ok(())
}

/// Saptamis made special by weekday, star or sankranti.
pub(super) fn vishesha_saptami(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let day = series.day(d)?;
    let tithi = day.angam_at_sunrise(AngamKind::Tithi);
    if day.weekday == 0 && tithi % 15 == 7 {
        let mut name = String::from("bhAnusaptamI");
        if tithi == 7 {
            name.insert_str(0, "vijayA~");
        }
        if day.angam_at_sunrise(AngamKind::Nakshatra) == 27 {
            name.push('★');
        }
        registry.add(name, d, diag);
    }
    if day.solar_month_end.is_some() && tithi == 7 {
        registry.add("mahAjayA~saptamI", d, diag);
    }
    // First pada of hasta at sunrise.
    if tithi == 7 && day.angam_at_sunrise(AngamKind::NakshatraPada) == 49 {
        registry.add("bhadrA~saptamI", d, diag);
    }
    Ok(())
}

/// Trayodashi at pradosha, with soma and shani variants.
pub(super) fn pradosha_vratam(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    if !matches!(tithi_sunrise(series, d)?, 12 | 13 | 27 | 28) {
        return Ok(());
    }
    let sunset = sunset_angam(series, d, AngamKind::Tithi)? % 15;
    let sunset_tomorrow = sunset_angam(series, d + 1, AngamKind::Tithi)? % 15;
    let fday = if sunset <= 13 && sunset_tomorrow != 13 {
        d
    } else if sunset_tomorrow == 13 {
        d + 1
    } else {
        return Ok(());
    };
    let prefix = match weekday(series, fday)? {
        1 => "sOma-",
        6 => "zani-",
        _ => "",
    };
    registry.add(format!("{prefix}pradOSa-vratam"), fday, diag);
    Ok(())
}

/// Krishna trayodashi of phalguna with shatabhishak at sunrise.
pub(super) fn varuni_trayodashi(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let day = series.day(d)?;
    if day.lunar_month != LunarMonth::Nija(12)
        || day.angam_at_sunrise(AngamKind::Tithi) != 28
        || sunrise_angam(series, d, AngamKind::Nakshatra)? != 24
    {
        return Ok(());
    }
    let mut name = String::from("vAruNI~trayOdazI");
    if day.weekday == 6 {
        name.insert_str(0, "mahA");
        if day.angam_at_sunrise(AngamKind::Yoga) == 23 {
            name.insert_str(0, "mahA");
        }
    }
    registry.add(name, d, diag);
    Ok(())
}

#[cfg(test)]
mod tests {
    use utsava_base::GregorianDate;
    use utsava_series::synthetic::SeriesFixture;

    use super::*;
    use crate::special::run_assigner;

    // 2024-01-01 is a Monday.
    fn fixture(days: i64) -> SeriesFixture {
        SeriesFixture::new(GregorianDate::new(2024, 1, 1).unwrap(), days)
    }

    fn run(
        series: &TimeSeries,
        f: crate::special::DayAssigner,
    ) -> (FestivalRegistry, Diagnostics) {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        run_assigner(series, "test", f, &mut reg, &mut diag);
        (reg, diag)
    }

    fn days(reg: &FestivalRegistry, name: &str) -> Vec<DayOrdinal> {
        reg.days_of(name).map(|d| d.iter().copied().collect()).unwrap_or_default()
    }

    #[test]
    fn chandra_darshanam_on_dvitiya_evening() {
        let mut f = fixture(5);
        // Tithi 2 starts at 0.6 of day 2 (after sunset at 0.5).
        f.sunrise_angams(AngamKind::Tithi, &[29, 30, 1, 2, 3, 4, 5, 6, 7], 0.6);
        let s = f.build().unwrap();
        let (reg, _) = run(&s, chandra_darshanam);
        // Day 2 sunset has tithi 1, so the evening of day 3 is taken.
        assert_eq!(days(&reg, "candra-darzanam"), [3]);
    }

    #[test]
    fn shashthi_at_madhyaahna() {
        let mut f = fixture(5);
        // Shashthi begins in the afternoon of day 2.
        f.sunrise_angams(AngamKind::Tithi, &[3, 4, 5, 6, 7, 8, 9, 10, 11], 0.4)
            .lunar_month_all(LunarMonth::Nija(8));
        let s = f.build().unwrap();
        let (reg, _) = run(&s, shashthi_vratam);
        assert_eq!(days(&reg, "skandaSaSThI-vratam"), [3]);
    }

    #[test]
    fn pradosha_prefix_on_monday() {
        let mut f = fixture(10);
        // 2024-01-08 (ordinal 8) is a Monday with trayodashi through sunset.
        let t: Vec<u8> = (5..18).collect();
        f.sunrise_angams(AngamKind::Tithi, &t, 0.9);
        let s = f.build().unwrap();
        let (reg, _) = run(&s, pradosha_vratam);
        assert_eq!(days(&reg, "sOma-pradOSa-vratam"), [8]);
    }

    #[test]
    fn sankatahara_on_tuesday() {
        let mut f = fixture(5);
        // Moonrise is at 0.8 of the civil day; chaturthi covers the
        // moonrise of day 2 (a Tuesday) only.
        let base = f.sunrise(0);
        f.timeline(
            AngamKind::Tithi,
            &[
                (17, base + 1.1),
                (18, base + 2.4),
                (19, base + 3.3),
                (20, f64::INFINITY),
            ],
        );
        let s = f.build().unwrap();
        let (reg, _) = run(&s, sankatahara_chaturthi);
        assert_eq!(
            days(&reg, "aGgArakI~vikaTa-mahAgaNapati saGkaTahara-caturthI-vratam"),
            [2]
        );
    }

    #[test]
    fn sankatahara_form_follows_month() {
        let mut f = fixture(5);
        let base = f.sunrise(0);
        // Chaturthi covers the moonrise of day 3, a Wednesday.
        f.timeline(
            AngamKind::Tithi,
            &[(18, base + 3.3), (19, base + 4.3), (20, f64::INFINITY)],
        )
        .lunar_month_all(LunarMonth::Adhika(4));
        let s = f.build().unwrap();
        let (reg, _) = run(&s, sankatahara_chaturthi);
        assert_eq!(
            days(&reg, "vibhuvanapAlaka-mahAgaNapati saGkaTahara-caturthI-vratam"),
            [3]
        );

        let mut f = fixture(5);
        f.timeline(
            AngamKind::Tithi,
            &[(18, base + 3.3), (19, base + 4.3), (20, f64::INFINITY)],
        )
        .lunar_month_all(LunarMonth::Nija(5));
        let s = f.build().unwrap();
        let (reg, _) = run(&s, sankatahara_chaturthi);
        assert_eq!(
            days(&reg, "gajAnana-mahAgaNapati mahAsaGkaTahara-caturthI-vratam"),
            [3]
        );
    }

    #[test]
    fn bhanu_saptami_on_sunday() {
        let mut f = fixture(10);
        // Ordinal 7 is Sunday 2024-01-07.
        let t: Vec<u8> = std::iter::once(30).chain(1..=13).collect();
        f.sunrise_angams(AngamKind::Tithi, &t, 0.5);
        let s = f.build().unwrap();
        let (reg, _) = run(&s, vishesha_saptami);
        assert_eq!(days(&reg, "vijayA~bhAnusaptamI"), [7]);
        assert!(days(&reg, "bhadrA~saptamI").is_empty());
    }

    #[test]
    fn bhadra_saptami_needs_hasta_first_pada() {
        let mut f = fixture(10);
        let t: Vec<u8> = (1..=14).collect();
        f.sunrise_angams(AngamKind::Tithi, &t, 0.5);
        // Saptami is at sunrise of ordinal 6; hasta pada 1 there only.
        let padas: Vec<u8> = (43..=56).collect();
        f.sunrise_angams(AngamKind::NakshatraPada, &padas, 0.9);
        let s = f.build().unwrap();
        let (reg, _) = run(&s, vishesha_saptami);
        assert_eq!(days(&reg, "bhadrA~saptamI"), [6]);

        let mut f = fixture(10);
        f.sunrise_angams(AngamKind::Tithi, &t, 0.5);
        let padas: Vec<u8> = (44..=57).collect();
        f.sunrise_angams(AngamKind::NakshatraPada, &padas, 0.9);
        let (reg, _) = run(&f.build().unwrap(), vishesha_saptami);
        assert!(days(&reg, "bhadrA~saptamI").is_empty());
    }
}
