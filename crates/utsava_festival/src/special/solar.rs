//! Yogas fixed by the sun's own position: agni nakSatram, gajacchAyA and
//! the ayana puNyakAlas.

use utsava_base::AngamKind;
use utsava_series::{DayOrdinal, SeriesError, TimeSeries};

use crate::diagnostics::Diagnostics;
use crate::registry::FestivalRegistry;

/// The sun entering the third pada of bharaNI in mESa, and leaving the
/// first pada of rOhiNI in vRSabha. Each is observed from the sunset at
/// which the crossing has happened.
pub(super) fn agni_nakshatram(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let day = series.day(d)?;
    if day.solar_month_day <= 10 {
        return Ok(());
    }
    let (pada, name) = match day.solar_month {
        1 => (6, "agninakSatra-ArambhaH"),
        2 => (13, "agninakSatra-samApanam"),
        _ => return Ok(()),
    };
    let next_sunset = series.day(d + 1)?.sunset;
    if series
        .angam_end_within(AngamKind::SolarNakshatraPada, pada, day.sunset, next_sunset)?
        .is_some()
    {
        registry.add(name, d + 1, diag);
    }
    Ok(())
}

/// Sun in hasta while the moon is in maghA on krishna trayodashi, or in
/// hasta on amAvAsyA. Marked on the civil day the yoga begins.
pub(super) fn gajachhaya_yoga(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let midnight = series.day(d)?.jd_midnight;
    let next_midnight = series.day(d + 1)?.jd_midnight;
    // Look back a day so yogas already running at midnight are not
    // mistaken for ones starting there.
    let from = series.day(d - 1)?.jd_midnight.max(series.day(0)?.sunrise);
    let combos = [
        [
            (AngamKind::SolarNakshatra, 13),
            (AngamKind::Nakshatra, 10),
            (AngamKind::Tithi, 28),
        ],
        [
            (AngamKind::SolarNakshatra, 13),
            (AngamKind::Nakshatra, 13),
            (AngamKind::Tithi, 30),
        ],
    ];
    for combo in &combos {
        let starts_today = series
            .joint_intervals(combo, from, next_midnight)?
            .iter()
            .any(|&(start, _)| start >= midnight && start < next_midnight);
        if starts_today {
            registry.add("gajacchAyA-yOgaH", d, diag);
            return Ok(());
        }
    }
    Ok(())
}

/// The sun crossing 90 and 270 degrees of tropical longitude. The
/// dakSiNAyana puNyakAla falls on the day of a crossing after sunset, or
/// the day before; the uttarAyaNa one on the day of a crossing before
/// sunset, or the day after.
pub(super) fn ayana_punyakala(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let day = series.day(d)?;
    for t in day.transitions(AngamKind::TropicalRashi) {
        let Some(end) = t.end else { continue };
        let after_sunset = end > day.sunset;
        match t.angam {
            3 => {
                let fday = if after_sunset { d } else { d - 1 };
                registry.add("dakSiNAyana-puNyakAlaH", fday, diag);
            }
            9 => {
                let fday = if after_sunset { d + 1 } else { d };
                registry.add("uttarAyaNa-puNyakAlaH/mitrOtsavaH", fday, diag);
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use utsava_base::GregorianDate;
    use utsava_series::synthetic::SeriesFixture;

    use super::*;
    use crate::special::{DayAssigner, run_assigner};

    fn fixture(days: i64) -> SeriesFixture {
        SeriesFixture::new(GregorianDate::new(2024, 4, 1).unwrap(), days)
    }

    fn days(series: &TimeSeries, f: DayAssigner, name: &str) -> Vec<DayOrdinal> {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        run_assigner(series, "test", f, &mut reg, &mut diag);
        reg.days_of(name).map(|d| d.iter().copied().collect()).unwrap_or_default()
    }

    #[test]
    fn agni_nakshatram_begins_after_crossing_sunset() {
        let mut f = fixture(20);
        let end = f.sunset(12) + 0.2;
        f.solar_month_all(1)
            .timeline(AngamKind::SolarNakshatraPada, &[(6, end), (7, f64::INFINITY)]);
        let s = f.build().unwrap();
        assert_eq!(days(&s, agni_nakshatram, "agninakSatra-ArambhaH"), [13]);
        assert!(days(&s, agni_nakshatram, "agninakSatra-samApanam").is_empty());
    }

    #[test]
    fn agni_nakshatram_end_ignored_early_in_month() {
        let mut f = fixture(20);
        let early = f.sunset(5) + 0.1;
        f.solar_month_all(2)
            .timeline(AngamKind::SolarNakshatraPada, &[(13, early), (14, f64::INFINITY)]);
        let s = f.build().unwrap();
        assert!(days(&s, agni_nakshatram, "agninakSatra-samApanam").is_empty());

        let mut f = fixture(20);
        let late = f.sunset(15) - 0.1;
        f.solar_month_all(2)
            .timeline(AngamKind::SolarNakshatraPada, &[(13, late), (14, f64::INFINITY)]);
        let s = f.build().unwrap();
        // Crossed between the sunsets of 14 and 15.
        assert_eq!(days(&s, agni_nakshatram, "agninakSatra-samApanam"), [15]);
    }

    #[test]
    fn gajachhaya_on_day_the_yoga_starts() {
        let mut f = fixture(5);
        let m3 = f.sunrise(3) - 0.25;
        f.sunrise_angams(AngamKind::SolarNakshatra, &[13], 0.5)
            .timeline(
                AngamKind::Tithi,
                &[(27, m3 + 0.1), (28, m3 + 0.9), (29, f64::INFINITY)],
            )
            .timeline(AngamKind::Nakshatra, &[(9, m3 + 0.5), (10, f64::INFINITY)]);
        let s = f.build().unwrap();
        assert_eq!(days(&s, gajachhaya_yoga, "gajacchAyA-yOgaH"), [3]);
    }

    #[test]
    fn gajachhaya_needs_sun_in_hasta() {
        let mut f = fixture(5);
        let m3 = f.sunrise(3) - 0.25;
        f.sunrise_angams(AngamKind::SolarNakshatra, &[12], 0.5)
            .timeline(
                AngamKind::Tithi,
                &[(29, m3 + 0.1), (30, m3 + 0.9), (1, f64::INFINITY)],
            )
            .timeline(AngamKind::Nakshatra, &[(12, m3 + 0.5), (13, f64::INFINITY)]);
        let s = f.build().unwrap();
        assert!(days(&s, gajachhaya_yoga, "gajacchAyA-yOgaH").is_empty());
    }

    #[test]
    fn dakshinayana_moves_back_for_daytime_crossing() {
        let mut f = fixture(5);
        let night = f.sunrise(2) + 0.6;
        f.timeline(AngamKind::TropicalRashi, &[(3, night), (4, f64::INFINITY)]);
        let s = f.build().unwrap();
        assert_eq!(days(&s, ayana_punyakala, "dakSiNAyana-puNyakAlaH"), [2]);

        let mut f = fixture(5);
        let day = f.sunrise(2) + 0.3;
        f.timeline(AngamKind::TropicalRashi, &[(3, day), (4, f64::INFINITY)]);
        let s = f.build().unwrap();
        assert_eq!(days(&s, ayana_punyakala, "dakSiNAyana-puNyakAlaH"), [1]);
    }

    #[test]
    fn uttarayana_moves_forward_for_night_crossing() {
        let mut f = fixture(5);
        let night = f.sunrise(2) + 0.6;
        f.timeline(AngamKind::TropicalRashi, &[(9, night), (10, f64::INFINITY)]);
        let s = f.build().unwrap();
        assert_eq!(
            days(&s, ayana_punyakala, "uttarAyaNa-puNyakAlaH/mitrOtsavaH"),
            [3]
        );
    }
}
