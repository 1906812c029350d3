//! Festivals fixed to a day of a solar month.

use utsava_base::AngamKind;
use utsava_series::{DayOrdinal, SeriesError, TimeSeries};

use super::arunodaya_angam;
use crate::diagnostics::Diagnostics;
use crate::names::samvatsara_name;
use crate::registry::FestivalRegistry;

pub(super) fn month_day_festivals(
    series: &TimeSeries,
    d: DayOrdinal,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let day = series.day(d)?;

    if day.solar_month == 12 && day.solar_month_day == 1 {
        // Kumbha still running at arunodaya: the nombu is kept the night
        // before.
        let fday = if arunodaya_angam(series, d, AngamKind::SolarRashi)? == 12 { d - 1 } else { d };
        registry.set("ta:kAraDaiyAn2 nOn2bu", [fday]);
    }

    if day.solar_month == 9 && day.solar_month_day <= 7 && day.weekday == 3 {
        registry.set("kucEla-dinam", [d]);
    }

    if day.solar_month == 1 && series.day(d - 1)?.solar_month == 12 {
        let year = samvatsara_name(day.date.year);
        registry.add(format!("mESa-saGkrAntiH~({year}-saMvatsaraH)"), d, diag);
        registry.add("paJcAGga-paThanam", d, diag);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use utsava_base::GregorianDate;
    use utsava_series::synthetic::SeriesFixture;

    use super::*;
    use crate::special::run_assigner;

    fn run(series: &TimeSeries) -> FestivalRegistry {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        run_assigner(series, "test", month_day_festivals, &mut reg, &mut diag);
        reg
    }

    fn days(reg: &FestivalRegistry, name: &str) -> Vec<DayOrdinal> {
        reg.days_of(name).map(|d| d.iter().copied().collect()).unwrap_or_default()
    }

    #[test]
    fn mesha_sankranti_names_the_samvatsara() {
        let mut f = SeriesFixture::new(GregorianDate::new(2024, 4, 10).unwrap(), 6);
        f.solar_months(&[12, 12, 12, 12, 1, 1, 1, 1, 1, 1]);
        let reg = run(&f.build().unwrap());
        assert_eq!(days(&reg, "mESa-saGkrAntiH~(krOdhin-saMvatsaraH)"), [4]);
        assert_eq!(days(&reg, "paJcAGga-paThanam"), [4]);
    }

    #[test]
    fn karadaiyan_nombu_moves_to_previous_night() {
        let mut f = SeriesFixture::new(GregorianDate::new(2024, 3, 10).unwrap(), 6);
        let sankranti = f.sunrise(3) - 0.01;
        f.solar_months(&[11, 11, 11, 12, 12, 12, 12, 12, 12, 12])
            .solar_month_days(&[28, 29, 30, 1, 2, 3, 4, 5, 6, 7])
            .timeline(AngamKind::SolarRashi, &[(11, sankranti), (12, f64::INFINITY)]);
        let reg = run(&f.build().unwrap());
        assert_eq!(days(&reg, "ta:kAraDaiyAn2 nOn2bu"), [3]);

        let sankranti = f.sunrise(3) - 0.2;
        f.timeline(AngamKind::SolarRashi, &[(11, sankranti), (12, f64::INFINITY)]);
        let reg = run(&f.build().unwrap());
        assert_eq!(days(&reg, "ta:kAraDaiyAn2 nOn2bu"), [2]);
    }

    #[test]
    fn kuchela_dinam_first_wednesday() {
        let mut f = SeriesFixture::new(GregorianDate::new(2024, 12, 16).unwrap(), 10);
        f.solar_month_all(9)
            .solar_month_days(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]);
        let reg = run(&f.build().unwrap());
        // 2024-12-18 is a Wednesday.
        assert_eq!(days(&reg, "kucEla-dinam"), [3]);
    }
}
