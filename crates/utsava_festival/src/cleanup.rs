//! Whole-registry passes that rename or drop festivals after the rules
//! have run.

use tracing::debug;
use utsava_base::AngamKind;
use utsava_series::{DayOrdinal, Kaala, LunarMonth, SeriesError, TimeSeries, kaala_angams};

use crate::diagnostics::{Anomaly, Diagnostics};
use crate::instance::FestivalInstance;
use crate::names::{lunar_month_name, nakshatra_name};
use crate::options::ExclusivePair;
use crate::registry::FestivalRegistry;

const VYATIPATA_SHRADDHAM: &str = "vyatIpAta-zrAddham";
const AMAVASYA: &str = "amAvAsyA";

/// Nakshatras that make an amavasya alabhya.
const ALABHYA_STARS: [u8; 9] = [15, 16, 17, 6, 7, 8, 23, 24, 25];

/// Weekdays that make an amavasya puSkalA.
const PUSHKALA_WEEKDAYS: [u8; 3] = [1, 2, 4];

/// Move the vyatIpAta zrAddham of solar months 9 and 6 to their mahA
/// variants.
pub fn vishesha_vyatipata(
    series: &TimeSeries,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let key = FestivalInstance::new(VYATIPATA_SHRADDHAM);
    let Some(days) = registry.days(&key).cloned() else {
        return Ok(());
    };
    for d in days {
        let name = match series.day(d)?.solar_month {
            9 => "mahAdhanurvyatIpAta-zrAddham",
            6 => "mahAvyatIpAta-zrAddham",
            _ => continue,
        };
        registry.remove_day(&key, d);
        registry.add(name, d, diag);
    }
    Ok(())
}

/// Name of the amavasya on day `d`: month prefix plus an alabhya /
/// puSkalA suffix.
pub fn amavasya_name(series: &TimeSeries, d: DayOrdinal) -> Result<String, SeriesError> {
    let day = series.day(d)?;
    let masa = lunar_month_name(day.lunar_month);
    let prefix = if day.lunar_month == LunarMonth::Nija(6) {
        format!("({masa}) mahAlaya ")
    } else if day.solar_month == 4 {
        format!("{masa} (kaTaka) ")
    } else if day.solar_month == 10 {
        format!("mauni ({masa}/makara) ")
    } else {
        format!("{masa}-")
    };

    let [s0, s1, ..] = kaala_angams(series, d, AngamKind::Nakshatra, Kaala::Aparaahna)?;
    let magha = day.lunar_month == LunarMonth::Nija(10);
    let star = if magha && (s0 == 23 || s1 == 23) {
        Some(23)
    } else if magha && (s0 == 24 || s1 == 24) {
        Some(24)
    } else if ALABHYA_STARS.contains(&s0) {
        Some(s0)
    } else if ALABHYA_STARS.contains(&s1) {
        Some(s1)
    } else {
        None
    };
    let pushkala = PUSHKALA_WEEKDAYS.contains(&day.weekday);
    let suffix = match (star, pushkala) {
        (Some(n), false) => format!(" (alabhyam–{})", nakshatra_name(n)),
        (Some(n), true) => format!(" (alabhyam–{}, puSkalA)", nakshatra_name(n)),
        (None, true) => " (alabhyam–puSkalA)".to_string(),
        (None, false) => String::new(),
    };
    Ok(format!("{prefix}{AMAVASYA}{suffix}"))
}

/// Replace the plain amAvAsyA with its per-day names.
pub fn name_amavasya(
    series: &TimeSeries,
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) -> Result<(), SeriesError> {
    let Some(days) = registry.remove(&FestivalInstance::new(AMAVASYA)) else {
        diag.record(Anomaly::PrerequisiteMissing {
            festival: AMAVASYA.to_string(),
            needed_by: "amAvAsyA naming",
        });
        return Ok(());
    };
    for d in days {
        let name = amavasya_name(series, d)?;
        debug!(day = d, %name, "amAvAsyA");
        registry.add(name, d, diag);
    }
    Ok(())
}

/// Drop each variant whose days differ from its primary's.
pub fn remove_exclusive_variants(
    pairs: &[ExclusivePair],
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) {
    for pair in pairs {
        let primary = FestivalInstance::new(pair.primary.as_str());
        let Some(primary_days) = registry.days(&primary).cloned() else {
            diag.record(Anomaly::PrerequisiteMissing {
                festival: pair.primary.clone(),
                needed_by: "exclusive-variant cleanup",
            });
            continue;
        };
        let variant = FestivalInstance::new(pair.variant.as_str());
        match registry.days(&variant) {
            Some(variant_days) if *variant_days != primary_days => {
                let variant_days = variant_days.clone();
                registry.remove(&variant);
                diag.record(Anomaly::ExclusiveVariantRemoved {
                    primary: pair.primary.clone(),
                    variant: pair.variant.clone(),
                    primary_days,
                    variant_days,
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use utsava_base::GregorianDate;
    use utsava_series::synthetic::SeriesFixture;

    use super::*;

    fn pair() -> ExclusivePair {
        ExclusivePair {
            primary: "tripurOtsavaH".to_string(),
            variant: "mahA~kArttikI".to_string(),
        }
    }

    #[test]
    fn variant_kept_only_on_coincidence() {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.insert("tripurOtsavaH", 10);
        reg.insert("mahA~kArttikI", 10);
        remove_exclusive_variants(&[pair()], &mut reg, &mut diag);
        assert!(reg.has(&"mahA~kArttikI".into(), 10));

        reg.set("mahA~kArttikI", [11]);
        remove_exclusive_variants(&[pair()], &mut reg, &mut diag);
        assert!(!reg.contains(&"mahA~kArttikI".into()));
        assert!(reg.has(&"tripurOtsavaH".into(), 10));
        assert!(matches!(diag.entries(), [Anomaly::ExclusiveVariantRemoved { .. }]));
    }

    #[test]
    fn missing_primary_is_reported() {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        remove_exclusive_variants(&[pair()], &mut reg, &mut diag);
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn vyatipata_in_dhanus_becomes_maha() {
        let mut f = SeriesFixture::new(GregorianDate::new(2024, 12, 20).unwrap(), 5);
        f.solar_months(&[9, 9, 9, 9, 10, 10, 10, 10, 10]);
        let series = f.build().unwrap();
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.insert(VYATIPATA_SHRADDHAM, 2);
        reg.insert(VYATIPATA_SHRADDHAM, 5);
        vishesha_vyatipata(&series, &mut reg, &mut diag).unwrap();
        assert!(reg.has(&"mahAdhanurvyatIpAta-zrAddham".into(), 2));
        assert!(reg.has(&VYATIPATA_SHRADDHAM.into(), 5));
        assert!(!reg.has(&VYATIPATA_SHRADDHAM.into(), 2));
    }

    #[test]
    fn amavasya_names() {
        // Ordinal 1 is Monday 2024-01-01; ordinal 6 is Saturday.
        let mut f = SeriesFixture::new(GregorianDate::new(2024, 1, 1).unwrap(), 7);
        f.lunar_month_all(LunarMonth::Nija(10))
            .solar_month_all(10)
            .timeline(AngamKind::Nakshatra, &[(23, f64::INFINITY)]);
        let series = f.build().unwrap();
        assert_eq!(
            amavasya_name(&series, 6).unwrap(),
            "mauni (mAgha/makara) amAvAsyA (alabhyam–zraviSThA)"
        );
        assert_eq!(
            amavasya_name(&series, 1).unwrap(),
            "mauni (mAgha/makara) amAvAsyA (alabhyam–zraviSThA, puSkalA)"
        );

        let mut f = SeriesFixture::new(GregorianDate::new(2024, 1, 1).unwrap(), 7);
        f.lunar_month_all(LunarMonth::Nija(6)).solar_month_all(5);
        let series = f.build().unwrap();
        assert_eq!(amavasya_name(&series, 6).unwrap(), "(bhAdrapada) mahAlaya amAvAsyA");
    }

    #[test]
    fn naming_replaces_plain_amavasya() {
        let series = SeriesFixture::new(GregorianDate::new(2024, 1, 1).unwrap(), 7)
            .build()
            .unwrap();
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.insert(AMAVASYA, 3);
        name_amavasya(&series, &mut reg, &mut diag).unwrap();
        assert!(!reg.contains(&AMAVASYA.into()));
        // Wednesday in caitra, no alabhya star at aparaahna.
        assert!(reg.has(&"caitra-amAvAsyA".into(), 3));

        name_amavasya(&series, &mut reg, &mut diag).unwrap();
        assert!(matches!(diag.entries(), [Anomaly::PrerequisiteMissing { .. }]));
    }
}
