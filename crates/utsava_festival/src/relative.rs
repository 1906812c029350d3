//! Festivals placed relative to other festivals.

use std::collections::BTreeSet;

use utsava_series::{DayOrdinal, TimeSeries};

use crate::diagnostics::{Anomaly, Diagnostics};
use crate::instance::FestivalInstance;
use crate::options::WeekdayAnchoredRule;
use crate::registry::FestivalRegistry;
use crate::rule::RelativeRule;

/// Days of `anchor`: the exact key if present, else the single key that
/// starts with it (numbered festivals are usually anchored by base name).
///
/// Records a missing or ambiguous anchor on behalf of `festival`.
pub fn anchor_days(
    registry: &FestivalRegistry,
    festival: &str,
    anchor: &str,
    diag: &mut Diagnostics,
) -> Option<BTreeSet<DayOrdinal>> {
    if let Some(days) = registry.days(&FestivalInstance::new(anchor)) {
        return Some(days.clone());
    }
    match registry.keys_with_prefix(anchor).as_slice() {
        [] => {
            diag.record(Anomaly::AnchorMissing {
                festival: festival.to_string(),
                anchor: anchor.to_string(),
            });
            None
        }
        [key] => registry.days(key).cloned(),
        keys => {
            let candidates = keys.iter().map(|k| k.to_string()).collect();
            diag.record(Anomaly::AnchorAmbiguous {
                festival: festival.to_string(),
                anchor: anchor.to_string(),
                candidates,
            });
            None
        }
    }
}

/// The last day on or before `d` falling on `weekday`.
pub fn weekday_on_or_before(series: &TimeSeries, d: DayOrdinal, weekday: u8) -> DayOrdinal {
    let wd = (i64::from(series.weekday_start()) + d - 1).rem_euclid(7);
    d - (wd - i64::from(weekday)).rem_euclid(7)
}

/// Place each weekday-anchored festival before every day of its anchor.
pub fn assign_weekday_anchored(
    series: &TimeSeries,
    rules: &[WeekdayAnchoredRule],
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) {
    for rule in rules {
        if let Some(days) = anchor_days(registry, &rule.name, &rule.anchor, diag) {
            let placed: Vec<DayOrdinal> = days
                .iter()
                .map(|&d| weekday_on_or_before(series, d, rule.weekday))
                .collect();
            registry.set(rule.name.as_str(), placed);
        }
    }
}

/// Apply relative rules in order; a rule may anchor on an earlier one.
pub fn assign_relative_festivals(
    rules: &[RelativeRule],
    registry: &mut FestivalRegistry,
    diag: &mut Diagnostics,
) {
    for rule in rules {
        if let Some(days) = anchor_days(registry, &rule.name, &rule.anchor, diag) {
            registry.set(rule.name.as_str(), days.iter().map(|d| d + rule.offset));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;
    use utsava_base::GregorianDate;
    use utsava_series::synthetic::SeriesFixture;

    use super::*;

    fn relative(name: &str, anchor: &str, offset: i64) -> RelativeRule {
        RelativeRule {
            name: name.to_string(),
            anchor: anchor.to_string(),
            offset,
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn varalakshmi_is_friday_on_or_before() {
        // 2024-08-01 is a Thursday.
        let series = SeriesFixture::new(GregorianDate::new(2024, 8, 1).unwrap(), 30)
            .build()
            .unwrap();
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        // Ordinal 19 is Monday 2024-08-19; ordinal 16 is Friday 2024-08-16.
        reg.insert("yajurvEda-upAkarma", 19);
        let rule = WeekdayAnchoredRule {
            name: "varalakSmI-vratam".to_string(),
            anchor: "yajurvEda-upAkarma".to_string(),
            weekday: 5,
        };
        assign_weekday_anchored(&series, &[rule], &mut reg, &mut diag);
        assert!(reg.has(&"varalakSmI-vratam".into(), 16));
        assert_eq!(weekday_on_or_before(&series, 16, 5), 16);
        assert!(diag.is_empty());
    }

    #[test]
    fn anchors_by_unique_prefix() {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.insert(FestivalInstance::numbered("zaGkara-jayantI", 1236), 40);
        assign_relative_festivals(&[relative("after", "zaGkara-jayantI", 2)], &mut reg, &mut diag);
        assert!(reg.has(&"after".into(), 42));
    }

    #[test]
    fn missing_and_ambiguous_anchors_are_skipped() {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.insert("rAma-navamI", 10);
        reg.insert("rAma-navamI-vratam", 10);
        let rules = [relative("a", "rAma", 1), relative("b", "kRSNa", 1)];
        assign_relative_festivals(&rules, &mut reg, &mut diag);
        assert!(!reg.contains(&"a".into()));
        assert!(!reg.contains(&"b".into()));
        assert!(matches!(diag.entries()[0], Anomaly::AnchorAmbiguous { .. }));
        assert!(matches!(diag.entries()[1], Anomaly::AnchorMissing { .. }));
    }

    #[test]
    fn exact_key_beats_prefix() {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.insert("rAma-navamI", 10);
        reg.insert("rAma-navamI-vratam", 11);
        assign_relative_festivals(&[relative("x", "rAma-navamI", -1)], &mut reg, &mut diag);
        assert!(reg.has(&"x".into(), 9));
        assert!(diag.is_empty());
    }

    proptest! {
        #[test]
        fn offset_law(
            days in proptest::collection::btree_set(1i64..400, 1..8),
            offset in -30i64..30,
        ) {
            let mut reg = FestivalRegistry::new();
            let mut diag = Diagnostics::new();
            reg.set("anchor", days.iter().copied());
            assign_relative_festivals(&[relative("moved", "anchor", offset)], &mut reg, &mut diag);
            let expected: BTreeSet<i64> = days.iter().map(|d| d + offset).collect();
            prop_assert_eq!(reg.days_of("moved"), Some(&expected));
        }
    }
}
