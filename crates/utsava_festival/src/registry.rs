//! Festival registry: festival key to assigned day ordinals.

use std::collections::{BTreeMap, BTreeSet};

use utsava_series::DayOrdinal;

use crate::diagnostics::{Anomaly, Diagnostics};
use crate::instance::FestivalInstance;

/// Assigned days per festival, mutated only through the operations below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FestivalRegistry {
    days: BTreeMap<FestivalInstance, BTreeSet<DayOrdinal>>,
}

impl FestivalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `day` to `festival`, dropping `day - 1` if it is recorded.
    ///
    /// No festival falls on two consecutive days, so a hit on the previous
    /// day means the same rule fired twice; the later day is kept and the
    /// removal recorded.
    pub fn add(
        &mut self,
        festival: impl Into<FestivalInstance>,
        day: DayOrdinal,
        diag: &mut Diagnostics,
    ) {
        let festival = festival.into();
        let days = self.days.entry(festival.clone()).or_default();
        if days.contains(&day) {
            return;
        }
        if days.remove(&(day - 1)) {
            diag.record(Anomaly::ConsecutiveDays {
                festival,
                removed: day - 1,
                kept: day,
            });
        }
        days.insert(day);
    }

    /// Add `day` without the consecutive-day check.
    pub fn insert(&mut self, festival: impl Into<FestivalInstance>, day: DayOrdinal) {
        self.days.entry(festival.into()).or_default().insert(day);
    }

    /// Replace all days of `festival`.
    pub fn set(
        &mut self,
        festival: impl Into<FestivalInstance>,
        days: impl IntoIterator<Item = DayOrdinal>,
    ) {
        self.days.insert(festival.into(), days.into_iter().collect());
    }

    /// Remove one day; drops the festival when no day is left.
    pub fn remove_day(&mut self, festival: &FestivalInstance, day: DayOrdinal) -> bool {
        let Some(days) = self.days.get_mut(festival) else {
            return false;
        };
        let removed = days.remove(&day);
        if days.is_empty() {
            self.days.remove(festival);
        }
        removed
    }

    /// Remove a festival, returning its days.
    pub fn remove(&mut self, festival: &FestivalInstance) -> Option<BTreeSet<DayOrdinal>> {
        self.days.remove(festival)
    }

    pub fn days(&self, festival: &FestivalInstance) -> Option<&BTreeSet<DayOrdinal>> {
        self.days.get(festival)
    }

    /// Days of the unnumbered festival `name`.
    pub fn days_of(&self, name: &str) -> Option<&BTreeSet<DayOrdinal>> {
        self.days.get(&FestivalInstance::new(name))
    }

    pub fn contains(&self, festival: &FestivalInstance) -> bool {
        self.days.contains_key(festival)
    }

    /// Whether `festival` is recorded on `day`.
    pub fn has(&self, festival: &FestivalInstance, day: DayOrdinal) -> bool {
        self.days.get(festival).is_some_and(|d| d.contains(&day))
    }

    /// Keys whose display form starts with `prefix`.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<&FestivalInstance> {
        self.days
            .keys()
            .filter(|k| k.display_starts_with(prefix))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FestivalInstance, &BTreeSet<DayOrdinal>)> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Inverse mapping: day to the festivals recorded on it.
    pub fn by_day(&self) -> BTreeMap<DayOrdinal, BTreeSet<&FestivalInstance>> {
        let mut out: BTreeMap<DayOrdinal, BTreeSet<&FestivalInstance>> = BTreeMap::new();
        for (festival, days) in &self.days {
            for d in days {
                out.entry(*d).or_default().insert(festival);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_day_keeps_later() {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.add("X", 100, &mut diag);
        reg.add("X", 101, &mut diag);
        assert_eq!(reg.days_of("X").unwrap().iter().copied().collect::<Vec<_>>(), [101]);
        assert_eq!(
            diag.entries(),
            [Anomaly::ConsecutiveDays {
                festival: FestivalInstance::new("X"),
                removed: 100,
                kept: 101
            }]
        );
    }

    #[test]
    fn re_adding_same_day_is_silent() {
        let mut reg = FestivalRegistry::new();
        let mut diag = Diagnostics::new();
        reg.add("X", 5, &mut diag);
        reg.add("X", 6, &mut diag);
        reg.add("X", 6, &mut diag);
        assert_eq!(diag.len(), 1);
        assert!(reg.has(&"X".into(), 6));
        assert!(!reg.has(&"X".into(), 5));
    }

    #[test]
    fn insert_skips_guard() {
        let mut reg = FestivalRegistry::new();
        reg.insert("candra-darzanam", 3);
        reg.insert("candra-darzanam", 4);
        assert_eq!(reg.days_of("candra-darzanam").unwrap().len(), 2);
    }

    #[test]
    fn remove_last_day_drops_key() {
        let mut reg = FestivalRegistry::new();
        reg.insert("a", 1);
        assert!(reg.remove_day(&"a".into(), 1));
        assert!(reg.is_empty());
        assert!(!reg.remove_day(&"a".into(), 1));
    }

    #[test]
    fn inverse_mapping() {
        let mut reg = FestivalRegistry::new();
        reg.set("a", [1, 3]);
        reg.insert("b", 3);
        reg.insert(FestivalInstance::numbered("c", 2), 1);
        let by_day = reg.by_day();
        assert_eq!(by_day[&3].len(), 2);
        assert_eq!(by_day[&1].len(), 2);
        assert_eq!(reg.keys_with_prefix("c#").len(), 1);
    }
}
