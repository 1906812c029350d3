//! Festival rule records.
//!
//! Every string-keyed field of a rule file is parsed once into a closed
//! enumeration here; resolution never compares strings.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use utsava_base::AngamKind;
use utsava_series::Kaala;

/// Calendar whose month number a rule names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthType {
    SolarMonth,
    LunarMonth,
    GregorianMonth,
}

impl MonthType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SolarMonth => "solar_month",
            Self::LunarMonth => "lunar_month",
            Self::GregorianMonth => "gregorian_month",
        }
    }
}

impl FromStr for MonthType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solar_month" => Ok(Self::SolarMonth),
            "lunar_month" => Ok(Self::LunarMonth),
            "gregorian_month" => Ok(Self::GregorianMonth),
            _ => Err(()),
        }
    }
}

impl fmt::Display for MonthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the rule's `angam_number` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleAngamType {
    Tithi,
    Nakshatra,
    Yoga,
    /// Day of the (solar or Gregorian) month.
    Day,
}

impl RuleAngamType {
    /// Angam kind sampled by this rule, `None` for day-of-month rules.
    pub const fn kind(self) -> Option<AngamKind> {
        match self {
            Self::Tithi => Some(AngamKind::Tithi),
            Self::Nakshatra => Some(AngamKind::Nakshatra),
            Self::Yoga => Some(AngamKind::Yoga),
            Self::Day => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tithi => "tithi",
            Self::Nakshatra => "nakshatram",
            Self::Yoga => "yoga",
            Self::Day => "day",
        }
    }
}

impl FromStr for RuleAngamType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tithi" => Ok(Self::Tithi),
            "nakshatram" | "nakshatra" => Ok(Self::Nakshatra),
            "yoga" => Ok(Self::Yoga),
            "day" => Ok(Self::Day),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RuleAngamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tie-break policy between two candidate days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    /// The earlier day whose window the angam touches.
    #[default]
    Puurvaviddha,
    /// The later day whose window the angam touches.
    Paraviddha,
    /// The day whose window the angam covers longest.
    Vyaapti,
}

impl Priority {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Puurvaviddha => "puurvaviddha",
            Self::Paraviddha => "paraviddha",
            Self::Vyaapti => "vyaapti",
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "puurvaviddha" => Ok(Self::Puurvaviddha),
            "paraviddha" => Ok(Self::Paraviddha),
            "vyaapti" => Ok(Self::Vyaapti),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Era in which a numbered festival's `year_start` is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Era {
    /// Kali yuga years: Gregorian year + 3100 at the solar/lunar new year.
    #[default]
    Kali,
    Gregorian,
}

impl Era {
    /// Offset added to a Gregorian year to reach this era.
    pub const fn offset(self) -> i64 {
        match self {
            Self::Kali => 3100,
            Self::Gregorian => 0,
        }
    }
}

impl FromStr for Era {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kali" => Ok(Self::Kali),
            "gregorian" => Ok(Self::Gregorian),
            _ => Err(()),
        }
    }
}

/// Year of the first occurrence of a numbered festival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearStart {
    pub year: i64,
    pub era: Era,
}

/// One validated festival rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FestivalRule {
    pub name: String,
    pub month_type: MonthType,
    /// 0 matches every month.
    pub month_number: u8,
    pub angam_type: RuleAngamType,
    pub angam_number: u8,
    pub kaala: Kaala,
    pub priority: Priority,
    pub year_start: Option<YearStart>,
    /// Empty when the rule carries no tags.
    pub tags: BTreeSet<String>,
}

impl FestivalRule {
    /// A sunrise, puurvaviddha, untagged rule; adjust fields as needed.
    pub fn new(
        name: impl Into<String>,
        month_type: MonthType,
        month_number: u8,
        angam_type: RuleAngamType,
        angam_number: u8,
    ) -> Self {
        Self {
            name: name.into(),
            month_type,
            month_number,
            angam_type,
            angam_number,
            kaala: Kaala::Sunrise,
            priority: Priority::Puurvaviddha,
            year_start: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_kaala(mut self, kaala: Kaala) -> Self {
        self.kaala = kaala;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_year_start(mut self, year: i64, era: Era) -> Self {
        self.year_start = Some(YearStart { year, era });
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the month filter is the "every month" wildcard.
    pub fn every_month(&self) -> bool {
        self.month_number == 0
    }
}

/// A festival placed a fixed number of days from an anchor festival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeRule {
    pub name: String,
    /// Key (or unique key prefix) of the anchor festival.
    pub anchor: String,
    pub offset: i64,
    pub tags: BTreeSet<String>,
}

/// Split a comma-separated tag list.
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for p in [Priority::Puurvaviddha, Priority::Paraviddha, Priority::Vyaapti] {
            assert_eq!(p.name().parse::<Priority>(), Ok(p));
        }
        for m in [MonthType::SolarMonth, MonthType::LunarMonth, MonthType::GregorianMonth] {
            assert_eq!(m.name().parse::<MonthType>(), Ok(m));
        }
    }

    #[test]
    fn nakshatra_accepts_both_spellings() {
        assert_eq!("nakshatram".parse(), Ok(RuleAngamType::Nakshatra));
        assert_eq!("nakshatra".parse(), Ok(RuleAngamType::Nakshatra));
        assert!("karanam".parse::<RuleAngamType>().is_err());
    }

    #[test]
    fn tags_are_trimmed() {
        let tags = parse_tags("CommonFestivals, MonthlyVratam,,");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("MonthlyVratam"));
    }

    #[test]
    fn era_offsets() {
        assert_eq!(Era::Kali.offset(), 3100);
        assert_eq!(Era::Gregorian.offset(), 0);
    }

    #[test]
    fn builder_defaults() {
        let r = FestivalRule::new("x", MonthType::LunarMonth, 0, RuleAngamType::Tithi, 11);
        assert_eq!(r.kaala, Kaala::Sunrise);
        assert_eq!(r.priority, Priority::Puurvaviddha);
        assert!(r.every_month());
    }
}
