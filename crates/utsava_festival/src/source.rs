//! JSON rule files.
//!
//! A festival rule file is an object mapping festival names to rule
//! fields, kept in file order. Entries without a `month_type` but with a
//! `description_short` describe festivals computed elsewhere and only
//! contribute tags. Invalid entries are collected as [`RuleError`]s and
//! the remaining rules are still returned.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use utsava_series::Kaala;

use crate::error::RuleError;
use crate::rule::{
    Era, FestivalRule, MonthType, Priority, RelativeRule, RuleAngamType, YearStart, parse_tags,
};

#[derive(Debug, Default, Deserialize)]
struct RawRule {
    month_type: Option<String>,
    month_number: Option<i64>,
    angam_type: Option<String>,
    angam_number: Option<i64>,
    kaala: Option<String>,
    priority: Option<String>,
    year_start: Option<i64>,
    year_start_era: Option<String>,
    tags: Option<String>,
    description_short: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRelative {
    anchor_festival_id: Option<String>,
    offset: Option<Value>,
    tags: Option<String>,
}

enum Entry {
    Rule(FestivalRule),
    Described(BTreeSet<String>),
}

fn missing(festival: &str, field: &'static str) -> RuleError {
    RuleError::MissingField {
        festival: festival.to_string(),
        field,
    }
}

fn unknown(festival: &str, field: &'static str, value: impl ToString) -> RuleError {
    RuleError::UnknownValue {
        festival: festival.to_string(),
        field,
        value: value.to_string(),
    }
}

fn unsupported(festival: &str, reason: &'static str) -> RuleError {
    RuleError::Unsupported {
        festival: festival.to_string(),
        reason,
    }
}

fn parse_field<T: std::str::FromStr>(
    festival: &str,
    field: &'static str,
    raw: &str,
) -> Result<T, RuleError> {
    raw.parse().map_err(|_| unknown(festival, field, raw))
}

fn validate(name: &str, raw: RawRule) -> Result<Entry, RuleError> {
    let tags = raw.tags.as_deref().map(parse_tags).unwrap_or_default();
    let Some(month_type) = raw.month_type.as_deref() else {
        return match raw.description_short {
            Some(_) => Ok(Entry::Described(tags)),
            None => Err(missing(name, "month_type")),
        };
    };
    let month_type: MonthType = parse_field(name, "month_type", month_type)?;

    let month_number = raw.month_number.ok_or_else(|| missing(name, "month_number"))?;
    let month_number = u8::try_from(month_number)
        .ok()
        .filter(|m| *m <= 12)
        .ok_or_else(|| unknown(name, "month_number", month_number))?;

    let angam_type: RuleAngamType = parse_field(
        name,
        "angam_type",
        raw.angam_type.as_deref().ok_or_else(|| missing(name, "angam_type"))?,
    )?;

    let angam_number = raw.angam_number.ok_or_else(|| missing(name, "angam_number"))?;
    let max = match (angam_type.kind(), month_type) {
        (Some(kind), _) => i64::from(kind.count()),
        (None, MonthType::GregorianMonth) => 31,
        (None, _) => 32,
    };
    let angam_number = u8::try_from(angam_number)
        .ok()
        .filter(|n| (1..=max).contains(&i64::from(*n)))
        .ok_or_else(|| unknown(name, "angam_number", angam_number))?;

    let kaala: Kaala = match raw.kaala.as_deref() {
        Some(k) => parse_field(name, "kaala", k)?,
        None => Kaala::Sunrise,
    };
    let priority: Priority = match raw.priority.as_deref() {
        Some(p) => parse_field(name, "priority", p)?,
        None => Priority::default(),
    };

    match (month_type, angam_type) {
        (MonthType::LunarMonth, RuleAngamType::Day) => {
            return Err(unsupported(name, "day-of-month rules need a solar or Gregorian month"));
        }
        (MonthType::GregorianMonth, t) if t != RuleAngamType::Day => {
            return Err(unsupported(name, "Gregorian-month rules must use angam_type 'day'"));
        }
        (_, RuleAngamType::Day) if month_number == 0 => {
            return Err(unsupported(name, "day-of-month rules need a month number"));
        }
        _ => {}
    }
    if priority == Priority::Vyaapti && kaala != Kaala::Aparaahna {
        return Err(unsupported(name, "vyaapti is defined for the aparaahna kaala only"));
    }

    let era: Era = match raw.year_start_era.as_deref() {
        Some(e) => parse_field(name, "year_start_era", e)?,
        None => Era::default(),
    };
    let year_start = raw.year_start.map(|year| YearStart { year, era });

    Ok(Entry::Rule(FestivalRule {
        name: name.to_string(),
        month_type,
        month_number,
        angam_type,
        angam_number,
        kaala,
        priority,
        year_start,
        tags,
    }))
}

fn validate_relative(name: &str, raw: RawRelative) -> Result<RelativeRule, RuleError> {
    let anchor = raw
        .anchor_festival_id
        .ok_or_else(|| missing(name, "anchor_festival_id"))?;
    let offset = match raw.offset {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| unknown(name, "offset", &n))?,
        Some(Value::String(s)) => s.trim().parse().map_err(|_| unknown(name, "offset", &s))?,
        Some(other) => return Err(unknown(name, "offset", other)),
        None => return Err(missing(name, "offset")),
    };
    Ok(RelativeRule {
        name: name.to_string(),
        anchor,
        offset,
        tags: raw.tags.as_deref().map(parse_tags).unwrap_or_default(),
    })
}

fn entries(json: &str) -> Result<Map<String, Value>, RuleError> {
    Ok(serde_json::from_str(json)?)
}

fn decode<T: for<'de> Deserialize<'de>>(name: &str, value: Value) -> Result<T, RuleError> {
    serde_json::from_value(value).map_err(|e| RuleError::Malformed {
        festival: name.to_string(),
        message: e.to_string(),
    })
}

/// All rules of one computation plus the tag of every known festival.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleBook {
    rules: Vec<FestivalRule>,
    relative: Vec<RelativeRule>,
    tags: BTreeMap<String, BTreeSet<String>>,
    rejected: Vec<RuleError>,
}

impl RuleBook {
    /// Book from already validated rules.
    pub fn from_rules(rules: Vec<FestivalRule>) -> Self {
        let mut book = Self::default();
        for rule in rules {
            book.push_rule(rule);
        }
        book
    }

    /// Parse a festival rule file. Fails only if the file is not a JSON
    /// object; bad entries end up in [`RuleBook::rejected`].
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let mut book = Self::default();
        book.extend_json(json)?;
        Ok(book)
    }

    /// Add the entries of another festival rule file.
    pub fn extend_json(&mut self, json: &str) -> Result<(), RuleError> {
        for (name, value) in entries(json)? {
            match decode::<RawRule>(&name, value).and_then(|raw| validate(&name, raw)) {
                Ok(Entry::Rule(rule)) => self.push_rule(rule),
                Ok(Entry::Described(tags)) => {
                    debug!(festival = %name, "description-only entry");
                    self.tags.insert(name, tags);
                }
                Err(e) => self.rejected.push(e),
            }
        }
        Ok(())
    }

    /// Add the entries of a relative rule file.
    pub fn extend_relative_json(&mut self, json: &str) -> Result<(), RuleError> {
        for (name, value) in entries(json)? {
            match decode::<RawRelative>(&name, value).and_then(|raw| validate_relative(&name, raw))
            {
                Ok(rule) => self.push_relative(rule),
                Err(e) => self.rejected.push(e),
            }
        }
        Ok(())
    }

    pub fn push_rule(&mut self, rule: FestivalRule) {
        self.tags.insert(rule.name.clone(), rule.tags.clone());
        self.rules.push(rule);
    }

    pub fn push_relative(&mut self, rule: RelativeRule) {
        self.tags.insert(rule.name.clone(), rule.tags.clone());
        self.relative.push(rule);
    }

    pub fn rules(&self) -> &[FestivalRule] {
        &self.rules
    }

    pub fn relative(&self) -> &[RelativeRule] {
        &self.relative
    }

    /// Entries that failed validation, in file order.
    pub fn rejected(&self) -> &[RuleError] {
        &self.rejected
    }

    /// Rule for `name`, if one was loaded.
    pub fn rule(&self, name: &str) -> Option<&FestivalRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Tags of any festival named in a rule file.
    pub fn tags(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.tags.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = r#"{
        "EkAdazI-test": {
            "month_type": "lunar_month", "month_number": 0,
            "angam_type": "tithi", "angam_number": 11,
            "kaala": "sunrise", "priority": "puurvaviddha",
            "tags": "MonthlyVratam"
        },
        "zrAddha-test": {
            "month_type": "solar_month", "month_number": 6,
            "angam_type": "tithi", "angam_number": 30,
            "kaala": "aparaahna", "priority": "vyaapti"
        },
        "no-angam": { "month_type": "solar_month", "month_number": 1, "angam_number": 3 },
        "bad-kaala": {
            "month_type": "solar_month", "month_number": 1,
            "angam_type": "tithi", "angam_number": 3, "kaala": "dusk"
        },
        "described": { "description_short": "computed elsewhere", "tags": "RareDays" },
        "bad-vyaapti": {
            "month_type": "lunar_month", "month_number": 2,
            "angam_type": "tithi", "angam_number": 3,
            "kaala": "madhyaahna", "priority": "vyaapti"
        }
    }"#;

    #[test]
    fn good_rules_survive_bad_ones() {
        let book = RuleBook::from_json(RULES).unwrap();
        let names: Vec<_> = book.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["EkAdazI-test", "zrAddha-test"]);
        assert_eq!(book.rejected().len(), 3);
        assert_eq!(
            book.rejected()[0],
            RuleError::MissingField {
                festival: "no-angam".into(),
                field: "angam_type"
            }
        );
        assert!(matches!(
            &book.rejected()[1],
            RuleError::UnknownValue { field: "kaala", value, .. } if value == "dusk"
        ));
        assert_eq!(book.rejected()[2].festival(), Some("bad-vyaapti"));
    }

    #[test]
    fn defaults_and_tags() {
        let book = RuleBook::from_json(RULES).unwrap();
        let r = book.rule("zrAddha-test").unwrap();
        assert_eq!(r.kaala, Kaala::Aparaahna);
        assert_eq!(r.priority, Priority::Vyaapti);
        assert!(r.tags.is_empty());
        assert!(book.tags("described").unwrap().contains("RareDays"));
        assert!(book.rule("described").is_none());
    }

    #[test]
    fn out_of_range_numbers_rejected() {
        let json = r#"{
            "a": {"month_type": "lunar_month", "month_number": 13, "angam_type": "tithi", "angam_number": 1},
            "b": {"month_type": "lunar_month", "month_number": 1, "angam_type": "nakshatram", "angam_number": 28},
            "c": {"month_type": "lunar_month", "month_number": 1, "angam_type": "day", "angam_number": 2}
        }"#;
        let book = RuleBook::from_json(json).unwrap();
        assert!(book.rules().is_empty());
        assert_eq!(book.rejected().len(), 3);
        assert!(matches!(book.rejected()[2], RuleError::Unsupported { .. }));
    }

    #[test]
    fn relative_offsets_accept_strings() {
        let json = r#"{
            "x": {"anchor_festival_id": "y", "offset": "-3", "tags": "CommonFestivals"},
            "z": {"anchor_festival_id": "y", "offset": 2},
            "w": {"offset": 2}
        }"#;
        let mut book = RuleBook::default();
        book.extend_relative_json(json).unwrap();
        assert_eq!(book.relative().len(), 2);
        assert_eq!(book.relative()[0].offset, -3);
        assert_eq!(book.relative()[1].offset, 2);
        assert_eq!(book.rejected().len(), 1);
    }

    #[test]
    fn year_start_era() {
        let json = r#"{
            "n": {"month_type": "solar_month", "month_number": 5, "angam_type": "nakshatram",
                  "angam_number": 22, "year_start": 1900, "year_start_era": "gregorian"}
        }"#;
        let book = RuleBook::from_json(json).unwrap();
        assert_eq!(
            book.rule("n").unwrap().year_start,
            Some(YearStart {
                year: 1900,
                era: Era::Gregorian
            })
        );
    }

    #[test]
    fn non_object_file_fails() {
        assert!(matches!(RuleBook::from_json("[1, 2]"), Err(RuleError::Json(_))));
    }
}
