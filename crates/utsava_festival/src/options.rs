//! Caller-tunable parts of a festival computation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Tags kept by the final filter unless the caller says otherwise.
pub const DEFAULT_INCLUDE_TAGS: [&str; 6] = [
    "CommonFestivals",
    "MonthlyVratam",
    "RareDays",
    "AmavasyaDays",
    "Dashavataram",
    "SunSankranti",
];

/// A festival and its "great" variant that may only stand on the same
/// days; otherwise the variant is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusivePair {
    pub primary: String,
    pub variant: String,
}

/// A festival on the last given weekday on or before each day of an
/// anchor festival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayAnchoredRule {
    pub name: String,
    pub anchor: String,
    /// 0 = Sunday.
    pub weekday: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FestivalOptions {
    /// Festivals whose rule tags miss this set are left out of the
    /// calendar. An empty set keeps everything.
    pub include_tags: BTreeSet<String>,
    pub exclusive_pairs: Vec<ExclusivePair>,
    pub weekday_anchored: Vec<WeekdayAnchoredRule>,
    /// Run the built-in special assigners before the rule pass.
    pub special_assigners: bool,
}

impl Default for FestivalOptions {
    fn default() -> Self {
        Self {
            include_tags: DEFAULT_INCLUDE_TAGS.iter().map(|t| t.to_string()).collect(),
            exclusive_pairs: vec![ExclusivePair {
                primary: "tripurOtsavaH".to_string(),
                variant: "mahA~kArttikI".to_string(),
            }],
            weekday_anchored: vec![WeekdayAnchoredRule {
                name: "varalakSmI-vratam".to_string(),
                anchor: "yajurvEda-upAkarma".to_string(),
                weekday: 5,
            }],
            special_assigners: true,
        }
    }
}

impl FestivalOptions {
    /// Options with no filtering, no pairs, no anchored rules and no
    /// special assigners: only the rule book is applied.
    pub fn rules_only() -> Self {
        Self {
            include_tags: BTreeSet::new(),
            exclusive_pairs: Vec::new(),
            weekday_anchored: Vec::new(),
            special_assigners: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opts: FestivalOptions =
            serde_json::from_str(r#"{ "special_assigners": false }"#).unwrap();
        assert!(!opts.special_assigners);
        assert_eq!(opts.include_tags.len(), 6);
        assert_eq!(opts.exclusive_pairs[0].variant, "mahA~kArttikI");
    }

    #[test]
    fn explicit_tags_replace_defaults() {
        let opts: FestivalOptions =
            serde_json::from_str(r#"{ "include_tags": ["RareDays"] }"#).unwrap();
        assert_eq!(opts.include_tags.iter().collect::<Vec<_>>(), ["RareDays"]);
        assert_eq!(opts.weekday_anchored[0].weekday, 5);
    }
}
