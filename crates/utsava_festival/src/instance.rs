//! Festival keys.

use std::fmt;
use std::str::FromStr;

/// Key of one festival in the registry: a base name and, for festivals
/// counted from an epoch, the instance number.
///
/// Displays as `name` or `name#N`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FestivalInstance {
    base_name: String,
    ordinal: Option<u32>,
}

impl FestivalInstance {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            ordinal: None,
        }
    }

    pub fn numbered(base_name: impl Into<String>, ordinal: u32) -> Self {
        Self {
            base_name: base_name.into(),
            ordinal: Some(ordinal),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }

    pub fn is_numbered(&self) -> bool {
        self.ordinal.is_some()
    }

    /// Same base name, without a number.
    pub fn unnumbered(&self) -> Self {
        Self::new(self.base_name.clone())
    }

    /// Whether the display form of this key starts with `prefix`.
    pub fn display_starts_with(&self, prefix: &str) -> bool {
        if prefix.len() <= self.base_name.len() {
            self.base_name.starts_with(prefix)
        } else {
            self.to_string().starts_with(prefix)
        }
    }
}

impl fmt::Display for FestivalInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ordinal {
            Some(n) => write!(f, "{}#{n}", self.base_name),
            None => f.write_str(&self.base_name),
        }
    }
}

impl From<&str> for FestivalInstance {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FestivalInstance {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl FromStr for FestivalInstance {
    type Err = std::convert::Infallible;

    /// `name#N` with a numeric `N` parses as numbered; anything else is a
    /// plain name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbered = s
            .rsplit_once('#')
            .and_then(|(base, n)| n.parse::<u32>().ok().map(|n| (base, n)))
            .filter(|(base, _)| !base.is_empty());
        Ok(match numbered {
            Some((base, n)) => Self::numbered(base, n),
            None => Self::new(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(FestivalInstance::new("tripurOtsavaH").to_string(), "tripurOtsavaH");
        assert_eq!(
            FestivalInstance::numbered("kRSNa-jayantI", 5251).to_string(),
            "kRSNa-jayantI#5251"
        );
    }

    #[test]
    fn parse_strips_number() {
        let f: FestivalInstance = "ambA-jayantI#12".parse().unwrap();
        assert_eq!(f.base_name(), "ambA-jayantI");
        assert_eq!(f.ordinal(), Some(12));
        let g: FestivalInstance = "a#b".parse().unwrap();
        assert_eq!(g.base_name(), "a#b");
        assert!(!g.is_numbered());
    }

    #[test]
    fn prefix_match_spans_number() {
        let f = FestivalInstance::numbered("upAkarma", 7);
        assert!(f.display_starts_with("upA"));
        assert!(f.display_starts_with("upAkarma#7"));
        assert!(!f.display_starts_with("upAkarma#8"));
    }

    #[test]
    fn numbered_sort_after_plain() {
        assert!(FestivalInstance::new("x") < FestivalInstance::numbered("x", 1));
        assert!(FestivalInstance::numbered("x", 2) < FestivalInstance::numbered("x", 10));
    }
}
