//! Anomaly log of a festival computation.
//!
//! Every remediation the engine applies (a removed day, a skipped
//! relative festival, an unresolved pattern) is recorded here as well as
//! emitted through `tracing`, so callers can inspect a run without
//! installing a subscriber.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{error, warn};
use utsava_series::{DayOrdinal, Kaala, SeriesError};

use crate::error::RuleError;
use crate::instance::FestivalInstance;
use crate::rule::Priority;

/// One anomaly encountered while assigning festivals.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Anomaly {
    /// A rule failed validation and was not evaluated.
    RuleRejected(RuleError),
    /// Evaluating a rule or special assigner on one day failed.
    EvaluationFailed {
        festival: String,
        day: DayOrdinal,
        error: SeriesError,
    },
    /// No branch of the priority table matched the four samples.
    Unresolved {
        festival: String,
        day: DayOrdinal,
        priority: Priority,
        kaala: Kaala,
        samples: [u8; 4],
    },
    /// Assigned although the angam touched neither day's window.
    KaalaUntouched {
        festival: String,
        day: DayOrdinal,
        kaala: Kaala,
        samples: [u8; 4],
    },
    /// The same festival landed on consecutive days; the earlier one was
    /// dropped.
    ConsecutiveDays {
        festival: FestivalInstance,
        removed: DayOrdinal,
        kept: DayOrdinal,
    },
    /// A numbered festival occurs twice within 300 days.
    RepeatWithinYear {
        festival: String,
        first: DayOrdinal,
        second: DayOrdinal,
    },
    /// Instance number would be zero or negative; left unnumbered.
    FutureNumbered {
        festival: String,
        day: DayOrdinal,
        number: i64,
    },
    /// A numbered instance was assigned twice; the later day won.
    NumberReassigned {
        festival: FestivalInstance,
        previous: DayOrdinal,
        day: DayOrdinal,
    },
    /// Anchor of a relative festival is absent.
    AnchorMissing { festival: String, anchor: String },
    /// Anchor of a relative festival matches several keys by prefix.
    AnchorAmbiguous {
        festival: String,
        anchor: String,
        candidates: Vec<String>,
    },
    /// A festival other passes depend on was never assigned.
    PrerequisiteMissing { festival: String, needed_by: &'static str },
    /// Exclusive variant removed because its days differ from the primary.
    ExclusiveVariantRemoved {
        primary: String,
        variant: String,
        primary_days: BTreeSet<DayOrdinal>,
        variant_days: BTreeSet<DayOrdinal>,
    },
}

impl Anomaly {
    /// Whether this is an error (a festival could not be computed at all)
    /// rather than a remediated inconsistency.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::RuleRejected(_)
                | Self::EvaluationFailed { .. }
                | Self::AnchorMissing { .. }
                | Self::AnchorAmbiguous { .. }
                | Self::PrerequisiteMissing { .. }
        )
    }

    /// Festival the anomaly concerns, if it names one.
    pub fn festival(&self) -> Option<String> {
        match self {
            Self::RuleRejected(e) => e.festival().map(str::to_string),
            Self::EvaluationFailed { festival, .. }
            | Self::Unresolved { festival, .. }
            | Self::KaalaUntouched { festival, .. }
            | Self::RepeatWithinYear { festival, .. }
            | Self::FutureNumbered { festival, .. }
            | Self::AnchorMissing { festival, .. }
            | Self::AnchorAmbiguous { festival, .. }
            | Self::PrerequisiteMissing { festival, .. } => Some(festival.clone()),
            Self::ConsecutiveDays { festival, .. } | Self::NumberReassigned { festival, .. } => {
                Some(festival.to_string())
            }
            Self::ExclusiveVariantRemoved { variant, .. } => Some(variant.clone()),
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleRejected(e) => write!(f, "rule rejected: {e}"),
            Self::EvaluationFailed {
                festival,
                day,
                error,
            } => write!(f, "{festival}: evaluation failed on day {day}: {error}"),
            Self::Unresolved {
                festival,
                day,
                priority,
                kaala,
                samples,
            } => write!(
                f,
                "{festival}: could not assign {priority} day near day {day}, {kaala} samples {samples:?}"
            ),
            Self::KaalaUntouched {
                festival,
                day,
                kaala,
                samples,
            } => write!(
                f,
                "{festival}: angam did not touch {kaala} near day {day} ({samples:?}); assigned anyway"
            ),
            Self::ConsecutiveDays {
                festival,
                removed,
                kept,
            } => write!(f, "{festival} on consecutive days ({removed}, {kept}); removed {removed}"),
            Self::RepeatWithinYear {
                festival,
                first,
                second,
            } => write!(f, "{festival} occurs twice within a year ({first}, {second})"),
            Self::FutureNumbered {
                festival,
                day,
                number,
            } => write!(f, "{festival} on day {day} is only in the future (number {number})"),
            Self::NumberReassigned {
                festival,
                previous,
                day,
            } => write!(f, "overwriting {festival} day {previous} with {day}"),
            Self::AnchorMissing { festival, anchor } => {
                write!(f, "{festival}: anchor {anchor} not assigned")
            }
            Self::AnchorAmbiguous {
                festival,
                anchor,
                candidates,
            } => write!(f, "{festival}: anchor {anchor} matches {candidates:?}"),
            Self::PrerequisiteMissing {
                festival,
                needed_by,
            } => write!(f, "{festival} not assigned, needed by {needed_by}"),
            Self::ExclusiveVariantRemoved {
                primary,
                variant,
                primary_days,
                variant_days,
            } => write!(
                f,
                "removing {variant} {variant_days:?} since it does not coincide with {primary} {primary_days:?}"
            ),
        }
    }
}

/// Ordered anomaly log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Anomaly>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an anomaly and emit it as a `tracing` event.
    pub fn record(&mut self, anomaly: Anomaly) {
        let festival = anomaly.festival();
        if anomaly.is_error() {
            error!(festival = festival.as_deref(), "{anomaly}");
        } else {
            warn!(festival = festival.as_deref(), "{anomaly}");
        }
        self.entries.push(anomaly);
    }

    pub fn entries(&self) -> &[Anomaly] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
        self.entries.iter()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|a| a.is_error()).count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Anomaly;
    type IntoIter = std::slice::Iter<'a, Anomaly>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_and_warnings_are_counted() {
        let mut diag = Diagnostics::new();
        diag.record(Anomaly::AnchorMissing {
            festival: "a".into(),
            anchor: "b".into(),
        });
        diag.record(Anomaly::ConsecutiveDays {
            festival: FestivalInstance::new("x"),
            removed: 4,
            kept: 5,
        });
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.entries()[1].festival().as_deref(), Some("x"));
    }

    #[test]
    fn display_names_days() {
        let a = Anomaly::ConsecutiveDays {
            festival: FestivalInstance::new("x"),
            removed: 100,
            kept: 101,
        };
        assert_eq!(a.to_string(), "x on consecutive days (100, 101); removed 100");
    }
}
