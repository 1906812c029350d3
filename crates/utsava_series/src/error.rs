//! Error types for the time-series store.

use thiserror::Error;
use utsava_base::{AngamKind, BaseError};

use crate::day::DayOrdinal;

/// Errors from building or querying a [`crate::TimeSeries`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SeriesError {
    /// Error from the oracle.
    #[error("oracle error: {0}")]
    Base(#[from] BaseError),
    /// Day ordinal outside the stored range.
    #[error("day {ordinal} outside stored range {first}..={last}")]
    DayOutOfRange {
        ordinal: DayOrdinal,
        first: DayOrdinal,
        last: DayOrdinal,
    },
    /// Instant not covered by any stored sunrise-to-sunrise day.
    #[error("instant {jd} outside stored range")]
    InstantOutOfRange { jd: f64 },
    /// Kaala label not recognised.
    #[error("unknown kaala '{0}'")]
    UnknownKaala(String),
    /// Oracle found no occurrence of an angam in a search window.
    #[error("{kind} {target} not found between {start} and {end}")]
    SpanNotFound {
        kind: AngamKind,
        target: u8,
        start: f64,
        end: f64,
    },
    /// Start/end dates do not form a valid range.
    #[error("invalid date range: {0}")]
    InvalidRange(String),
    /// Handcrafted day records are malformed.
    #[error("malformed day records at ordinal {ordinal}: {reason}")]
    MalformedDays {
        ordinal: DayOrdinal,
        reason: &'static str,
    },
}
