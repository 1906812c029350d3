//! Error types for the angam oracle.

use thiserror::Error;

use crate::angam::AngamKind;
use crate::riseset::RiseSetEvent;

/// Errors from oracle queries and the reference ephemeris.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Iterative algorithm did not converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
    /// Angam index outside `1..=kind.count()`.
    #[error("invalid {kind} index {index}")]
    InvalidAngam { kind: AngamKind, index: u32 },
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Body stays below the horizon for the whole search window.
    #[error("{0:?} does not occur: body never rises")]
    NeverRises(RiseSetEvent),
    /// Body stays above the horizon for the whole search window.
    #[error("{0:?} does not occur: body never sets")]
    NeverSets(RiseSetEvent),
    /// Query not supported by this ephemeris.
    #[error("unsupported query: {0}")]
    Unsupported(&'static str),
    /// Calendar date could not be parsed or is out of range.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
