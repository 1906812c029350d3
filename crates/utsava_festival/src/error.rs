//! Error types for rule loading and festival resolution.

use thiserror::Error;
use utsava_series::SeriesError;

/// A festival rule that cannot be used.
///
/// Each variant names the offending festival so one bad rule can be
/// reported and skipped while the rest of the rule set is evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RuleError {
    /// A field required for the declared month/angam type is absent.
    #[error("festival '{festival}': missing field '{field}'")]
    MissingField {
        festival: String,
        field: &'static str,
    },
    /// A field holds a value outside its closed set or range.
    #[error("festival '{festival}': unknown {field} '{value}'")]
    UnknownValue {
        festival: String,
        field: &'static str,
        value: String,
    },
    /// The field combination is well formed but not evaluable.
    #[error("festival '{festival}': {reason}")]
    Unsupported {
        festival: String,
        reason: &'static str,
    },
    /// An entry is not a JSON object of the expected shape.
    #[error("festival '{festival}': {message}")]
    Malformed { festival: String, message: String },
    /// The rule file itself is not a JSON object.
    #[error("rule file: {0}")]
    Json(String),
}

impl RuleError {
    /// Festival the error is about, if any.
    pub fn festival(&self) -> Option<&str> {
        match self {
            Self::MissingField { festival, .. }
            | Self::UnknownValue { festival, .. }
            | Self::Unsupported { festival, .. }
            | Self::Malformed { festival, .. } => Some(festival),
            Self::Json(_) => None,
        }
    }
}

impl From<serde_json::Error> for RuleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// Errors that stop a festival computation as a whole.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FestivalError {
    /// Error from the time-series store.
    #[error("time series: {0}")]
    Series(#[from] SeriesError),
    /// Error from a rule source.
    #[error("rules: {0}")]
    Rule(#[from] RuleError),
}
