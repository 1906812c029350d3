//! Festival assignment over a panchangam time series.
//!
//! This crate provides:
//! - [`FestivalRule`] and the JSON [`RuleBook`] source
//! - [`resolve`]: per-day rule evaluation with the puurvaviddha,
//!   paraviddha and vyaapti priority tables
//! - [`FestivalRegistry`] with the consecutive-day guard
//! - Built-in observances with their own algorithms ([`special`])
//! - Numbering, relative festivals, cleanup and tag filtering
//! - [`compute_festivals`]: the full pipeline, returning a
//!   [`FestivalCalendar`] and the [`Diagnostics`] of the run

pub mod calendar;
pub mod cleanup;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod instance;
pub mod names;
pub mod numbering;
pub mod options;
pub mod pipeline;
pub mod priority;
pub mod registry;
pub mod relative;
pub mod resolver;
pub mod rule;
pub mod source;
pub mod special;

pub use calendar::{CalendarDay, FestivalCalendar};
pub use diagnostics::{Anomaly, Diagnostics};
pub use error::{FestivalError, RuleError};
pub use instance::FestivalInstance;
pub use options::{ExclusivePair, FestivalOptions, WeekdayAnchoredRule};
pub use pipeline::{FestivalReport, compute_festivals};
pub use priority::Outcome;
pub use registry::FestivalRegistry;
pub use resolver::{resolve, resolve_rules};
pub use rule::{Era, FestivalRule, MonthType, Priority, RelativeRule, RuleAngamType, YearStart};
pub use source::RuleBook;
