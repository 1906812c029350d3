//! One complete festival computation over a built time series.

use tracing::info;
use utsava_series::TimeSeries;

use crate::calendar::FestivalCalendar;
use crate::cleanup::{name_amavasya, remove_exclusive_variants, vishesha_vyatipata};
use crate::diagnostics::{Anomaly, Diagnostics};
use crate::error::FestivalError;
use crate::filter::is_included;
use crate::numbering::number_festivals;
use crate::options::FestivalOptions;
use crate::registry::FestivalRegistry;
use crate::relative::{assign_relative_festivals, assign_weekday_anchored};
use crate::resolver::resolve;
use crate::source::RuleBook;
use crate::special::{AMAVASYA_ASSIGNER, assign_special_festivals, run_assigner};

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct FestivalReport {
    /// Every assigned festival, unfiltered, including look-ahead days.
    pub registry: FestivalRegistry,
    /// Filtered day to festival mapping over the requested range.
    pub calendar: FestivalCalendar,
    pub diagnostics: Diagnostics,
}

/// Assign every festival of `book` (and the built-in observances) over
/// the requested range of `series`.
///
/// Per-rule and per-day failures are recorded in the report's
/// diagnostics; only a failure of a whole-registry pass is returned as an
/// error.
pub fn compute_festivals(
    series: &TimeSeries,
    book: &RuleBook,
    options: &FestivalOptions,
) -> Result<FestivalReport, FestivalError> {
    let mut registry = FestivalRegistry::new();
    let mut diag = Diagnostics::new();

    for rejected in book.rejected() {
        diag.record(Anomaly::RuleRejected(rejected.clone()));
    }
    if options.special_assigners {
        assign_special_festivals(series, &mut registry, &mut diag);
    }
    resolve(series, book.rules(), &mut registry, &mut diag);

    vishesha_vyatipata(series, &mut registry, &mut diag)?;
    number_festivals(series, book.rules(), &mut registry, &mut diag)?;
    if options.special_assigners {
        name_amavasya(series, &mut registry, &mut diag)?;
        let (name, assigner) = AMAVASYA_ASSIGNER;
        run_assigner(series, name, assigner, &mut registry, &mut diag);
    }
    remove_exclusive_variants(&options.exclusive_pairs, &mut registry, &mut diag);
    assign_weekday_anchored(series, &options.weekday_anchored, &mut registry, &mut diag);
    assign_relative_festivals(book.relative(), &mut registry, &mut diag);

    let calendar = FestivalCalendar::from_registry(series, &registry, |f| {
        is_included(book, f, &options.include_tags)
    })?;
    info!(
        festivals = registry.len(),
        days = calendar.len(),
        anomalies = diag.len(),
        errors = diag.error_count(),
        "festivals computed"
    );
    Ok(FestivalReport {
        registry,
        calendar,
        diagnostics: diag,
    })
}
