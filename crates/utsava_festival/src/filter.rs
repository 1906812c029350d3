//! Tag filter applied to the final calendar.

use std::collections::BTreeSet;

use crate::instance::FestivalInstance;
use crate::source::RuleBook;

/// Whether `festival` survives the filter.
///
/// A festival named in a rule file is kept only when one of its tags is
/// in `include`, so an untagged rule never survives a non-empty
/// `include`. Festivals no rule file mentions, and every festival under
/// an empty `include`, are kept.
pub fn is_included(book: &RuleBook, festival: &FestivalInstance, include: &BTreeSet<String>) -> bool {
    if include.is_empty() {
        return true;
    }
    match book.tags(festival.base_name()) {
        Some(tags) => !tags.is_disjoint(include),
        None => true,
    }
}
