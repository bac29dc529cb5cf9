//! Filtering and ordering
//!
//! Applies the user's category/group inclusion sets and derives the stable
//! orderings that drive vertical stacking and color assignment. Orderings are
//! first-appearance order over the records actually retained, never sorted,
//! so filtering out a whole category compacts the layout instead of leaving
//! gaps.

use crate::record::Record;
use std::collections::HashSet;

/// Keep records whose category AND group are allowed, preserving input order
///
/// Empty allowed-sets yield an empty result; the caller surfaces that as a
/// "nothing to display" state rather than an error.
pub fn filter(
    records: &[Record],
    allowed_categories: &HashSet<String>,
    allowed_groups: &HashSet<String>,
) -> Vec<Record> {
    records
        .iter()
        .filter(|r| allowed_categories.contains(&r.category) && allowed_groups.contains(&r.group))
        .cloned()
        .collect()
}

/// Distinct categories in first-appearance order
pub fn category_order(records: &[Record]) -> Vec<String> {
    first_seen(records.iter().map(|r| &r.category))
}

/// Distinct groups in first-appearance order
pub fn group_order(records: &[Record]) -> Vec<String> {
    first_seen(records.iter().map(|r| &r.group))
}

/// Order-preserving dedup: one pass, first-seen wins
fn first_seen<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value.clone()) {
            out.push(value.clone());
        }
    }
    out
}
