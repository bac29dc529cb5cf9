//! Layout engine
//!
//! Maps each (category, group) record to a deterministic vertical position.
//! Categories are stacked top-to-bottom in category order, each occupying a
//! block of `n_groups + 1` slots; groups within a block are offset downward
//! by a fixed sub-spacing. The first record of each category carries the tick
//! label so every category is labeled exactly once.

use crate::record::Record;
use std::collections::{HashMap, HashSet};

/// Vertical offset between consecutive groups inside one category block.
/// Must stay below the per-category spacing (`n_groups + 1`), which holds for
/// any group count since spacing >= 2.
pub const GROUP_OFFSET: f64 = 0.8;

/// A record's assigned vertical position and tick label.
/// The label is empty for every record of a category after the first.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSlot {
    pub y: f64,
    pub label: String,
}

/// Compute one layout slot per record, in record order
///
/// `category_order` and `group_order` must be the first-appearance orderings
/// of the record set itself, so a filtered-out category compacts the layout
/// rather than leaving a gap. Pure function: identical inputs always produce
/// identical slots. Empty input yields an empty output.
pub fn compute_layout(
    records: &[Record],
    category_order: &[String],
    group_order: &[String],
) -> Vec<LayoutSlot> {
    let n_categories = category_order.len();
    let spacing = (group_order.len() + 1) as f64;

    let category_index: HashMap<&str, usize> = category_order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    let group_index: HashMap<&str, usize> = group_order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut labeled: HashSet<&str> = HashSet::new();
    let mut slots = Vec::with_capacity(records.len());

    for record in records {
        let ci = category_index.get(record.category.as_str()).copied().unwrap_or(0);
        let gi = group_index.get(record.group.as_str()).copied().unwrap_or(0);

        // First category block sits topmost (largest y)
        let base = (n_categories - ci - 1) as f64 * spacing;
        let y = base - gi as f64 * GROUP_OFFSET;

        // Label only the first record seen for each category
        let label = if labeled.insert(record.category.as_str()) {
            record.category.clone()
        } else {
            String::new()
        };

        slots.push(LayoutSlot { y, label });
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{category_order, group_order};

    fn record(category: &str, group: &str) -> Record {
        Record {
            category: category.to_string(),
            group: group.to_string(),
            estimate: 0.2,
            interval_low: 0.1,
            interval_high: 0.3,
        }
    }

    #[test]
    fn test_single_category_two_groups() {
        let records = vec![record("Nausea", "Drug A"), record("Nausea", "Drug B")];
        let categories = vec!["Nausea".to_string()];
        let groups = vec!["Drug A".to_string(), "Drug B".to_string()];

        let slots = compute_layout(&records, &categories, &groups);

        // spacing = 3, single category at base 0
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].y, 0.0);
        assert_eq!(slots[0].label, "Nausea");
        assert_eq!(slots[1].y, -0.8);
        assert_eq!(slots[1].label, "");
    }

    #[test]
    fn test_category_blocks_stack_top_down() {
        let records = vec![
            record("Nausea", "Drug A"),
            record("Nausea", "Drug B"),
            record("Headache", "Drug A"),
            record("Headache", "Drug B"),
        ];
        let categories = category_order(&records);
        let groups = group_order(&records);

        let slots = compute_layout(&records, &categories, &groups);

        // Two categories, two groups: spacing = 3
        assert_eq!(slots[0].y, 3.0); // Nausea block topmost
        assert_eq!(slots[1].y, 3.0 - 0.8);
        assert_eq!(slots[2].y, 0.0);
        assert_eq!(slots[3].y, -0.8);
    }

    #[test]
    fn test_deterministic() {
        let records = vec![
            record("Nausea", "Drug A"),
            record("Headache", "Drug B"),
            record("Nausea", "Drug B"),
        ];
        let categories = category_order(&records);
        let groups = group_order(&records);

        let first = compute_layout(&records, &categories, &groups);
        let second = compute_layout(&records, &categories, &groups);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_block_collision_for_any_group_count() {
        // The deepest marker in a block sits at (n_groups - 1) * GROUP_OFFSET
        // below the base; the next block starts spacing units below.
        for n_groups in 1..=20 {
            let spacing = (n_groups + 1) as f64;
            assert!(
                GROUP_OFFSET * ((n_groups - 1) as f64) < spacing,
                "blocks overlap at n_groups = {}",
                n_groups
            );
        }
    }

    #[test]
    fn test_each_category_labeled_exactly_once() {
        let records = vec![
            record("Nausea", "Drug A"),
            record("Nausea", "Drug B"),
            record("Headache", "Drug B"), // no Drug A row for this category
            record("Vomiting", "Drug A"),
            record("Vomiting", "Drug B"),
        ];
        let categories = category_order(&records);
        let groups = group_order(&records);

        let slots = compute_layout(&records, &categories, &groups);

        let labels: Vec<&str> = slots
            .iter()
            .filter(|s| !s.label.is_empty())
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels.len(), categories.len());
        assert_eq!(labels, vec!["Nausea", "Headache", "Vomiting"]);
    }

    #[test]
    fn test_filtered_layout_compacts() {
        let all = vec![
            record("Nausea", "Drug A"),
            record("Headache", "Drug A"),
            record("Vomiting", "Drug A"),
        ];
        let full = compute_layout(&all, &category_order(&all), &group_order(&all));
        assert_eq!(full[0].y, 4.0); // three categories, spacing 2

        // Drop the middle category; remaining blocks close the gap
        let filtered = vec![all[0].clone(), all[2].clone()];
        let slots = compute_layout(&filtered, &category_order(&filtered), &group_order(&filtered));
        assert_eq!(slots[0].y, 2.0);
        assert_eq!(slots[1].y, 0.0);
    }

    #[test]
    fn test_empty_records() {
        assert!(compute_layout(&[], &[], &[]).is_empty());
    }
}
