//! Aggregator/ranker - per-label statistics and top-K lists.

use indexmap::IndexMap;

use crate::types::item::ClassifiedItem;
use crate::types::label::Label;
use crate::types::summary::{RankedList, Summary};

/// Default ranking length.
pub const DEFAULT_TOP_K: usize = 10;

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Count items per label and derive percentages.
///
/// Returns `None` for an empty set; there is nothing to take a percentage of.
pub fn aggregate(items: &[ClassifiedItem]) -> Option<Summary> {
    if items.is_empty() {
        return None;
    }

    let total = items.len();
    let mut counts: IndexMap<Label, usize> = Label::ALL.iter().map(|l| (*l, 0)).collect();
    for item in items {
        *counts.entry(item.label).or_insert(0) += 1;
    }

    let percentages = counts
        .iter()
        .map(|(label, count)| (*label, round1(*count as f64 / total as f64 * 100.0)))
        .collect();

    Some(Summary {
        total,
        counts,
        percentages,
    })
}

/// Top `k` items with `label`, by descending score.
///
/// The sort is stable, so equal scores keep their ingestion order.
pub fn rank(items: &[ClassifiedItem], label: Label, k: usize) -> RankedList {
    let mut matching: Vec<ClassifiedItem> = items
        .iter()
        .filter(|item| item.label == label)
        .cloned()
        .collect();

    matching.sort_by(|a, b| b.score.total_cmp(&a.score));
    matching.truncate(k);

    RankedList {
        label,
        items: matching,
    }
}

/// One ranking per label, in [`Label::ALL`] order.
pub fn rank_all(items: &[ClassifiedItem], k: usize) -> Vec<RankedList> {
    Label::ALL
        .iter()
        .map(|label| rank(items, *label, k))
        .collect()
}
