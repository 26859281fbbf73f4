//! Aggregated statistics and rankings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::item::ClassifiedItem;
use super::label::Label;

/// Per-label counts and percentages over a non-empty classified set.
///
/// Every label of the taxonomy is present, zero counts included, in
/// [`Label::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub counts: IndexMap<Label, usize>,
    pub percentages: IndexMap<Label, f64>,
}

impl Summary {
    /// Count for a label.
    pub fn count(&self, label: Label) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Percentage for a label, one decimal place.
    pub fn percentage(&self, label: Label) -> f64 {
        self.percentages.get(&label).copied().unwrap_or(0.0)
    }

    /// Label with the highest count (first in taxonomy order on ties).
    pub fn dominant(&self) -> Label {
        Label::ALL
            .into_iter()
            .fold(Label::Positive, |best, label| {
                if self.count(label) > self.count(best) {
                    label
                } else {
                    best
                }
            })
    }
}

/// Top-K items of one label, by descending confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedList {
    pub label: Label,
    pub items: Vec<ClassifiedItem>,
}

impl RankedList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
