//! Items at each pipeline stage.

use serde::{Deserialize, Serialize};

use super::label::Label;

/// Raw text unit produced by the fetcher, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub raw_text: String,
}

impl Item {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }

    /// Build an item from a feed entry's title and summary.
    ///
    /// Returns `None` when both fields are empty, so the bare separator
    /// never becomes an item.
    pub fn from_entry(title: &str, summary: &str) -> Option<Self> {
        let (title, summary) = (title.trim(), summary.trim());
        if title.is_empty() && summary.is_empty() {
            return None;
        }
        let text = format!("{} - {}", title, summary);
        Some(Self::new(text.trim()))
    }
}

/// Normalized, deduplicated text unit.
///
/// Only the normalizer constructs these; the text never contains markup,
/// whitespace runs, or surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanItem {
    pub text: String,
}

impl CleanItem {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    /// Dedup key: case-folded text.
    pub fn key(&self) -> String {
        self.text.to_lowercase()
    }
}

/// A clean item with its canonical sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub text: String,
    pub label: Label,
    pub score: f64,
}

impl ClassifiedItem {
    pub fn new(text: impl Into<String>, label: Label, score: f64) -> Self {
        Self {
            text: text.into(),
            label,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_entry_joins_with_separator() {
        let item = Item::from_entry("Wiesn opens", "Crowds arrive early").unwrap();
        assert_eq!(item.raw_text, "Wiesn opens - Crowds arrive early");
    }

    #[test]
    fn test_item_from_entry_keeps_separator_for_missing_summary() {
        let item = Item::from_entry("Title only", "").unwrap();
        assert_eq!(item.raw_text, "Title only -");
    }

    #[test]
    fn test_item_from_empty_entry() {
        assert!(Item::from_entry("", "").is_none());
        assert!(Item::from_entry("  ", "\n").is_none());
    }
}
