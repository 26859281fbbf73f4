//! Normalizer/deduplicator - strip markup, collapse whitespace, drop
//! duplicates by case-folded text.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use crate::types::item::{CleanItem, Item};

lazy_static! {
    // Anything tag-like: `<` up to the next `>`.
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]+>").unwrap();

    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Clean one text: tags become a space, whitespace runs collapse, ends trim.
pub fn clean_text(raw: &str) -> String {
    let text = TAG_REGEX.replace_all(raw, " ");
    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

/// Normalize and deduplicate items.
///
/// Keeps the first occurrence of each case-folded cleaned text, in input
/// order, then truncates to `max_items`. Pure: same input, same output.
pub fn normalize(items: &[Item], max_items: usize) -> Vec<CleanItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut clean = Vec::with_capacity(items.len().min(max_items));
    let mut empty = 0usize;

    for item in items {
        let text = clean_text(&item.raw_text);
        if text.is_empty() {
            empty += 1;
            continue;
        }
        let candidate = CleanItem::new(text);
        if seen.insert(candidate.key()) {
            clean.push(candidate);
        }
    }

    let unique = clean.len();
    clean.truncate(max_items);

    debug!(
        input = items.len(),
        empty,
        duplicates = items.len() - empty - unique,
        output = clean.len(),
        "Normalized items"
    );

    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items(texts: &[&str]) -> Vec<Item> {
        texts.iter().map(|t| Item::new(*t)).collect()
    }

    fn texts(clean: &[CleanItem]) -> Vec<&str> {
        clean.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_clean_text_strips_tags_and_whitespace() {
        assert_eq!(
            clean_text("  <p>Hello<br/>\n\tworld</p>  "),
            "Hello world"
        );
        assert_eq!(clean_text("a<b>c"), "a c");
        assert_eq!(clean_text("<div></div>"), "");
    }

    #[test]
    fn test_clean_text_unbalanced_brackets() {
        assert_eq!(clean_text("x <<b>i> y"), "x i> y");
        assert_eq!(clean_text("a < b"), "a < b");
        assert_eq!(clean_text(clean_text("x <<b>i> y").as_str()), "x i> y");
    }

    #[test]
    fn test_case_insensitive_duplicates_collapse() {
        let clean = normalize(&items(&["Great festival!", "great FESTIVAL!  "]), 10);
        assert_eq!(texts(&clean), vec!["Great festival!"]);
    }

    #[test]
    fn test_markup_variants_are_duplicates() {
        let clean = normalize(
            &items(&["<b>Beer</b> tent open", "Beer tent   open", "beer TENT open"]),
            10,
        );
        assert_eq!(texts(&clean), vec!["Beer tent open"]);
    }

    #[test]
    fn test_first_occurrence_order_kept() {
        let clean = normalize(&items(&["b", "a", "B", "c", "A"]), 10);
        assert_eq!(texts(&clean), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_items_dropped() {
        let clean = normalize(&items(&["   ", "<br>", "", "kept"]), 10);
        assert_eq!(texts(&clean), vec!["kept"]);
    }

    #[test]
    fn test_truncates_after_dedup() {
        // With truncation before dedup only "a" would survive.
        let clean = normalize(&items(&["a", "A", "a", "b", "c"]), 2);
        assert_eq!(texts(&clean), vec!["a", "b"]);
    }

    fn raw_text() -> impl Strategy<Value = String> {
        "[a-zA-Z <>/!\t\n]{0,24}"
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in prop::collection::vec(raw_text(), 0..20)) {
            let first = normalize(&raw.iter().map(Item::new).collect::<Vec<_>>(), usize::MAX);
            let again = normalize(
                &first.iter().map(|c| Item::new(c.text.clone())).collect::<Vec<_>>(),
                usize::MAX,
            );
            prop_assert_eq!(first, again);
        }

        #[test]
        fn prop_output_keys_unique_and_clean(raw in prop::collection::vec(raw_text(), 0..20)) {
            let clean = normalize(&raw.iter().map(Item::new).collect::<Vec<_>>(), usize::MAX);
            let keys: HashSet<String> = clean.iter().map(CleanItem::key).collect();
            prop_assert_eq!(keys.len(), clean.len());
            for item in &clean {
                prop_assert!(!item.text.is_empty());
                prop_assert!(!TAG_REGEX.is_match(&item.text));
                prop_assert!(!item.text.contains("  "));
                prop_assert_eq!(item.text.trim(), item.text.as_str());
            }
        }

        #[test]
        fn prop_order_follows_first_occurrence(raw in prop::collection::vec("[abcAB]{1,2}", 0..20)) {
            let clean = normalize(&raw.iter().map(Item::new).collect::<Vec<_>>(), usize::MAX);

            let mut expected: Vec<String> = Vec::new();
            for text in &raw {
                if !expected.iter().any(|e| e.to_lowercase() == text.to_lowercase()) {
                    expected.push(text.clone());
                }
            }
            prop_assert_eq!(clean.iter().map(|c| c.text.clone()).collect::<Vec<_>>(), expected);
        }
    }
}
