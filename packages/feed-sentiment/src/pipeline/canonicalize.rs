//! Label canonicalizer - map any model's label vocabulary onto
//! POSITIVE / NEGATIVE / NEUTRAL.
//!
//! Markers are checked against the case-folded label in fixed priority:
//! neutral, then positive, then negative. Labels carrying no marker (e.g.
//! `LABEL_2`) fall back on the score, which can only yield POSITIVE or
//! NEGATIVE: most binary classifiers have no neutral class.

use crate::types::label::{Label, RawResult};

const NEUTRAL_MARKER: &str = "neu";
const POSITIVE_MARKER: &str = "pos";
const NEGATIVE_MARKER: &str = "neg";

/// Score at or above which an unmarked label counts as POSITIVE.
pub const POSITIVE_THRESHOLD: f64 = 0.5;

/// Canonical label for one oracle answer. Total and pure.
pub fn canonicalize(raw: &RawResult) -> Label {
    let label = raw.label.to_lowercase();

    if label.contains(NEUTRAL_MARKER) {
        Label::Neutral
    } else if label.contains(POSITIVE_MARKER) {
        Label::Positive
    } else if label.contains(NEGATIVE_MARKER) {
        Label::Negative
    } else if raw.score >= POSITIVE_THRESHOLD {
        Label::Positive
    } else {
        Label::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unmarked_label_high_score_is_positive() {
        assert_eq!(canonicalize(&RawResult::new("LABEL_2", 0.91)), Label::Positive);
    }

    #[test]
    fn test_neutral_marker_beats_score() {
        assert_eq!(canonicalize(&RawResult::new("neutral", 0.4)), Label::Neutral);
        assert_eq!(canonicalize(&RawResult::new("Neutral", 0.99)), Label::Neutral);
    }

    #[test]
    fn test_marker_vocabularies() {
        assert_eq!(canonicalize(&RawResult::new("POSITIVE", 0.1)), Label::Positive);
        assert_eq!(canonicalize(&RawResult::new("negative", 0.9)), Label::Negative);
        assert_eq!(canonicalize(&RawResult::new("NEG", 0.9)), Label::Negative);
        assert_eq!(canonicalize(&RawResult::new("pos", 0.0)), Label::Positive);
    }

    #[test]
    fn test_marker_priority_order() {
        // A label carrying several markers resolves by priority.
        assert_eq!(canonicalize(&RawResult::new("neg-neu", 0.9)), Label::Neutral);
        assert_eq!(canonicalize(&RawResult::new("neg_or_pos", 0.1)), Label::Positive);
    }

    #[test]
    fn test_score_fallback_threshold() {
        assert_eq!(canonicalize(&RawResult::new("LABEL_0", 0.5)), Label::Positive);
        assert_eq!(canonicalize(&RawResult::new("LABEL_0", 0.4999)), Label::Negative);
        assert_eq!(canonicalize(&RawResult::new("", 0.0)), Label::Negative);
        assert_eq!(canonicalize(&RawResult::new("4 stars", 1.0)), Label::Positive);
    }

    proptest! {
        #[test]
        fn prop_total_and_deterministic(label in ".{0,16}", score in 0.0f64..=1.0) {
            let raw = RawResult::new(label, score);
            let first = canonicalize(&raw);
            prop_assert!(Label::ALL.contains(&first));
            prop_assert_eq!(first, canonicalize(&raw));
        }

        #[test]
        fn prop_fallback_never_neutral(label in "[0-9_ A-MOQ-Z]{0,12}", score in 0.0f64..=1.0) {
            let raw = RawResult::new(label, score);
            prop_assert_ne!(canonicalize(&raw), Label::Neutral);
        }
    }
}
