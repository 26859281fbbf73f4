//! Sentiment labels: the oracle's raw vocabulary and the canonical taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical sentiment label.
///
/// The closed output taxonomy. Every classified item carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// All labels, in reporting order.
    pub const ALL: [Label; 3] = [Label::Positive, Label::Negative, Label::Neutral];

    /// Upper-case name as used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
            Label::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One answer from the classification oracle, before canonicalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// Label in the model's own vocabulary (e.g. "LABEL_2", "positive")
    pub label: String,

    /// Confidence in [0, 1]
    pub score: f64,
}

impl RawResult {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serializes_upper_case() {
        let json = serde_json::to_string(&Label::Neutral).unwrap();
        assert_eq!(json, "\"NEUTRAL\"");

        let label: Label = serde_json::from_str("\"NEGATIVE\"").unwrap();
        assert_eq!(label, Label::Negative);
    }

    #[test]
    fn test_display_matches_as_str() {
        for label in Label::ALL {
            assert_eq!(label.to_string(), label.as_str());
        }
    }
}
