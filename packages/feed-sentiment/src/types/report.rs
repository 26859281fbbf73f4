//! Result of one pipeline run, as handed to export collaborators.

use serde::{Deserialize, Serialize};

use super::item::ClassifiedItem;
use super::label::Label;
use super::summary::{RankedList, Summary};

/// Where the analysed texts came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrigin {
    /// Live feed sources
    Live,
    /// The static sample, requested explicitly
    Sample,
    /// The static sample, substituted because every source came back empty
    Fallback,
}

/// The three pipeline artifacts plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub origin: TextOrigin,
    pub items: Vec<ClassifiedItem>,
    pub summary: Summary,
    pub rankings: Vec<RankedList>,
}

impl Report {
    /// Ranked list for a label, if one was computed.
    pub fn ranking(&self, label: Label) -> Option<&RankedList> {
        self.rankings.iter().find(|r| r.label == label)
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Items were classified and aggregated
    Analyzed(Report),
    /// Classification yielded zero items; nothing was aggregated
    NothingToAnalyze,
}

impl RunOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            RunOutcome::Analyzed(report) => Some(report),
            RunOutcome::NothingToAnalyze => None,
        }
    }
}
