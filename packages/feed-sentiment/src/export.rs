//! On-disk export of a run report.
//!
//! Consumes the artifacts in a [`Report`] as-is; nothing is recomputed here.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExportResult;
use crate::types::item::ClassifiedItem;
use crate::types::label::Label;
use crate::types::report::{Report, TextOrigin};
use crate::types::summary::Summary;

const ANALYSIS_CSV: &str = "analysis.csv";
const ANALYSIS_JSON: &str = "analysis.json";
const SUMMARY_JSON: &str = "summary.json";

const CSV_HEADER: [&str; 3] = ["Text", "Sentiment", "Score"];

/// Paths written by [`write_report`].
#[derive(Debug, Clone, Default)]
pub struct ExportedFiles {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl ExportedFiles {
    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|p| p.file_name().is_some_and(|f| f == name))
    }
}

#[derive(Serialize)]
struct AnalysisRecord<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
    #[serde(rename = "Sentiment")]
    sentiment: Label,
    #[serde(rename = "Score")]
    score: f64,
}

impl<'a> From<&'a ClassifiedItem> for AnalysisRecord<'a> {
    fn from(item: &'a ClassifiedItem) -> Self {
        Self {
            text: &item.text,
            sentiment: item.label,
            score: item.score,
        }
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    origin: TextOrigin,
    #[serde(flatten)]
    summary: &'a Summary,
}

/// Write the report into `dir`, creating it if needed.
///
/// Ranked lists are written for the positive and negative labels only, and
/// only when non-empty.
pub fn write_report(report: &Report, dir: &Path) -> ExportResult<ExportedFiles> {
    fs::create_dir_all(dir)?;
    let mut exported = ExportedFiles {
        dir: dir.to_path_buf(),
        files: Vec::new(),
    };

    let path = dir.join(ANALYSIS_CSV);
    write_items_csv(&path, &report.items)?;
    exported.files.push(path);

    let path = dir.join(ANALYSIS_JSON);
    let records: Vec<AnalysisRecord> = report.items.iter().map(AnalysisRecord::from).collect();
    fs::write(&path, serde_json::to_vec_pretty(&records)?)?;
    exported.files.push(path);

    let path = dir.join(SUMMARY_JSON);
    let document = SummaryDocument {
        origin: report.origin,
        summary: &report.summary,
    };
    fs::write(&path, serde_json::to_vec_pretty(&document)?)?;
    exported.files.push(path);

    for label in [Label::Positive, Label::Negative] {
        let Some(ranking) = report.ranking(label).filter(|r| !r.is_empty()) else {
            continue;
        };
        let path = dir.join(format!("top_{}.csv", label.as_str().to_lowercase()));
        write_items_csv(&path, &ranking.items)?;
        exported.files.push(path);
    }

    info!(dir = %dir.display(), files = exported.files.len(), "Report exported");
    Ok(exported)
}

fn write_items_csv(path: &Path, items: &[ClassifiedItem]) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for item in items {
        let score = format!("{:.3}", item.score);
        writer.write_record([item.text.as_str(), item.label.as_str(), score.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
