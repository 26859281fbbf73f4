//! Inference API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Text Classification
// =============================================================================

/// Text classification request.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRequest {
    /// Texts to classify, answered in the same order
    pub inputs: Vec<String>,

    /// Pipeline parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ClassificationParameters>,

    /// Request options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,
}

impl ClassificationRequest {
    /// Create a request for the given inputs.
    pub fn new(inputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            parameters: None,
            options: None,
        }
    }

    /// Truncate inputs longer than the model's context.
    pub fn truncate(mut self) -> Self {
        self.parameters
            .get_or_insert_with(ClassificationParameters::default)
            .truncation = Some(true);
        self
    }

    /// Block until a cold model is loaded instead of returning 503.
    pub fn wait_for_model(mut self) -> Self {
        self.options
            .get_or_insert_with(RequestOptions::default)
            .wait_for_model = Some(true);
        self
    }
}

/// Parameters forwarded to the classification pipeline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<bool>,
}

/// Request-level options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_model: Option<bool>,
}

/// One label candidate with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    #[serde(default)]
    pub label: String,
    pub score: f64,
}

/// Raw classification response.
///
/// Depending on the model, the API answers with either one
/// candidate list per input or a single candidate per input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassificationResponseRaw {
    Ranked(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponseRaw {
    /// Best candidate per input, `None` where the API sent no candidates.
    pub(crate) fn into_top(self) -> Vec<Option<LabelScore>> {
        match self {
            ClassificationResponseRaw::Flat(items) => items.into_iter().map(Some).collect(),
            ClassificationResponseRaw::Ranked(lists) => lists
                .into_iter()
                .map(|candidates| {
                    candidates
                        .into_iter()
                        .max_by(|a, b| a.score.total_cmp(&b.score))
                })
                .collect(),
        }
    }
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ClassificationRequest::new(["a", "b"]).truncate().wait_for_model();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["inputs"], serde_json::json!(["a", "b"]));
        assert_eq!(json["parameters"]["truncation"], true);
        assert_eq!(json["options"]["wait_for_model"], true);

        let bare = serde_json::to_value(ClassificationRequest::new(["a"])).unwrap();
        assert!(bare.get("parameters").is_none());
        assert!(bare.get("options").is_none());
    }

    #[test]
    fn test_ranked_response_picks_highest_score() {
        let body = r#"[
            [{"label": "negative", "score": 0.1}, {"label": "positive", "score": 0.8}, {"label": "neutral", "score": 0.1}],
            [{"label": "negative", "score": 0.7}, {"label": "positive", "score": 0.3}]
        ]"#;
        let raw: ClassificationResponseRaw = serde_json::from_str(body).unwrap();
        let top = raw.into_top();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].as_ref().unwrap().label, "positive");
        assert_eq!(top[1].as_ref().unwrap().label, "negative");
    }

    #[test]
    fn test_flat_response() {
        let body = r#"[{"label": "POSITIVE", "score": 0.99}, {"label": "NEGATIVE", "score": 0.6}]"#;
        let raw: ClassificationResponseRaw = serde_json::from_str(body).unwrap();
        let top = raw.into_top();

        assert_eq!(top[1], Some(LabelScore { label: "NEGATIVE".into(), score: 0.6 }));
    }

    #[test]
    fn test_empty_candidate_list() {
        let raw: ClassificationResponseRaw = serde_json::from_str("[[]]").unwrap();
        assert_eq!(raw.into_top(), vec![None]);
    }
}
