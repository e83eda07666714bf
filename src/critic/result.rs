use std::collections::BTreeMap;

use crate::critic::summary::FeedbackSummary;

/// Averaged component scores behind a final score.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComponentScores {
    pub structure: f64,
    pub timing: f64,
    pub consistency: f64,
    pub alignment: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<f64>,
}

/// Everything the critic has to say about one frame sequence.
///
/// `score` is always within `0..=1` and `is_valid` is true exactly when `errors` is empty.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResult {
    pub is_valid: bool,
    pub score: f64,
    pub errors: Vec<String>,
    pub feedback: Vec<String>,
    pub suggestions: Vec<String>,
    pub visual_metrics: BTreeMap<String, f64>,
    pub components: ComponentScores,
    pub summary: FeedbackSummary,
}

impl AnalysisResult {
    /// Named metrics recorded as a performance snapshot.
    pub fn metrics(&self) -> BTreeMap<String, f64> {
        let c = &self.components;
        let mut out: BTreeMap<String, f64> = [
            ("score", self.score),
            ("structure", c.structure),
            ("timing", c.timing),
            ("consistency", c.consistency),
            ("alignment", c.alignment),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        if let Some(v) = c.visual {
            out.insert("visual".to_string(), v);
        }
        out
    }
}
