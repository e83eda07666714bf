use crate::{
    critique::{CritiqueProvider, CritiqueRequest, CritiqueResponse},
    foundation::error::VennResult,
};

/// Deterministic critique derived from metric thresholds.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleBasedCritique;

impl RuleBasedCritique {
    pub fn respond(&self, request: &CritiqueRequest) -> CritiqueResponse {
        let metric = |k: &str| request.metrics.get(k).copied();
        let mut out = CritiqueResponse::default();

        if let Some(b) = metric("brightness") {
            if (b - 0.5).abs() <= 0.25 {
                out.positive_feedback.push("Balanced overall brightness".to_string());
            } else if b < 0.5 {
                out.improvements.push("The composition reads too dark".to_string());
                out.suggestions
                    .push("Use lighter fills or a lighter background".to_string());
            } else {
                out.improvements.push("The composition reads too bright".to_string());
                out.suggestions
                    .push("Use deeper fills or a darker background".to_string());
            }
        }
        if let Some(c) = metric("contrast") {
            if c >= 0.3 {
                out.positive_feedback
                    .push("Shapes stand out clearly from the background".to_string());
            } else {
                out.improvements.push("Contrast between shapes is low".to_string());
                out.suggestions
                    .push("Increase the luminance difference between circles and background".to_string());
            }
        }
        if let Some(s) = metric("saturation") {
            if s < 0.3 {
                out.suggestions.push("Use more saturated colors".to_string());
            } else if s > 0.8 {
                out.suggestions.push("Tone down oversaturated colors".to_string());
            } else {
                out.positive_feedback.push("Pleasant color saturation".to_string());
            }
        }
        if metric("color_variety").is_some_and(|v| v < 0.3) {
            out.suggestions
                .push("Introduce more distinct colors across circles".to_string());
        }
        if metric("distribution_score").is_some_and(|d| d < 0.5) {
            out.suggestions
                .push("Space circles more evenly around the center".to_string());
        }

        out.improvements.extend(request.issues.iter().cloned());
        out
    }
}

impl CritiqueProvider for RuleBasedCritique {
    fn name(&self) -> &str {
        "rules"
    }

    fn critique(&self, request: &CritiqueRequest) -> VennResult<CritiqueResponse> {
        Ok(self.respond(request))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/critique/rules.rs"]
mod tests;
