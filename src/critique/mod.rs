//! Prose observations about visual metrics.
//!
//! A [`CritiqueProvider`] is injected into the visual analyzer. Remote providers may fail in many
//! ways; [`critique_with_fallback`] always produces a response by falling back to
//! [`RuleBasedCritique`].

use std::collections::BTreeMap;

use crate::foundation::error::VennResult;

pub mod anthropic;
pub mod rules;

pub use anthropic::AnthropicCritique;
pub use rules::RuleBasedCritique;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CritiqueRequest {
    pub metrics: BTreeMap<String, f64>,
    pub issues: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CritiqueResponse {
    #[serde(default)]
    pub positive_feedback: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

pub trait CritiqueProvider: Send + Sync {
    fn name(&self) -> &str;

    fn critique(&self, request: &CritiqueRequest) -> VennResult<CritiqueResponse>;
}

/// Ask `provider`, falling back to the rule-based critique on any failure.
pub fn critique_with_fallback(
    provider: Option<&dyn CritiqueProvider>,
    request: &CritiqueRequest,
) -> CritiqueResponse {
    let fallback = RuleBasedCritique;
    let Some(provider) = provider else {
        return fallback.respond(request);
    };
    match provider.critique(request) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                kind = e.kind(),
                error = %e,
                "critique provider failed; using rule-based critique"
            );
            fallback.respond(request)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/critique/mod.rs"]
mod tests;
