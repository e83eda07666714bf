use std::time::Duration;

use serde_json::{Value, json};

use crate::{
    critique::{CritiqueProvider, CritiqueRequest, CritiqueResponse},
    foundation::error::{VennError, VennResult},
};

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const API_VERSION: &str = "2023-06-01";
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Critique backed by the Anthropic messages API.
///
/// Calls are blocking and bounded by the client timeout. The model is asked to answer with a JSON
/// object matching [`CritiqueResponse`]; anything else is reported as a collaborator error.
#[derive(Debug, Clone)]
pub struct AnthropicCritique {
    client: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl AnthropicCritique {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> VennResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(VennError::validation("anthropic api key must not be empty"));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VennError::collaborator(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Build from `ANTHROPIC_API_KEY`; a missing key is a collaborator error.
    pub fn from_env(timeout: Duration) -> VennResult<Self> {
        let key = std::env::var(API_KEY_VAR)
            .map_err(|_| VennError::collaborator(format!("{API_KEY_VAR} is not set")))?;
        Self::new(key, timeout)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn payload(&self, request: &CritiqueRequest) -> VennResult<Value> {
        let body = serde_json::to_string(request)?;
        Ok(json!({
            "model": self.model,
            "max_tokens": 512,
            "system": "You review simple animated circle compositions. Reply with only a JSON \
                       object with the keys positive_feedback, improvements and suggestions, \
                       each an array of short strings.",
            "messages": [{ "role": "user", "content": body }],
        }))
    }
}

/// Pull the critique out of a messages API response body.
pub(crate) fn parse_response(data: &Value) -> VennResult<CritiqueResponse> {
    let text = data["content"][0]["text"].as_str().ok_or_else(|| {
        VennError::collaborator("failed to extract content from anthropic response")
    })?;
    let start = text.find('{');
    let end = text.rfind('}');
    let json_text = match (start, end) {
        (Some(s), Some(e)) if s < e => &text[s..=e],
        _ => {
            return Err(VennError::collaborator(
                "anthropic response did not contain a JSON object",
            ));
        }
    };
    serde_json::from_str(json_text)
        .map_err(|e| VennError::collaborator(format!("malformed critique JSON: {e}")))
}

impl CritiqueProvider for AnthropicCritique {
    fn name(&self) -> &str {
        "anthropic"
    }

    #[tracing::instrument(skip_all, fields(model = %self.model))]
    fn critique(&self, request: &CritiqueRequest) -> VennResult<CritiqueResponse> {
        let payload = self.payload(request)?;
        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| VennError::collaborator(format!("anthropic request failed: {e}")))?;

        let status = resp.status();
        tracing::debug!(%status, "anthropic response");
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(VennError::collaborator(format!(
                "anthropic api error {status}: {body}"
            )));
        }
        let data: Value = resp
            .json()
            .map_err(|e| VennError::collaborator(format!("failed to parse JSON response: {e}")))?;
        parse_response(&data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/critique/anthropic.rs"]
mod tests;
