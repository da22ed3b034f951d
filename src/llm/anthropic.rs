//! Anthropic Messages API transport for the model boundary.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::boundary::{ModelBoundary, ModelTurn, TurnRequest};
use super::prompts;
use crate::error::BoundaryError;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const PROVIDER: &str = "anthropic";

/// Model boundary backed by the Anthropic Messages API.
pub struct AnthropicBoundary {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl AnthropicBoundary {
    pub fn new(api_key: SecretString, model: &str, max_tokens: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.to_string(),
            max_tokens,
        }
    }

    /// Render the user-side message: recent history plus the latest answer.
    fn user_message(request: &TurnRequest) -> String {
        let mut lines: Vec<String> = request
            .history
            .iter()
            .map(|entry| format!("{}: {}", entry.role, entry.content))
            .collect();
        match &request.answer_text {
            Some(answer) => lines.push(format!("respondent (latest): {answer}")),
            None => lines.push("(no answer yet — open the conversation)".to_string()),
        }
        lines.join("\n")
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ModelBoundary for AnthropicBoundary {
    async fn next_turn(&self, request: &TurnRequest) -> Result<ModelTurn, BoundaryError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": prompts::system_prompt(request),
            "messages": [{"role": "user", "content": Self::user_message(request)}],
        });

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| BoundaryError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BoundaryError::AuthFailed {
                provider: PROVIDER.to_string(),
            });
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BoundaryError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP {status}: {text}"),
            });
        }

        let parsed: MessagesResponse =
            response
                .json()
                .await
                .map_err(|e| BoundaryError::InvalidResponse {
                    provider: PROVIDER.to_string(),
                    reason: e.to_string(),
                })?;

        let text = parsed
            .content
            .first()
            .map(|block| block.text.as_str())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(BoundaryError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "empty content".to_string(),
            });
        }

        prompts::parse_model_reply(text)
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friction::Strategy;
    use crate::relevance::Archetype;

    #[test]
    fn user_message_includes_history_and_answer() {
        let request = TurnRequest {
            turn_number: 2,
            profile: serde_json::json!({}),
            history: vec![super::super::boundary::HistoryEntry {
                role: "asker".to_string(),
                content: "What's the title?".to_string(),
            }],
            answer_text: Some("Line Cook".to_string()),
            archetype: Archetype::HourlyService,
            relevant_fields: Vec::new(),
            skipped_fields: Vec::new(),
            strategy: Strategy::Standard,
            should_pivot: false,
            deferred_topics: Vec::new(),
            completion: 0,
        };
        let message = AnthropicBoundary::user_message(&request);
        assert!(message.contains("asker: What's the title?"));
        assert!(message.contains("respondent (latest): Line Cook"));
    }
}
