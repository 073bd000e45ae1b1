//! OpenAI API Adapter
//!
//! Chat-completion style backend: sends a two-message array (system role +
//! user role) and extracts generated text from the first choice's message
//! content.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{GenerationProvider, ProviderConfig};
use crate::types::{DocForgeError, ModelDescriptor, ProviderIdentity, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const GENERIC_FAILURE: &str = "Failed to generate docs with OpenAI";

/// Identifier substrings that mark chat-capable model families. Listing is
/// filtered to these to exclude embedding and audio models.
const CHAT_MODEL_MARKERS: &[&str] = &["gpt-4", "gpt-3.5"];

pub struct OpenAiProvider {
    api_base: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_base = config
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DocForgeError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_base,
            temperature: config.temperature,
            client,
        })
    }

    /// Pull the provider-supplied message out of an error envelope, falling
    /// back to a generic failure string when the envelope is unreadable.
    fn extract_error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity::OpenAi
    }

    async fn execute(
        &self,
        credential: &SecretString,
        model: &str,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String> {
        info!(
            "Generating with OpenAI (model: {}, temperature: {})",
            model, self.temperature
        );

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instruction.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_content.to_string(),
                },
            ],
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", credential.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DocForgeError::Transport(format!("OpenAI request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocForgeError::provider(
                ProviderIdentity::OpenAi,
                Self::extract_error_message(&body),
            ));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            DocForgeError::provider(
                ProviderIdentity::OpenAi,
                format!("Unreadable response envelope: {}", e),
            )
        })?;

        // Missing content in a 200 degrades to an empty string
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    async fn list_models(&self, credential: &SecretString) -> Result<Vec<ModelDescriptor>> {
        let url = format!("{}/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", credential.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| {
                DocForgeError::Transport(format!("OpenAI model listing failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(DocForgeError::provider(
                ProviderIdentity::OpenAi,
                format!("Model listing failed ({})", response.status()),
            ));
        }

        let body: ModelListResponse = response.json().await.map_err(|e| {
            DocForgeError::provider(
                ProviderIdentity::OpenAi,
                format!("Unreadable model listing: {}", e),
            )
        })?;

        Ok(filter_chat_models(body.data))
    }
}

/// Keep only chat-family models, sorted lexicographically for determinism
fn filter_chat_models(entries: Vec<ModelEntry>) -> Vec<ModelDescriptor> {
    let mut models: Vec<ModelDescriptor> = entries
        .into_iter()
        .filter(|m| CHAT_MODEL_MARKERS.iter().any(|marker| m.id.contains(marker)))
        .map(|m| ModelDescriptor::new(m.id.clone(), m.id, ProviderIdentity::OpenAi))
        .collect();
    models.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    models
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_from_envelope() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            OpenAiProvider::extract_error_message(body),
            "Incorrect API key provided"
        );
    }

    #[test]
    fn test_extract_error_message_falls_back() {
        assert_eq!(
            OpenAiProvider::extract_error_message("<html>gateway error</html>"),
            GENERIC_FAILURE
        );
        assert_eq!(
            OpenAiProvider::extract_error_message(r#"{"unexpected": true}"#),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn test_empty_content_in_success_envelope() {
        let body: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        assert_eq!(text, "");
    }

    #[test]
    fn test_listing_filters_and_sorts_chat_models() {
        let entries = vec![
            ModelEntry { id: "gpt-4o".into() },
            ModelEntry { id: "text-embedding-3-small".into() },
            ModelEntry { id: "gpt-3.5-turbo".into() },
            ModelEntry { id: "whisper-1".into() },
            ModelEntry { id: "gpt-4-turbo".into() },
        ];
        let models = filter_chat_models(entries);
        let ids: Vec<&str> = models.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(ids, vec!["gpt-3.5-turbo", "gpt-4-turbo", "gpt-4o"]);
        assert!(models.iter().all(|m| m.provider == ProviderIdentity::OpenAi));
    }
}
