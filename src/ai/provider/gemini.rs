//! Google Gemini API Adapter
//!
//! Single-turn generation style backend. Gemini does not reliably honor a
//! separate system-instruction field across all model versions, so the
//! system instruction is prepended to the user content as one text block.
//! Generated text is extracted from the first candidate's first content part.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{GenerationProvider, ProviderConfig};
use crate::types::{DocForgeError, ModelDescriptor, ProviderIdentity, Result};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GENERIC_FAILURE: &str = "Failed to generate docs with Gemini";

/// Name substring marking the Gemini model family
const FAMILY_MARKER: &str = "gemini";

pub struct GeminiProvider {
    api_base: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiProvider {
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

    /// Gemini errors arrive in two shapes: a nested `error.message` or a
    /// top-level `message`. Try both before falling back.
    fn extract_error_message(body: &str) -> String {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return GENERIC_FAILURE.to_string();
        };
        value
            .pointer("/error/message")
            .and_then(Value::as_str)
            .or_else(|| value.get("message").and_then(Value::as_str))
            .map(String::from)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity::Gemini
    }

    async fn execute(
        &self,
        credential: &SecretString,
        model: &str,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String> {
        info!(
            "Generating with Gemini (model: {}, temperature: {})",
            model, self.temperature
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}\n\nTask:\n{}", system_instruction, user_content),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        // The key travels as a query parameter, never in the URL string we
        // format or log.
        let url = format!("{}/models/{}:generateContent", self.api_base, model);
        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", credential.expose_secret())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DocForgeError::Transport(format!("Gemini request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocForgeError::provider(
                ProviderIdentity::Gemini,
                Self::extract_error_message(&body),
            ));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            DocForgeError::provider(
                ProviderIdentity::Gemini,
                format!("Unreadable response envelope: {}", e),
            )
        })?;

        // Missing candidates or parts in a 200 degrade to an empty string
        Ok(extract_text(body))
    }

    async fn list_models(&self, credential: &SecretString) -> Result<Vec<ModelDescriptor>> {
        let url = format!("{}/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .query(&[("key", credential.expose_secret())])
            .send()
            .await
            .map_err(|e| {
                DocForgeError::Transport(format!("Gemini model listing failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(DocForgeError::provider(
                ProviderIdentity::Gemini,
                format!("Model listing failed ({})", response.status()),
            ));
        }

        let body: ModelListResponse = response.json().await.map_err(|e| {
            DocForgeError::provider(
                ProviderIdentity::Gemini,
                format!("Unreadable model listing: {}", e),
            )
        })?;

        Ok(filter_generation_models(body.models))
    }
}

fn extract_text(body: GenerateContentResponse) -> String {
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .unwrap_or_default()
}

/// Keep only family models that support content generation, stripping the
/// `models/` resource prefix from identifiers
fn filter_generation_models(entries: Vec<ModelInfo>) -> Vec<ModelDescriptor> {
    entries
        .into_iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
                && m.name.contains(FAMILY_MARKER)
        })
        .map(|m| {
            let identifier = m.name.strip_prefix("models/").unwrap_or(&m.name).to_string();
            let display_name = m.display_name.unwrap_or_else(|| identifier.clone());
            ModelDescriptor::new(identifier, display_name, ProviderIdentity::Gemini)
        })
        .collect()
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_nested_shape() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#;
        assert_eq!(
            GeminiProvider::extract_error_message(body),
            "API key not valid"
        );
    }

    #[test]
    fn test_extract_error_message_flat_shape() {
        let body = r#"{"message": "quota exhausted"}"#;
        assert_eq!(GeminiProvider::extract_error_message(body), "quota exhausted");
    }

    #[test]
    fn test_extract_error_message_falls_back() {
        assert_eq!(
            GeminiProvider::extract_error_message("not json at all"),
            GENERIC_FAILURE
        );
    }

    #[test]
    fn test_extract_text_from_candidates() {
        let body: GenerateContentResponse = serde_json::from_str(
            r##"{"candidates": [{"content": {"parts": [{"text": "# Docs"}]}}]}"##,
        )
        .unwrap();
        assert_eq!(extract_text(body), "# Docs");
    }

    #[test]
    fn test_missing_candidates_degrade_to_empty_string() {
        let body: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(body), "");

        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert_eq!(extract_text(body), "");
    }

    #[test]
    fn test_listing_filter_requires_capability_and_family() {
        let entries = vec![
            ModelInfo {
                name: "models/gemini-1.5-pro".into(),
                display_name: Some("Gemini 1.5 Pro".into()),
                supported_generation_methods: vec!["generateContent".into()],
            },
            ModelInfo {
                name: "models/embedding-001".into(),
                display_name: None,
                supported_generation_methods: vec!["embedContent".into()],
            },
            ModelInfo {
                name: "models/gemini-embedding".into(),
                display_name: None,
                supported_generation_methods: vec!["embedContent".into()],
            },
        ];
        let models = filter_generation_models(entries);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].identifier, "gemini-1.5-pro");
        assert_eq!(models[0].display_name, "Gemini 1.5 Pro");
        assert_eq!(models[0].provider, ProviderIdentity::Gemini);
    }

    #[test]
    fn test_listing_strips_resource_prefix() {
        let entries = vec![ModelInfo {
            name: "models/gemini-1.5-flash".into(),
            display_name: None,
            supported_generation_methods: vec!["generateContent".into()],
        }];
        let models = filter_generation_models(entries);
        assert_eq!(models[0].identifier, "gemini-1.5-flash");
        assert_eq!(models[0].display_name, "gemini-1.5-flash");
    }
}
