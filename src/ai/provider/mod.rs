//! Generation Provider Abstraction
//!
//! Defines the uniform contract every text-generation backend satisfies:
//! system instruction plus user content in, raw text out. Adapters translate
//! the contract into each backend's wire protocol and normalize errors into
//! the crate taxonomy.
//!
//! ## Adapters
//!
//! - `openai`: chat-completion style (two-message array, choices envelope)
//! - `gemini`: single-turn generation style (concatenated prompt, candidates
//!   envelope)

mod gemini;
mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::constants::{generation, network};
use crate::types::{ModelDescriptor, ProviderIdentity, Result};

/// Shared provider handle for dispatch by the orchestrator
pub type SharedProvider = Arc<dyn GenerationProvider>;

/// Uniform request/response contract for a generation backend
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Which backend this adapter speaks to
    fn identity(&self) -> ProviderIdentity;

    /// Execute one generation request and return the raw generated text.
    ///
    /// A successful response with an empty or missing text field yields an
    /// empty string, not an error: a malformed-but-200 response is not a
    /// hard failure at this layer.
    async fn execute(
        &self,
        credential: &SecretString,
        model: &str,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String>;

    /// Query the backend's model-listing endpoint.
    ///
    /// Errors propagate here; the model catalog absorbs them into a
    /// best-effort refresh.
    async fn list_models(&self, credential: &SecretString) -> Result<Vec<ModelDescriptor>>;
}

/// Adapter construction parameters
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base URL override (defaults to the backend's public endpoint)
    pub api_base: Option<String>,
    /// Sampling temperature. Kept low for factual documentation output.
    pub temperature: f32,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            temperature: generation::TEMPERATURE,
            timeout: Duration::from_secs(network::GENERATION_TIMEOUT_SECS),
        }
    }
}

/// Create the adapter for a provider identity
pub fn create_provider(
    identity: ProviderIdentity,
    config: ProviderConfig,
) -> Result<SharedProvider> {
    match identity {
        ProviderIdentity::OpenAi => Ok(Arc::new(OpenAiProvider::new(config)?)),
        ProviderIdentity::Gemini => Ok(Arc::new(GeminiProvider::new(config)?)),
    }
}
