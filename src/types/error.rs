//! Unified Error Type System
//!
//! Centralized error types for the entire crate.
//!
//! ## Error Taxonomy
//!
//! - **Config**: missing credential for the active provider. Surfaced before
//!   any network attempt, never retried.
//! - **RepoReference**: malformed repository reference string. Fails fast.
//! - **Transport**: network-level failure reaching any endpoint.
//! - **RateLimit**: repository host responded 403.
//! - **NotFound**: repository host responded 404.
//! - **Provider**: generation backend responded non-success, with the
//!   backend's own error message where one could be extracted.
//!
//! A JSON-parse failure on a composite generation response is deliberately
//! NOT an error: the orchestrator absorbs it into its fallback mapping.
//!
//! ## Design Principles
//!
//! - Single unified error type (`DocForgeError`) for the whole crate
//! - No automatic retries anywhere: every layer reports and stops
//! - No panic/unwrap in library paths - all errors are propagated

use std::time::Duration;

use thiserror::Error;

use super::ProviderIdentity;

#[derive(Debug, Error)]
pub enum DocForgeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration & Input Errors (no network attempted)
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid repository reference: {0}")]
    RepoReference(String),

    // -------------------------------------------------------------------------
    // Repository Host Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    RateLimit(String),

    #[error("{0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // Generation & Transport Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{} error: {message}", .provider.display_name())]
    Provider {
        provider: ProviderIdentity,
        message: String,
    },

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Settings Persistence
    // -------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for DocForgeError {
    fn from(err: reqwest::Error) -> Self {
        DocForgeError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocForgeError>;

// =============================================================================
// Helper Constructors
// =============================================================================

impl DocForgeError {
    /// Missing credential for the active provider. Names the provider so the
    /// user knows which key to add.
    pub fn missing_credential(provider: ProviderIdentity) -> Self {
        Self::Config(format!(
            "Please configure your {} API key in settings.",
            provider.display_name()
        ))
    }

    /// Create a provider-reported failure
    pub fn provider(provider: ProviderIdentity, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// True for failures the user fixes by changing configuration, not by
    /// retrying
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::RepoReference(_))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_names_provider() {
        let err = DocForgeError::missing_credential(ProviderIdentity::OpenAi);
        assert!(err.to_string().contains("OpenAI"));
        assert!(err.is_configuration());

        let err = DocForgeError::missing_credential(ProviderIdentity::Gemini);
        assert!(err.to_string().contains("Google Gemini"));
    }

    #[test]
    fn test_provider_error_display() {
        let err = DocForgeError::provider(ProviderIdentity::Gemini, "model overloaded");
        assert_eq!(err.to_string(), "Google Gemini error: model overloaded");
    }

    #[test]
    fn test_timeout_display() {
        let err = DocForgeError::timeout("documentation generation", Duration::from_secs(120));
        assert!(err.to_string().contains("documentation generation"));
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_repo_reference_is_configuration() {
        let err = DocForgeError::RepoReference("not a url".to_string());
        assert!(err.is_configuration());
        assert!(!DocForgeError::Transport("dns failure".to_string()).is_configuration());
    }
}
