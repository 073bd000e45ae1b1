//! Generation Orchestrator
//!
//! Selects the provider adapter for the active model, invokes it with the
//! assembled prompt, and for the composite "all kinds" request parses the
//! returned text as a multi-document JSON payload.
//!
//! ## Parse/fallback policy
//!
//! A single-kind response is returned verbatim: opaque markdown, no parsing,
//! no validation. A composite response is parsed as JSON after stripping an
//! optional markdown code fence (some backends wrap JSON replies despite
//! instruction). Parse failure is absorbed, never raised: every known kind
//! is mapped to the raw text so the caller always has something to show,
//! and `fallback_used` is set so the degradation stays observable.
//!
//! The orchestrator owns no persistent state. It reads settings, performs
//! the one outbound call, and returns.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::provider::{self, GenerationProvider, ProviderConfig, SharedProvider};
use super::timeout::{TimeoutConfig, with_timeout};
use super::{models::ModelCatalog, prompt};
use crate::settings::SettingsStore;
use crate::types::{
    CompositeDocs, DocForgeError, DocumentKind, GenerationRequest, GenerationResult,
    ProviderIdentity, Result,
};

pub struct Orchestrator {
    settings: Arc<dyn SettingsStore>,
    providers: Vec<SharedProvider>,
    timeouts: TimeoutConfig,
}

impl Orchestrator {
    /// Orchestrator with the built-in adapters for both providers
    pub fn new(settings: Arc<dyn SettingsStore>) -> Result<Self> {
        let providers = vec![
            provider::create_provider(ProviderIdentity::OpenAi, ProviderConfig::default())?,
            provider::create_provider(ProviderIdentity::Gemini, ProviderConfig::default())?,
        ];
        Ok(Self::with_providers(settings, providers, TimeoutConfig::default()))
    }

    /// Orchestrator over explicit adapters, for embedders and tests
    pub fn with_providers(
        settings: Arc<dyn SettingsStore>,
        providers: Vec<SharedProvider>,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            settings,
            providers,
            timeouts,
        }
    }

    fn provider_for(&self, identity: ProviderIdentity) -> Result<&SharedProvider> {
        self.providers
            .iter()
            .find(|p| p.identity() == identity)
            .ok_or_else(|| {
                DocForgeError::Config(format!("No adapter registered for {}", identity))
            })
    }

    /// Generate the requested documentation artifact(s).
    ///
    /// Precondition: the active provider must have a credential in the
    /// settings store. Absence fails with a configuration error naming the
    /// provider, before any network call.
    pub async fn generate_docs(&self, request: GenerationRequest) -> Result<GenerationResult> {
        let model = self.settings.selected_model();
        let credential = self
            .settings
            .credential(model.provider)
            .ok_or_else(|| DocForgeError::missing_credential(model.provider))?;

        let system_instruction = prompt::system_instruction(request.kind);
        let user_content = compose_user_content(&request);
        let adapter = self.provider_for(model.provider)?;

        info!(
            "Generating {} docs via {} ({})",
            request.kind, model.provider, model.identifier
        );

        let raw = with_timeout(
            self.timeouts.generation,
            adapter.execute(&credential, &model.identifier, system_instruction, &user_content),
            "documentation generation",
        )
        .await?;

        if request.kind.is_composite() {
            Ok(GenerationResult::Composite(parse_composite(&raw)))
        } else {
            // Opaque markdown: returned unchanged, empty string included
            Ok(GenerationResult::Single(raw))
        }
    }

    /// Best-effort model refresh for the catalog's active provider.
    ///
    /// Skipped silently without a credential; listing failures are absorbed
    /// by the catalog. Never raises, never blocks generation.
    pub async fn refresh_models(&self, catalog: &mut ModelCatalog) {
        let identity = catalog.active_provider();
        let Some(credential) = self.settings.credential(identity) else {
            debug!("No credential for {}, skipping model refresh", identity);
            return;
        };
        let Ok(adapter) = self.provider_for(identity) else {
            return;
        };
        catalog.refresh(adapter.as_ref(), &credential).await;
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("providers", &self.providers.len())
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

// =============================================================================
// User Content Composition
// =============================================================================

fn compose_user_content(request: &GenerationRequest) -> String {
    let mut content = format!(
        "Here is the source code:\n\n```\n{}\n```",
        request.assembled_content
    );

    if request.kind == DocumentKind::Update
        && let Some(prior) = &request.prior_artifact
    {
        content.push_str(&format!(
            "\n\nHere is the EXISTING documentation:\n\n```markdown\n{}\n```",
            prior
        ));
    }

    if let Some(extra) = &request.supplementary_context {
        content.push_str(&format!("\n\nAdditional Context/Instructions:\n{}", extra));
    }

    content
}

// =============================================================================
// Composite Parsing
// =============================================================================

/// Parse a composite response, applying the fallback policy on failure.
///
/// Recognized keys with string values become sections; unknown keys and
/// non-string values are ignored rather than failing the whole payload. A
/// partial mapping is accepted as-is; absent kinds are not backfilled.
fn parse_composite(raw: &str) -> CompositeDocs {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<serde_json::Value>(cleaned) {
        Ok(serde_json::Value::Object(object)) => {
            let sections: BTreeMap<DocumentKind, String> = object
                .into_iter()
                .filter_map(|(key, value)| {
                    let kind = DocumentKind::from_key(&key)?;
                    let text = value.as_str()?.to_string();
                    Some((kind, text))
                })
                .collect();
            CompositeDocs {
                sections,
                fallback_used: false,
            }
        }
        _ => {
            warn!("Composite response was not a JSON object; applying fallback mapping");
            CompositeDocs {
                sections: DocumentKind::SINGLE_KINDS
                    .into_iter()
                    .map(|kind| (kind, raw.to_string()))
                    .collect(),
                fallback_used: true,
            }
        }
    }
}

/// Strip one optional leading/trailing markdown code fence (```json ... ```)
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if text.starts_with("```") {
        text = match text.find('\n') {
            Some(newline) => &text[newline + 1..],
            None => text.trim_start_matches('`'),
        };
    }

    if let Some(stripped) = text.trim_end().strip_suffix("```") {
        text = stripped;
    }

    text.trim()
}

// =============================================================================
// Tests
// =============================================================================
