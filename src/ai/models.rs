//! Model Catalog
//!
//! The set of selectable models and the current selection. A static built-in
//! set exists at startup; a best-effort refresh may replace the entries of
//! the active provider from its model-listing endpoint, leaving entries for
//! other providers untouched.
//!
//! Invariant: the selection always belongs to the active provider. The active
//! provider IS the selection's owning provider, so switching providers goes
//! through [`ModelCatalog::switch_provider`], which re-selects that
//! provider's default.

use secrecy::SecretString;
use tracing::{debug, warn};

use crate::ai::provider::GenerationProvider;
use crate::types::{ModelDescriptor, ProviderIdentity};

/// Built-in model set available before any refresh
pub fn builtin_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("gemini-1.5-flash", "Gemini 1.5 Flash", ProviderIdentity::Gemini),
        ModelDescriptor::new(
            "gemini-1.5-flash-001",
            "Gemini 1.5 Flash (001)",
            ProviderIdentity::Gemini,
        ),
        ModelDescriptor::new("gemini-1.5-pro", "Gemini 1.5 Pro", ProviderIdentity::Gemini),
        ModelDescriptor::new(
            "gemini-1.5-pro-001",
            "Gemini 1.5 Pro (001)",
            ProviderIdentity::Gemini,
        ),
        ModelDescriptor::new("gemini-pro", "Gemini Pro 1.0", ProviderIdentity::Gemini),
        ModelDescriptor::new("gpt-4o", "GPT-4o", ProviderIdentity::OpenAi),
        ModelDescriptor::new("gpt-4-turbo", "GPT-4 Turbo", ProviderIdentity::OpenAi),
        ModelDescriptor::new("gpt-3.5-turbo", "GPT-3.5 Turbo", ProviderIdentity::OpenAi),
    ]
}

/// Built-in default model for a provider
pub fn default_for(provider: ProviderIdentity) -> ModelDescriptor {
    match provider {
        ProviderIdentity::OpenAi => {
            ModelDescriptor::new("gpt-4o", "GPT-4o", ProviderIdentity::OpenAi)
        }
        ProviderIdentity::Gemini => {
            ModelDescriptor::new("gemini-1.5-flash", "Gemini 1.5 Flash", ProviderIdentity::Gemini)
        }
    }
}

/// Overall default selection at first startup
pub fn default_model() -> ModelDescriptor {
    default_for(ProviderIdentity::Gemini)
}

/// Available models plus the current selection
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    available: Vec<ModelDescriptor>,
    selected: ModelDescriptor,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ModelCatalog {
    /// Catalog seeded with the built-in set and default selection
    pub fn with_defaults() -> Self {
        Self {
            available: builtin_models(),
            selected: default_model(),
        }
    }

    /// Catalog seeded with the built-in set and a previously persisted
    /// selection
    pub fn with_selection(selected: ModelDescriptor) -> Self {
        Self {
            available: builtin_models(),
            selected,
        }
    }

    pub fn selected(&self) -> &ModelDescriptor {
        &self.selected
    }

    /// The active provider is whoever owns the selected model
    pub fn active_provider(&self) -> ProviderIdentity {
        self.selected.provider
    }

    pub fn available(&self) -> &[ModelDescriptor] {
        &self.available
    }

    /// Models owned by one provider, for display grouping
    pub fn models_for(&self, provider: ProviderIdentity) -> Vec<&ModelDescriptor> {
        self.available
            .iter()
            .filter(|m| m.provider == provider)
            .collect()
    }

    /// Select a model. The active provider follows the model's owner.
    pub fn select(&mut self, model: ModelDescriptor) {
        self.selected = model;
    }

    /// Switch the active provider, re-selecting a valid default for it.
    ///
    /// A descriptor belonging to the old provider never remains selected.
    pub fn switch_provider(&mut self, provider: ProviderIdentity) {
        if self.selected.provider == provider {
            return;
        }
        let fallback = default_for(provider);
        self.selected = self
            .available
            .iter()
            .find(|m| m.identifier == fallback.identifier && m.provider == provider)
            .or_else(|| self.available.iter().find(|m| m.provider == provider))
            .cloned()
            .unwrap_or(fallback);
    }

    /// Best-effort refresh of the active provider's entries from its listing
    /// endpoint.
    ///
    /// Failure or an empty listing degrades to "no refreshed models": the
    /// prior set stays intact and nothing is raised.
    pub async fn refresh(
        &mut self,
        adapter: &dyn GenerationProvider,
        credential: &SecretString,
    ) {
        let provider = adapter.identity();
        match adapter.list_models(credential).await {
            Ok(models) => self.apply_refresh(provider, models),
            Err(e) => {
                warn!("Model listing failed for {}: {}", provider, e);
            }
        }
    }

    /// Replace one provider's entries with a freshly fetched list.
    ///
    /// Entries for other providers are preserved untouched. An empty list is
    /// ignored so a degraded listing never erases the static set.
    pub fn apply_refresh(&mut self, provider: ProviderIdentity, models: Vec<ModelDescriptor>) {
        if models.is_empty() {
            debug!("Empty model listing for {}, keeping prior set", provider);
            return;
        }
        self.available.retain(|m| m.provider != provider);
        self.available.extend(
            models.into_iter().filter(|m| m.provider == provider),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_set_covers_both_providers() {
        let models = builtin_models();
        assert!(models.iter().any(|m| m.provider == ProviderIdentity::OpenAi));
        assert!(models.iter().any(|m| m.provider == ProviderIdentity::Gemini));
    }

    #[test]
    fn test_default_selection_is_valid() {
        let catalog = ModelCatalog::with_defaults();
        assert_eq!(catalog.selected().identifier, "gemini-1.5-flash");
        assert_eq!(catalog.active_provider(), ProviderIdentity::Gemini);
    }

    #[test]
    fn test_switch_provider_reselects_default() {
        let mut catalog = ModelCatalog::with_defaults();
        catalog.switch_provider(ProviderIdentity::OpenAi);
        assert_eq!(catalog.active_provider(), ProviderIdentity::OpenAi);
        assert_eq!(catalog.selected().identifier, "gpt-4o");

        // Never leaves a stale descriptor from the old provider selected
        catalog.switch_provider(ProviderIdentity::Gemini);
        assert_eq!(catalog.active_provider(), ProviderIdentity::Gemini);
    }

    #[test]
    fn test_switch_to_same_provider_keeps_selection() {
        let mut catalog = ModelCatalog::with_defaults();
        catalog.select(ModelDescriptor::new(
            "gemini-1.5-pro",
            "Gemini 1.5 Pro",
            ProviderIdentity::Gemini,
        ));
        catalog.switch_provider(ProviderIdentity::Gemini);
        assert_eq!(catalog.selected().identifier, "gemini-1.5-pro");
    }

    #[test]
    fn test_refresh_replaces_only_active_provider() {
        let mut catalog = ModelCatalog::with_defaults();
        let gemini_before: Vec<String> = catalog
            .models_for(ProviderIdentity::Gemini)
            .iter()
            .map(|m| m.identifier.clone())
            .collect();

        catalog.apply_refresh(
            ProviderIdentity::OpenAi,
            vec![ModelDescriptor::new("gpt-4.1", "gpt-4.1", ProviderIdentity::OpenAi)],
        );

        let openai: Vec<&ModelDescriptor> = catalog.models_for(ProviderIdentity::OpenAi);
        assert_eq!(openai.len(), 1);
        assert_eq!(openai[0].identifier, "gpt-4.1");

        let gemini_after: Vec<String> = catalog
            .models_for(ProviderIdentity::Gemini)
            .iter()
            .map(|m| m.identifier.clone())
            .collect();
        assert_eq!(gemini_before, gemini_after);
    }

    #[test]
    fn test_empty_refresh_keeps_prior_set() {
        let mut catalog = ModelCatalog::with_defaults();
        let before = catalog.available().len();
        catalog.apply_refresh(ProviderIdentity::OpenAi, vec![]);
        assert_eq!(catalog.available().len(), before);
    }

    #[test]
    fn test_refresh_discards_foreign_entries() {
        let mut catalog = ModelCatalog::with_defaults();
        catalog.apply_refresh(
            ProviderIdentity::OpenAi,
            vec![
                ModelDescriptor::new("gpt-4.1", "gpt-4.1", ProviderIdentity::OpenAi),
                ModelDescriptor::new("intruder", "intruder", ProviderIdentity::Gemini),
            ],
        );
        assert!(
            catalog
                .models_for(ProviderIdentity::Gemini)
                .iter()
                .all(|m| m.identifier != "intruder")
        );
    }
}
