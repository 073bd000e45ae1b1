//! Core Domain Types
//!
//! Shared types for documentation generation: document kinds, provider and
//! model identity, requests, results, and file selection.

pub mod error;

pub use error::{DocForgeError, Result};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// =============================================================================
// Document Kind
// =============================================================================

/// Which documentation artifact is requested.
///
/// `All` is the composite kind: the backend is asked to return every other
/// kind at once as a keyed JSON object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// Project overview (README.md)
    Readme,
    /// API reference guide
    Api,
    /// Usage guides and examples
    Examples,
    /// Architecture and internals guide
    Architecture,
    /// Update of existing documentation against new code
    Update,
    /// High-level design document
    Hld,
    /// Low-level design document
    Lld,
    /// Technical analysis report
    TechnicalAnalysis,
    /// Composite: all of the above in one JSON response
    All,
}

impl DocumentKind {
    /// Every non-composite kind, in stable display order.
    ///
    /// These are exactly the keys the composite response object uses.
    pub const SINGLE_KINDS: [DocumentKind; 8] = [
        DocumentKind::Readme,
        DocumentKind::Api,
        DocumentKind::Examples,
        DocumentKind::Architecture,
        DocumentKind::Update,
        DocumentKind::Hld,
        DocumentKind::Lld,
        DocumentKind::TechnicalAnalysis,
    ];

    /// Whether this is the composite "all kinds" request
    pub const fn is_composite(self) -> bool {
        matches!(self, DocumentKind::All)
    }

    /// JSON key / wire tag for this kind
    pub const fn key(self) -> &'static str {
        match self {
            DocumentKind::Readme => "readme",
            DocumentKind::Api => "api",
            DocumentKind::Examples => "examples",
            DocumentKind::Architecture => "architecture",
            DocumentKind::Update => "update",
            DocumentKind::Hld => "hld",
            DocumentKind::Lld => "lld",
            DocumentKind::TechnicalAnalysis => "technical-analysis",
            DocumentKind::All => "all",
        }
    }

    /// Resolve a composite-response key back to a kind.
    ///
    /// Returns `None` for unknown keys and for `"all"` itself, which is a
    /// request tag, never a response key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::SINGLE_KINDS.iter().copied().find(|k| k.key() == key)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Provider Identity & Model Descriptor
// =============================================================================

/// Which generation backend to dispatch to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderIdentity {
    OpenAi,
    Gemini,
}

impl ProviderIdentity {
    /// Human-readable provider name for user-facing messages
    pub const fn display_name(self) -> &'static str {
        match self {
            ProviderIdentity::OpenAi => "OpenAI",
            ProviderIdentity::Gemini => "Google Gemini",
        }
    }

    /// Wire tag for logging and persistence
    pub const fn as_str(self) -> &'static str {
        match self {
            ProviderIdentity::OpenAi => "openai",
            ProviderIdentity::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable model offered by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Provider-specific model name sent on the wire
    pub identifier: String,
    /// Human-readable name for display
    pub display_name: String,
    /// Backend that owns this model
    pub provider: ProviderIdentity,
}

impl ModelDescriptor {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        provider: ProviderIdentity,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            provider,
        }
    }
}

// =============================================================================
// Generation Request / Result
// =============================================================================

/// One-shot input to the generation orchestrator. Never persisted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Assembled file contents plus repository metadata
    pub assembled_content: String,
    /// Which artifact(s) to produce
    pub kind: DocumentKind,
    /// Existing documentation to diff against. Only meaningful for `Update`.
    pub prior_artifact: Option<String>,
    /// Free-form extra instructions appended to the user content
    pub supplementary_context: Option<String>,
}

impl GenerationRequest {
    pub fn new(assembled_content: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            assembled_content: assembled_content.into(),
            kind,
            prior_artifact: None,
            supplementary_context: None,
        }
    }

    pub fn with_prior_artifact(mut self, prior: impl Into<String>) -> Self {
        self.prior_artifact = Some(prior.into());
        self
    }

    pub fn with_supplementary_context(mut self, context: impl Into<String>) -> Self {
        self.supplementary_context = Some(context.into());
        self
    }
}

/// Outcome of a generation request, discriminated by the requested kind.
///
/// Single-kind requests yield the backend's raw markdown unchanged.
/// Composite requests yield a section map, possibly via the fallback policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// Raw markdown for one requested kind
    Single(String),
    /// Section map for the composite "all" kind
    Composite(CompositeDocs),
}

impl GenerationResult {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            GenerationResult::Single(text) => Some(text),
            GenerationResult::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeDocs> {
        match self {
            GenerationResult::Single(_) => None,
            GenerationResult::Composite(docs) => Some(docs),
        }
    }
}

/// Parsed multi-document payload from a composite request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeDocs {
    /// Document text keyed by kind. May be partial; absent kinds are not
    /// synthesized.
    pub sections: BTreeMap<DocumentKind, String>,
    /// True when the response could not be parsed as JSON and every kind was
    /// filled with the raw text instead. Observable so operators can spot a
    /// systematically broken response contract.
    pub fallback_used: bool,
}

impl CompositeDocs {
    /// Text for one kind, if the backend produced it
    pub fn section(&self, kind: DocumentKind) -> Option<&str> {
        self.sections.get(&kind).map(String::as_str)
    }
}

// =============================================================================
// File Selection
// =============================================================================

/// The set of repository-relative paths chosen for context assembly.
///
/// Unordered for processing purposes; iteration order is lexicographic for
/// stable display. Reset whenever a new repository is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    paths: BTreeSet<String>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a path in or out of the selection. Returns true if the path is
    /// selected afterwards.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.paths.remove(path) {
            false
        } else {
            self.paths.insert(path.to_string());
            true
        }
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Drop every selected path (new repository loaded)
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<String> for FileSelection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_keys_round_trip() {
        for kind in DocumentKind::SINGLE_KINDS {
            assert_eq!(DocumentKind::from_key(kind.key()), Some(kind));
        }
    }

    #[test]
    fn test_composite_key_is_not_a_response_key() {
        assert_eq!(DocumentKind::from_key("all"), None);
        assert_eq!(DocumentKind::from_key("bogus"), None);
    }

    #[test]
    fn test_document_kind_serde_tags() {
        let json = serde_json::to_string(&DocumentKind::TechnicalAnalysis).unwrap();
        assert_eq!(json, "\"technical-analysis\"");
        let kind: DocumentKind = serde_json::from_str("\"hld\"").unwrap();
        assert_eq!(kind, DocumentKind::Hld);
    }

    #[test]
    fn test_provider_identity_display() {
        assert_eq!(ProviderIdentity::OpenAi.to_string(), "openai");
        assert_eq!(ProviderIdentity::Gemini.display_name(), "Google Gemini");
    }

    #[test]
    fn test_generation_request_builder() {
        let request = GenerationRequest::new("code", DocumentKind::Update)
            .with_prior_artifact("old docs")
            .with_supplementary_context("focus on the API");
        assert_eq!(request.kind, DocumentKind::Update);
        assert_eq!(request.prior_artifact.as_deref(), Some("old docs"));
        assert_eq!(
            request.supplementary_context.as_deref(),
            Some("focus on the API")
        );
    }

    #[test]
    fn test_file_selection_toggle() {
        let mut selection = FileSelection::new();
        assert!(selection.toggle("src/main.rs"));
        assert!(selection.contains("src/main.rs"));
        assert!(!selection.toggle("src/main.rs"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_file_selection_is_deduplicated_and_ordered() {
        let mut selection = FileSelection::new();
        selection.insert("b.rs");
        selection.insert("a.rs");
        selection.insert("b.rs");
        assert_eq!(selection.len(), 2);
        let paths: Vec<&str> = selection.iter().collect();
        assert_eq!(paths, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_file_selection_clear_on_new_repo() {
        let mut selection: FileSelection =
            ["src/lib.rs".to_string(), "README.md".to_string()].into_iter().collect();
        assert_eq!(selection.len(), 2);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_composite_docs_section_lookup() {
        let mut docs = CompositeDocs::default();
        docs.sections.insert(DocumentKind::Readme, "# Hello".to_string());
        assert_eq!(docs.section(DocumentKind::Readme), Some("# Hello"));
        assert_eq!(docs.section(DocumentKind::Api), None);
    }
}
