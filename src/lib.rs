//! DocForge - AI-Driven Repository Documentation Generator
//!
//! An ephemeral, client-driven documentation engine: point it at a GitHub
//! repository, select the source files that matter, and generate README, API
//! reference, usage examples, design documents, or all of them at once
//! through an interchangeable AI backend (OpenAI or Google Gemini).
//!
//! ## Core Features
//!
//! - **Provider Abstraction**: one generation contract, chat-completion and
//!   single-turn backends behind it
//! - **Prompt Catalog**: a fixed system instruction per document kind
//! - **Composite Generation**: all document kinds in one keyed JSON response,
//!   with a lossless fallback when the backend ignores the contract
//! - **Repository Browser**: metadata, filtered file tree, and raw content
//!   over the GitHub REST API
//! - **Injected Settings**: credentials and model choice behind a store
//!   trait, in-memory or JSON-file backed
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use docforge::{
//!     ContextAssembler, DocumentKind, FileSettings, GenerationRequest,
//!     GitHubClient, Orchestrator, resolve_repo_reference,
//! };
//!
//! let settings = Arc::new(FileSettings::open_default()?);
//! let orchestrator = Orchestrator::new(settings.clone())?;
//!
//! let repo = resolve_repo_reference("acme/widget").unwrap();
//! let github = GitHubClient::new(settings.host_token())?;
//! let metadata = github.fetch_repo_metadata(&repo).await?;
//!
//! let content = ContextAssembler::new()
//!     .assemble(&github.content_source(repo), &selection, Some(&metadata))
//!     .await?;
//!
//! let result = orchestrator
//!     .generate_docs(GenerationRequest::new(content, DocumentKind::Readme))
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: provider adapters, prompt catalog, context assembly, orchestrator
//! - [`repo`]: repository reference resolution and the GitHub client
//! - [`settings`]: the settings-store trait and its implementations
//! - [`types`]: document kinds, requests, results, errors

pub mod ai;
pub mod constants;
pub mod repo;
pub mod settings;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Orchestration
pub use ai::{
    ContentSource, ContextAssembler, GenerationProvider, ModelCatalog, Orchestrator,
    ProviderConfig, SharedProvider, TimeoutConfig, create_provider,
};

// Repository browsing
pub use repo::{
    FileEntry, GitHubClient, GitHubContentSource, RepoMetadata, RepoRef, resolve_repo_reference,
};

// Settings
pub use settings::{FileSettings, MemorySettings, SettingsStore};

// Domain types and errors
pub use types::{
    CompositeDocs, DocForgeError, DocumentKind, FileSelection, GenerationRequest,
    GenerationResult, ModelDescriptor, ProviderIdentity, Result,
};
