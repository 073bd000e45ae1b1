//! Documentation Generation Core
//!
//! Provider adapters, prompt catalog, context assembly, model catalog, and
//! the orchestrator tying them together.

pub mod context;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod timeout;

pub use context::{ContentSource, ContextAssembler};
pub use models::ModelCatalog;
pub use orchestrator::Orchestrator;
pub use provider::{GenerationProvider, ProviderConfig, SharedProvider, create_provider};
pub use timeout::{TimeoutConfig, with_timeout};
