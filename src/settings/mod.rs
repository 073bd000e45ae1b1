//! Settings Store
//!
//! Key-value persistence for per-provider credentials, the selected model,
//! and an optional repository-host token. The store is an explicit trait
//! injected into the orchestrator so there is no ambient global state and the
//! core stays testable with an in-memory fake.
//!
//! Two implementations:
//!
//! - [`MemorySettings`]: volatile, for tests and embedders with their own
//!   persistence
//! - [`FileSettings`]: a JSON file under the platform config directory,
//!   written on every mutation
//!
//! Credentials are client-local and stored unencrypted on disk; in memory
//! they are wrapped in `SecretString` so they never leak through Debug or
//! logs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::models;
use crate::types::{DocForgeError, ModelDescriptor, ProviderIdentity, Result};

// =============================================================================
// SettingsStore Trait
// =============================================================================

/// Persistence boundary for provider choice, model choice, and credentials.
///
/// The orchestrator only reads through this trait; all writes come from the
/// embedding application.
pub trait SettingsStore: Send + Sync {
    /// API key for a provider, if one is configured
    fn credential(&self, provider: ProviderIdentity) -> Option<SecretString>;

    fn set_credential(&self, provider: ProviderIdentity, key: SecretString) -> Result<()>;

    fn clear_credential(&self, provider: ProviderIdentity) -> Result<()>;

    /// Currently selected model. Falls back to the built-in default when
    /// nothing has been persisted yet.
    fn selected_model(&self) -> ModelDescriptor;

    fn set_selected_model(&self, model: ModelDescriptor) -> Result<()>;

    /// Optional repository-host (GitHub) access token
    fn host_token(&self) -> Option<SecretString>;

    fn set_host_token(&self, token: Option<SecretString>) -> Result<()>;
}

// =============================================================================
// Serialized Form
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsData {
    #[serde(default)]
    credentials: BTreeMap<ProviderIdentity, String>,
    #[serde(default)]
    selected_model: Option<ModelDescriptor>,
    #[serde(default)]
    host_token: Option<String>,
}

impl SettingsData {
    fn credential(&self, provider: ProviderIdentity) -> Option<SecretString> {
        self.credentials
            .get(&provider)
            .filter(|key| !key.is_empty())
            .map(|key| SecretString::from(key.clone()))
    }

    fn selected_model(&self) -> ModelDescriptor {
        self.selected_model
            .clone()
            .unwrap_or_else(models::default_model)
    }

    fn host_token(&self) -> Option<SecretString> {
        self.host_token
            .as_ref()
            .filter(|token| !token.is_empty())
            .map(|token| SecretString::from(token.clone()))
    }
}

// =============================================================================
// MemorySettings
// =============================================================================

/// In-memory settings store. State is lost on drop.
#[derive(Default)]
pub struct MemorySettings {
    data: RwLock<SettingsData>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemorySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySettings")
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

impl SettingsStore for MemorySettings {
    fn credential(&self, provider: ProviderIdentity) -> Option<SecretString> {
        self.data.read().ok()?.credential(provider)
    }

    fn set_credential(&self, provider: ProviderIdentity, key: SecretString) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.credentials
            .insert(provider, key.expose_secret().to_string());
        Ok(())
    }

    fn clear_credential(&self, provider: ProviderIdentity) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.credentials.remove(&provider);
        Ok(())
    }

    fn selected_model(&self) -> ModelDescriptor {
        self.data
            .read()
            .map(|data| data.selected_model())
            .unwrap_or_else(|_| models::default_model())
    }

    fn set_selected_model(&self, model: ModelDescriptor) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.selected_model = Some(model);
        Ok(())
    }

    fn host_token(&self) -> Option<SecretString> {
        self.data.read().ok()?.host_token()
    }

    fn set_host_token(&self, token: Option<SecretString>) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.host_token = token.map(|t| t.expose_secret().to_string());
        Ok(())
    }
}

// =============================================================================
// FileSettings
// =============================================================================

/// JSON-file-backed settings store.
///
/// Every mutation rewrites the file so state survives the process. Reads are
/// served from memory; the file is only read once at open.
pub struct FileSettings {
    path: PathBuf,
    data: RwLock<SettingsData>,
}

impl std::fmt::Debug for FileSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSettings")
            .field("path", &self.path)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

impl FileSettings {
    /// Open (or create) the settings file at the platform default location
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open (or create) a settings file at an explicit path
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw).map_err(|e| {
                DocForgeError::Storage(format!(
                    "Unreadable settings file {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            debug!("No settings file at {}, starting empty", path.display());
            SettingsData::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Platform config location, e.g. `~/.config/docforge/settings.json`
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "docforge").ok_or_else(|| {
            DocForgeError::Storage("Cannot determine config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &SettingsData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn mutate(&self, apply: impl FnOnce(&mut SettingsData)) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        apply(&mut data);
        self.persist(&data)
    }
}

impl SettingsStore for FileSettings {
    fn credential(&self, provider: ProviderIdentity) -> Option<SecretString> {
        self.data.read().ok()?.credential(provider)
    }

    fn set_credential(&self, provider: ProviderIdentity, key: SecretString) -> Result<()> {
        self.mutate(|data| {
            data.credentials
                .insert(provider, key.expose_secret().to_string());
        })
    }

    fn clear_credential(&self, provider: ProviderIdentity) -> Result<()> {
        self.mutate(|data| {
            data.credentials.remove(&provider);
        })
    }

    fn selected_model(&self) -> ModelDescriptor {
        self.data
            .read()
            .map(|data| data.selected_model())
            .unwrap_or_else(|_| models::default_model())
    }

    fn set_selected_model(&self, model: ModelDescriptor) -> Result<()> {
        self.mutate(|data| data.selected_model = Some(model))
    }

    fn host_token(&self) -> Option<SecretString> {
        self.data.read().ok()?.host_token()
    }

    fn set_host_token(&self, token: Option<SecretString>) -> Result<()> {
        self.mutate(|data| data.host_token = token.map(|t| t.expose_secret().to_string()))
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> DocForgeError {
    DocForgeError::Storage("Settings lock poisoned".to_string())
}

// =============================================================================
// Tests
// =============================================================================
