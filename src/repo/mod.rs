//! Repository Browser
//!
//! Resolves user-entered repository references and talks to the GitHub REST
//! API: repository metadata, the recursive file tree (filtered to
//! documentable source files), and raw file content.
//!
//! Host status codes are classified into distinguishable error kinds: 403 is
//! a rate limit that a personal access token lifts, 404 is not-found (or a
//! private repository the anonymous client cannot see).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::ai::context::ContentSource;
use crate::constants::github;
use crate::types::{DocForgeError, Result};

// =============================================================================
// Repository Reference
// =============================================================================

/// An owner/name pair identifying one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Fallible form of [`resolve_repo_reference`] for callers that want a
    /// fail-fast error instead of an option. No network is attempted.
    pub fn parse(input: &str) -> Result<Self> {
        resolve_repo_reference(input).ok_or_else(|| {
            DocForgeError::RepoReference(format!(
                "'{}' is not a repository URL or owner/name reference",
                input.trim()
            ))
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Resolve a full URL or an `owner/name` shorthand into a repository
/// reference. Returns `None` for anything malformed.
pub fn resolve_repo_reference(input: &str) -> Option<RepoRef> {
    let input = input.trim();

    if let Ok(url) = Url::parse(input) {
        if url.host_str().is_none() {
            return None;
        }
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let name = segments.next()?;
        return Some(RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        });
    }

    // Shorthand: exactly "owner/name", neither side empty or spaced
    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() == 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && !p.contains(char::is_whitespace))
    {
        return Some(RepoRef {
            owner: parts[0].to_string(),
            name: parts[1].to_string(),
        });
    }

    None
}

// =============================================================================
// Host Data
// =============================================================================

/// Repository metadata used in the assembled prompt
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoMetadata {
    pub default_branch: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One selectable file from the repository tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub size_bytes: Option<u64>,
}

// =============================================================================
// Status Classification
// =============================================================================

/// Map a host status code to the error taxonomy. `context` names what was
/// being fetched, for the 404 message.
fn classify_status(status: u16, context: &str) -> Option<DocForgeError> {
    match status {
        403 => Some(DocForgeError::RateLimit(
            "GitHub rate limit exceeded. Please add a personal access token in settings to continue."
                .to_string(),
        )),
        404 => Some(DocForgeError::NotFound(format!(
            "{} not found. Check the URL or ensure you have access (token required for private repositories).",
            context
        ))),
        s if (200..300).contains(&s) => None,
        s => Some(DocForgeError::Transport(format!(
            "GitHub API error ({})",
            s
        ))),
    }
}

// =============================================================================
// File Filtering
// =============================================================================

/// Whether a tree path belongs in the selectable file list.
///
/// Excludes dotfiles (except `.env.example`), binary/irrelevant extensions,
/// and build/vendor directories.
fn is_documentable(path: &str) -> bool {
    let filename = path.rsplit('/').next().unwrap_or(path);

    if filename.starts_with('.') && filename != ".env.example" {
        return false;
    }

    let lower = filename.to_lowercase();
    if github::IGNORED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
    {
        return false;
    }

    !github::IGNORED_DIRS
        .iter()
        .any(|dir| path.contains(&format!("{}/", dir)))
}

// =============================================================================
// GitHub Client
// =============================================================================

/// Thin client over the GitHub REST API. Cloning is cheap; the underlying
/// HTTP client is shared.
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<SecretString>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GitHubClient {
    pub fn new(token: Option<SecretString>) -> Result<Self> {
        Self::with_api_base(github::API_BASE, token)
    }

    pub fn with_api_base(api_base: impl Into<String>, token: Option<SecretString>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(github::USER_AGENT)
            .timeout(std::time::Duration::from_secs(
                crate::constants::network::FILE_FETCH_TIMEOUT_SECS,
            ))
            .build()
            .map_err(|e| {
                DocForgeError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            token,
        })
    }

    fn request(&self, url: String, accept: &'static str) -> reqwest::RequestBuilder {
        let mut builder = self.client.get(url).header("Accept", accept);
        if let Some(token) = &self.token {
            builder = builder.header(
                "Authorization",
                format!("token {}", token.expose_secret()),
            );
        }
        builder
    }

    /// Fetch default branch, description, and topic tags
    pub async fn fetch_repo_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name);
        let response = self
            .request(url, "application/vnd.github.v3+json")
            .send()
            .await?;

        if let Some(err) = classify_status(response.status().as_u16(), "Repository") {
            return Err(err);
        }

        Ok(response.json().await?)
    }

    /// List selectable files on a branch via the recursive git tree
    pub async fn fetch_file_list(&self, repo: &RepoRef, branch: &str) -> Result<Vec<FileEntry>> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, repo.owner, repo.name, branch
        );
        let response = self
            .request(url, "application/vnd.github.v3+json")
            .send()
            .await?;

        if let Some(err) = classify_status(response.status().as_u16(), "File tree") {
            return Err(err);
        }

        let tree: TreeResponse = response.json().await?;
        let entries: Vec<FileEntry> = tree
            .tree
            .into_iter()
            .filter(|node| node.node_type == "blob" && is_documentable(&node.path))
            .map(|node| FileEntry {
                path: node.path,
                size_bytes: node.size,
            })
            .collect();

        debug!("File tree for {}/{}: {} selectable files", repo.owner, repo.name, entries.len());
        Ok(entries)
    }

    /// Fetch the raw text of one file
    pub async fn fetch_file_content(&self, repo: &RepoRef, path: &str) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.name, path
        );
        let response = self
            .request(url, "application/vnd.github.v3.raw")
            .send()
            .await?;

        let context = format!("File {}", path);
        if let Some(err) = classify_status(response.status().as_u16(), &context) {
            return Err(err);
        }

        Ok(response.text().await?)
    }

    /// Bind this client to one repository as a content source for the
    /// context assembler
    pub fn content_source(&self, repo: RepoRef) -> GitHubContentSource {
        GitHubContentSource {
            client: self.clone(),
            repo,
        }
    }
}

/// A [`GitHubClient`] bound to one repository
#[derive(Debug, Clone)]
pub struct GitHubContentSource {
    client: GitHubClient,
    repo: RepoRef,
}

#[async_trait]
impl ContentSource for GitHubContentSource {
    async fn fetch_content(&self, path: &str) -> Result<String> {
        self.client.fetch_file_content(&self.repo, path).await
    }
}

// Wire types

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeNode>,
}

#[derive(Debug, Deserialize)]
struct TreeNode {
    path: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    size: Option<u64>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_full_url() {
        let repo = resolve_repo_reference("https://github.com/acme/widget").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widget");
    }

    #[test]
    fn test_resolve_url_with_extra_path() {
        let repo = resolve_repo_reference("https://github.com/acme/widget/tree/main/src").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widget");
    }

    #[test]
    fn test_resolve_shorthand() {
        let repo = resolve_repo_reference("acme/widget").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widget");
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        assert_eq!(resolve_repo_reference("not a url"), None);
        assert_eq!(resolve_repo_reference(""), None);
        assert_eq!(resolve_repo_reference("acme"), None);
        assert_eq!(resolve_repo_reference("/widget"), None);
        assert_eq!(resolve_repo_reference("https://github.com/"), None);
    }

    #[test]
    fn test_parse_surfaces_reference_error() {
        assert_eq!(
            RepoRef::parse("acme/widget").unwrap().to_string(),
            "acme/widget"
        );
        let err = RepoRef::parse("not a url").unwrap_err();
        assert!(matches!(err, DocForgeError::RepoReference(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = classify_status(403, "Repository").unwrap();
        assert!(matches!(err, DocForgeError::RateLimit(_)));
        let message = err.to_string();
        assert!(message.contains("rate limit"));
        assert!(message.contains("token"));
    }

    #[test]
    fn test_classify_not_found() {
        let err = classify_status(404, "Repository").unwrap();
        assert!(matches!(err, DocForgeError::NotFound(_)));
        let message = err.to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("token"));
        assert!(message.contains("Check the URL"));
    }

    #[test]
    fn test_classify_success_and_other_failures() {
        assert!(classify_status(200, "Repository").is_none());
        assert!(classify_status(204, "Repository").is_none());
        let err = classify_status(500, "Repository").unwrap();
        assert!(matches!(err, DocForgeError::Transport(_)));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_is_documentable_filters_dotfiles() {
        assert!(!is_documentable(".gitignore"));
        assert!(!is_documentable("config/.eslintrc"));
        assert!(is_documentable(".env.example"));
        assert!(is_documentable("src/main.rs"));
    }

    #[test]
    fn test_is_documentable_filters_extensions() {
        assert!(!is_documentable("assets/logo.PNG"));
        assert!(!is_documentable("Cargo.lock"));
        assert!(!is_documentable("dist/bundle.js.map"));
        assert!(is_documentable("src/lib.rs"));
        assert!(is_documentable("README.md"));
    }

    #[test]
    fn test_is_documentable_filters_vendor_dirs() {
        assert!(!is_documentable("node_modules/react/index.js"));
        assert!(!is_documentable("app/node_modules/x/y.js"));
        assert!(!is_documentable("coverage/lcov-report/index.html"));
        assert!(is_documentable("src/build_info.rs"));
    }
}
