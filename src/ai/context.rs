//! Context Assembler
//!
//! Builds the user-facing prompt body from selected file contents plus
//! repository metadata. Each file becomes a labeled fenced block; blocks are
//! joined with blank-line separation and followed by a metadata section.
//!
//! File contents come from a [`ContentSource`] with an order-preserving,
//! concurrency-bounded fan-out, so large selections never become an
//! unbounded burst of requests. The cumulative character count is tracked as
//! a safety signal only; nothing is dropped or truncated because the target
//! backends' context windows vastly exceed realistic selection sizes.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::constants::context as limits;
use crate::repo::RepoMetadata;
use crate::types::{FileSelection, Result};

/// Capability to fetch the raw text of one repository-relative path
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_content(&self, path: &str) -> Result<String>;
}

/// Assembles prompt bodies from file selections
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_concurrent_fetches: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: limits::MAX_CONCURRENT_FETCHES,
        }
    }
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(max_concurrent_fetches: usize) -> Self {
        Self {
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Fetch every selected file and compose the prompt body.
    ///
    /// Any single fetch failure fails the whole assembly; partial context
    /// would silently misrepresent the repository.
    pub async fn assemble(
        &self,
        source: &dyn ContentSource,
        selection: &FileSelection,
        metadata: Option<&RepoMetadata>,
    ) -> Result<String> {
        let fetches = selection.iter().map(|path| async move {
            let content = source.fetch_content(path).await?;
            Ok::<_, crate::types::DocForgeError>((path, content))
        });

        // buffered() keeps selection order while bounding in-flight requests
        let files: Vec<(&str, String)> = stream::iter(fetches)
            .buffered(self.max_concurrent_fetches)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<_>>()?;

        let mut total_chars = 0usize;
        let blocks: Vec<String> = files
            .into_iter()
            .map(|(path, content)| {
                total_chars += content.len();
                format!("File: {}\n```\n{}\n```", path, content)
            })
            .collect();

        debug!(
            "Assembled {} file blocks, {} chars of content",
            blocks.len(),
            total_chars
        );
        if total_chars > limits::SIZE_WARN_CHARS {
            warn!(
                "Assembled context is {} chars (warn threshold {}); sending anyway",
                total_chars,
                limits::SIZE_WARN_CHARS
            );
        }

        let mut assembled = blocks.join("\n\n");
        if let Some(metadata) = metadata {
            assembled.push_str("\n\n");
            assembled.push_str(&metadata_section(metadata));
        }

        Ok(assembled)
    }
}

fn metadata_section(metadata: &RepoMetadata) -> String {
    let mut section = String::from("Repository Information:\n");
    section.push_str(&format!(
        "Description: {}\n",
        metadata.description.as_deref().unwrap_or("(none)")
    ));
    if metadata.topics.is_empty() {
        section.push_str("Topics: (none)");
    } else {
        section.push_str(&format!("Topics: {}", metadata.topics.join(", ")));
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::types::DocForgeError;

    struct MapSource {
        files: BTreeMap<String, String>,
    }

    #[async_trait]
    impl ContentSource for MapSource {
        async fn fetch_content(&self, path: &str) -> Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| DocForgeError::NotFound(format!("File {} not found.", path)))
        }
    }

    fn source(entries: &[(&str, &str)]) -> MapSource {
        MapSource {
            files: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_assembles_labeled_fenced_blocks() {
        let source = source(&[("src/a.rs", "fn a() {}"), ("src/b.rs", "fn b() {}")]);
        let selection: FileSelection =
            ["src/a.rs".to_string(), "src/b.rs".to_string()].into_iter().collect();

        let assembled = ContextAssembler::new()
            .assemble(&source, &selection, None)
            .await
            .unwrap();

        assert_eq!(
            assembled,
            "File: src/a.rs\n```\nfn a() {}\n```\n\nFile: src/b.rs\n```\nfn b() {}\n```"
        );
    }

    #[tokio::test]
    async fn test_metadata_section_appended() {
        let source = source(&[("lib.rs", "pub fn x() {}")]);
        let selection: FileSelection = ["lib.rs".to_string()].into_iter().collect();
        let metadata = RepoMetadata {
            default_branch: "main".to_string(),
            description: Some("A widget factory".to_string()),
            topics: vec!["rust".to_string(), "widgets".to_string()],
        };

        let assembled = ContextAssembler::new()
            .assemble(&source, &selection, Some(&metadata))
            .await
            .unwrap();

        assert!(assembled.contains("Description: A widget factory"));
        assert!(assembled.contains("Topics: rust, widgets"));
        assert!(assembled.starts_with("File: lib.rs"));
    }

    #[tokio::test]
    async fn test_missing_file_fails_assembly() {
        let source = source(&[("a.rs", "x")]);
        let selection: FileSelection =
            ["a.rs".to_string(), "missing.rs".to_string()].into_iter().collect();

        let result = ContextAssembler::new()
            .assemble(&source, &selection, None)
            .await;
        assert!(matches!(result, Err(DocForgeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_selection_yields_empty_body() {
        let source = source(&[]);
        let selection = FileSelection::new();
        let assembled = ContextAssembler::new()
            .assemble(&source, &selection, None)
            .await
            .unwrap();
        assert_eq!(assembled, "");
    }

    struct CountingSource {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl ContentSource for CountingSource {
        async fn fetch_content(&self, path: &str) -> Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(format!("content of {}", path))
        }
    }

    #[tokio::test]
    async fn test_fan_out_is_bounded() {
        let source = CountingSource {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        };
        let selection: FileSelection =
            (0..20).map(|i| format!("file{:02}.rs", i)).collect();

        ContextAssembler::with_concurrency(3)
            .assemble(&source, &selection, None)
            .await
            .unwrap();

        assert!(source.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_order_follows_selection_order() {
        let source = source(&[("a.rs", "1"), ("b.rs", "2"), ("c.rs", "3")]);
        let selection: FileSelection =
            ["c.rs".to_string(), "a.rs".to_string(), "b.rs".to_string()]
                .into_iter()
                .collect();

        let assembled = ContextAssembler::new()
            .assemble(&source, &selection, None)
            .await
            .unwrap();

        let a = assembled.find("File: a.rs").unwrap();
        let b = assembled.find("File: b.rs").unwrap();
        let c = assembled.find("File: c.rs").unwrap();
        // FileSelection iterates lexicographically
        assert!(a < b && b < c);
    }
}
