//! Timeout Configuration
//!
//! Explicit deadlines for every outbound operation. Nothing relies on
//! transport defaults: each adapter's HTTP client is built with these values
//! and the orchestrator additionally wraps the generation call.

use std::future::Future;
use std::time::Duration;

use crate::constants::network;
use crate::types::{DocForgeError, Result};

/// Deadlines for the three outbound operation classes
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Deadline for a generation request (default: 2 minutes)
    pub generation: Duration,
    /// Deadline for model-listing and repository-metadata requests
    pub listing: Duration,
    /// Deadline for a single file-content fetch
    pub file_fetch: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            generation: Duration::from_secs(network::GENERATION_TIMEOUT_SECS),
            listing: Duration::from_secs(network::LISTING_TIMEOUT_SECS),
            file_fetch: Duration::from_secs(network::FILE_FETCH_TIMEOUT_SECS),
        }
    }
}

/// Execute an async operation with a deadline.
///
/// Returns a timeout error naming the operation if it does not complete in
/// time.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(DocForgeError::timeout(operation_name, timeout)),
    }
}
