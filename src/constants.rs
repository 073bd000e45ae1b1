//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// HTTP/Network constants
pub mod network {
    /// Default timeout for a generation request (seconds)
    pub const GENERATION_TIMEOUT_SECS: u64 = 120;

    /// Timeout for model-listing and metadata requests (seconds)
    pub const LISTING_TIMEOUT_SECS: u64 = 30;

    /// Timeout for a single file-content fetch (seconds)
    pub const FILE_FETCH_TIMEOUT_SECS: u64 = 30;
}

/// Repository host (GitHub) constants
pub mod github {
    /// GitHub REST API base URL
    pub const API_BASE: &str = "https://api.github.com";

    /// User-Agent sent with every request (GitHub rejects anonymous clients)
    pub const USER_AGENT: &str = concat!("docforge/", env!("CARGO_PKG_VERSION"));

    /// File extensions excluded from the selectable file list
    pub const IGNORED_EXTENSIONS: &[&str] = &[
        ".png",
        ".jpg",
        ".jpeg",
        ".gif",
        ".svg",
        ".ico",
        ".pdf",
        ".lock",
        ".tsbuildinfo",
        ".map",
    ];

    /// Directories excluded from the selectable file list
    pub const IGNORED_DIRS: &[&str] = &[
        "node_modules",
        "dist",
        "build",
        ".git",
        ".vscode",
        ".idea",
        "coverage",
    ];
}

/// Context assembly constants
pub mod context {
    /// Maximum file fetches in flight at once
    pub const MAX_CONCURRENT_FETCHES: usize = 4;

    /// Cumulative character count above which a warning is logged.
    ///
    /// Nothing is dropped or truncated above this threshold. Target backends'
    /// context windows vastly exceed realistic repository-subset sizes, so
    /// the count is tracked only as a safety signal for future enforcement.
    pub const SIZE_WARN_CHARS: usize = 2_000_000;
}

/// Generation tuning constants
pub mod generation {
    /// Sampling temperature for both providers. Kept low for factual output.
    pub const TEMPERATURE: f32 = 0.3;
}
