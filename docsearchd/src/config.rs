use std::time::Duration;

use docsearch_api::limits::MAX_UPSTREAM_BYTES;

use crate::upstream::UpstreamError;

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: String,     // https://shopify.dev
    pub search_path: String,  // /mcp/search
    pub timeout_secs: u64,    // 10
    pub max_body_bytes: usize, // 10 MB
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://shopify.dev".to_string(),
            search_path: "/mcp/search".to_string(),
            timeout_secs: 10,
            max_body_bytes: MAX_UPSTREAM_BYTES,
        }
    }
}

impl UpstreamConfig {
    /// - DOCSEARCH_BASE_URL (default https://shopify.dev)
    /// - DOCSEARCH_SEARCH_PATH (default /mcp/search)
    /// - DOCSEARCH_TIMEOUT_SECS (default 10)
    /// - DOCSEARCH_MAX_BODY_BYTES (default 10 MB)
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(url) = env_non_empty("DOCSEARCH_BASE_URL") {
            cfg.base_url = url;
        }
        if let Some(path) = env_non_empty("DOCSEARCH_SEARCH_PATH") {
            cfg.search_path = path;
        }
        cfg.timeout_secs = parse_env_u64("DOCSEARCH_TIMEOUT_SECS", cfg.timeout_secs);
        cfg.max_body_bytes = parse_env_usize("DOCSEARCH_MAX_BODY_BYTES", cfg.max_body_bytes);

        cfg
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Search endpoint without the query string.
    pub fn endpoint(&self) -> Result<url::Url, UpstreamError> {
        let base = url::Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidUrl(self.base_url.clone()));
        }
        base.join(&self.search_path)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", self.search_path, e)))
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_env_u64(key: &str, default_val: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(default_val)
}

fn parse_env_usize(key: &str, default_val: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default_val)
}
