use thiserror::Error;
use tracing::{debug, warn};

use docsearch_api::response::SearchOutcome;
use docsearch_query::SearchOptions;

use crate::paginate::{normalize, NormalizeError};
use crate::upstream::{DocsClient, UpstreamError};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Fetch `query` once from upstream and return the normalized page as JSON
/// text. The query itself is passed through as-is.
pub async fn search_text(
    client: &DocsClient,
    query: &str,
    options: &SearchOptions,
) -> Result<String, SearchError> {
    let params = options.params();
    debug!(
        target: "docsearchd",
        "[search] query={:?} page={} per_page={}",
        query,
        params.page(),
        params.per_page()
    );
    let raw = client.fetch(query).await?;
    Ok(normalize(&raw, params)?)
}

/// Caller-facing boundary: never fails, every error becomes
/// `{ success: false, error }`.
pub async fn search(client: &DocsClient, query: &str, options: &SearchOptions) -> SearchOutcome {
    match search_text(client, query, options).await {
        Ok(text) => SearchOutcome::ok(text),
        Err(e) => {
            if let SearchError::Normalize(err) = &e {
                warn!(target: "docsearchd", "[search] could not normalize upstream response: {}", err);
            }
            SearchOutcome::failure(e.to_string())
        }
    }
}
