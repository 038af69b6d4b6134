use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use docsearch_api::limits::{enforce_body_size, LimitError};

use crate::config::UpstreamConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error(transparent)]
    TooLarge(#[from] LimitError),
}

pub type FetchFuture = Pin<Box<dyn Future<Output = Result<String, UpstreamError>> + Send>>;

/// Fetch primitive: query in, raw response text out.
pub type FetchFn = dyn Fn(&str) -> FetchFuture + Send + Sync;

/// Client for the remote documentation search endpoint.
#[derive(Clone)]
pub struct DocsClient {
    fetcher: Arc<FetchFn>,
}

impl DocsClient {
    pub fn new_with_fetcher(fetcher: Arc<FetchFn>) -> Self {
        Self { fetcher }
    }

    /// Client backed by a canned fetcher instead of the network (for tests).
    pub fn new_test<F>(fetch: F) -> Self
    where
        F: Fn(&str) -> FetchFuture + Send + Sync + 'static,
    {
        Self::new_with_fetcher(Arc::new(fetch))
    }

    /// Client performing `GET {base_url}{search_path}?query=<q>` over HTTP.
    pub fn new_http(cfg: UpstreamConfig) -> Result<Self, UpstreamError> {
        let endpoint = cfg.endpoint()?;
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(UpstreamError::Request)?;
        let cfg = Arc::new(cfg);
        let fetcher: Arc<FetchFn> = Arc::new(move |query: &str| -> FetchFuture {
            let http = http.clone();
            let cfg = cfg.clone();
            let mut url = endpoint.clone();
            url.query_pairs_mut().append_pair("query", query);
            Box::pin(async move { fetch_http(&http, url, &cfg).await })
        });
        Ok(Self::new_with_fetcher(fetcher))
    }

    /// Issue exactly one upstream fetch. Failures are not retried.
    pub async fn fetch(&self, query: &str) -> Result<String, UpstreamError> {
        let res = (self.fetcher)(query).await;
        if let Err(e) = &res {
            warn!(target: "docsearchd", "[upstream] fetch failed for query={:?}: {}", query, e);
        }
        res
    }
}

async fn fetch_http(
    http: &reqwest::Client,
    url: url::Url,
    cfg: &UpstreamConfig,
) -> Result<String, UpstreamError> {
    debug!(target: "docsearchd", "[upstream] GET {}", url);
    let map_err = |e: reqwest::Error| {
        if e.is_timeout() {
            UpstreamError::Timeout(cfg.timeout())
        } else {
            UpstreamError::Request(e)
        }
    };
    let resp = http
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(map_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status.as_u16()));
    }
    if let Some(len) = resp.content_length() {
        enforce_body_size(len as usize, cfg.max_body_bytes)?;
    }
    let body = resp.bytes().await.map_err(map_err)?;
    enforce_body_size(body.len(), cfg.max_body_bytes)?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
