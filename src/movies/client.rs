use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::dto::{upstream_failed, OmdbDetail, OmdbSearchResponse};
use crate::config::MovieConfig;

#[async_trait]
pub trait MovieClient: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<OmdbSearchResponse>;
    /// `None` when the upstream has no movie with this id.
    async fn lookup(&self, imdb_id: &str) -> anyhow::Result<Option<OmdbDetail>>;
}

/// Client for the OMDb-style search API.
#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(cfg: &MovieConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build movie http client")?;
        Ok(Self {
            http,
            api_url: cfg.api_url.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, params: &[(&str, &str)]) -> anyhow::Result<T> {
        let body = self
            .http
            .get(&self.api_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .context("movie api request")?
            .error_for_status()
            .context("movie api status")?
            .json::<T>()
            .await
            .context("decode movie api response")?;
        Ok(body)
    }
}

#[async_trait]
impl MovieClient for OmdbClient {
    async fn search(&self, query: &str) -> anyhow::Result<OmdbSearchResponse> {
        let page: OmdbSearchResponse = self.get(&[("s", query.trim())]).await?;
        debug!(
            query = query.trim(),
            results = page.search.len(),
            upstream_error = ?page.error,
            "movie search"
        );
        Ok(page)
    }

    async fn lookup(&self, imdb_id: &str) -> anyhow::Result<Option<OmdbDetail>> {
        let detail: OmdbDetail = self.get(&[("i", imdb_id)]).await?;
        if upstream_failed(detail.response.as_deref()) {
            debug!(imdb_id, "movie not found upstream");
            return Ok(None);
        }
        debug!(imdb_id = %detail.imdb_id, "movie found upstream");
        Ok(Some(detail))
    }
}
