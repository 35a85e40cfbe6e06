use crate::config::Config;
use crate::models::{CatalogItem, MediaType};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base: String,
}

/// The two catalog lookups the recommendation flow needs.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search(&self, media_type: MediaType, query: &str) -> Result<Vec<CatalogItem>>;
    async fn recommendations(&self, media_type: MediaType, id: &str) -> Result<Vec<CatalogItem>>;
}

#[derive(Debug, Deserialize)]
struct ResultsPage {
    results: Vec<CatalogItem>,
}

impl TmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client failed")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_key, &config.api_base, config.timeout)
    }

    /// `path_and_query` never carries the key, so it is safe to put in errors.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.base, path_and_query);
        debug!("GET {}", path_and_query);
        let res = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("request to {} failed", path_and_query))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| e.without_url())
            .context("reading body failed")?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}: {}", path_and_query, status, text));
        }
        let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(parsed)
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search(&self, media_type: MediaType, query: &str) -> Result<Vec<CatalogItem>> {
        let path = format!(
            "/search/{}?query={}",
            media_type.as_path(),
            urlencoding::encode(query)
        );
        let page: ResultsPage = self.get_json(&path).await?;
        Ok(page.results)
    }

    async fn recommendations(&self, media_type: MediaType, id: &str) -> Result<Vec<CatalogItem>> {
        let path = format!(
            "/{}/{}/recommendations",
            media_type.as_path(),
            urlencoding::encode(id)
        );
        let page: ResultsPage = self.get_json(&path).await?;
        Ok(page.results)
    }
}
