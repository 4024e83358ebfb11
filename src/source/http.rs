//! HTTP Source
//!
//! Fetches the dashboard documents from an upstream service.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use statewise_core::{DemographicStats, StateWiseData};
use std::time::Duration;

use super::error::{SourceError, SourceResult};
use super::StatsSource;

/// Upstream serving `{base_url}/statewise` and `{base_url}/stats`
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("statewise/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of a document
    pub fn url(&self, document: &str) -> String {
        format!("{}/{}", self.base_url, document)
    }

    async fn get_json<T: DeserializeOwned>(&self, document: &'static str) -> SourceResult<T> {
        let url = self.url(document);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url = %url, bytes = bytes.len(), "Fetched upstream payload");

        serde_json::from_slice(&bytes).map_err(|error| SourceError::Parse { document, error })
    }
}

#[async_trait]
impl StatsSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch_statewise(&self) -> SourceResult<StateWiseData> {
        self.get_json("statewise").await
    }

    async fn fetch_stats(&self) -> SourceResult<DemographicStats> {
        self.get_json("stats").await
    }
}
