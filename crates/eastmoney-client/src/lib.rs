//! Eastmoney data-center client for the M&A disclosure feed.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use report_core::RawRecord;

const BASE_URL: &str = "https://datacenter-web.eastmoney.com";
const REPORT_NAME: &str = "RPTA_WEB_BGCZMX";
const API_TOKEN: &str = "894050c76af8597a853f5b408b759f5d";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(u16),
}

/// Client for the RPTA_WEB_BGCZMX disclosure listing.
#[derive(Clone)]
pub struct EastmoneyClient {
    client: Client,
    base_url: String,
}

impl EastmoneyClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Point the client at an alternate host (test servers).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }

    /// Fetch the latest disclosure records, newest first.
    pub async fn try_fetch(&self) -> Result<Vec<RawRecord>, FeedError> {
        let url = format!("{}/api/data/v1/get", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("sortColumns", "SCGGRQ"),
                ("sortTypes", "-1"),
                ("pageSize", "50"),
                ("pageNumber", "1"),
                ("columns", "ALL"),
                ("source", "WEB"),
                ("token", API_TOKEN),
                ("reportName", REPORT_NAME),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let envelope: FeedEnvelope = response.json().await?;
        Ok(envelope.result.map(|r| r.data).unwrap_or_default())
    }

    /// Fetch, degrading any failure to an empty feed. The pipeline treats
    /// "feed unavailable" the same as "no data today".
    pub async fn fetch(&self) -> Vec<RawRecord> {
        match self.try_fetch().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "fetched disclosure records");
                records
            }
            Err(e) => {
                tracing::error!("数据抓取失败: {}", e);
                Vec::new()
            }
        }
    }
}

impl Default for EastmoneyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    #[serde(default)]
    result: Option<FeedResult>,
}

#[derive(Debug, Deserialize)]
struct FeedResult {
    #[serde(default)]
    data: Vec<RawRecord>,
}
