//! Firecrawl scrape API client.

use super::{ScrapeResult, Scraper};
use crate::error::{BlogcastError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

/// Scraper backed by the Firecrawl `/v1/scrape` endpoint.
pub struct FirecrawlScraper {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ScrapeData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    metadata: Option<ScrapeMetadata>,
}

#[derive(Debug, Deserialize)]
struct ScrapeMetadata {
    #[serde(default)]
    title: Option<String>,
}

impl FirecrawlScraper {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/scrape", self.base_url)
    }
}

#[async_trait]
impl Scraper for FirecrawlScraper {
    #[instrument(skip(self))]
    async fn scrape(&self, url: &str) -> Result<ScrapeResult> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&json!({ "url": url, "formats": ["markdown"] }))
            .send()
            .await?;

        let status = response.status();
        let body: ScrapeResponse = response.json().await.map_err(|e| {
            BlogcastError::Scrape(format!("Unreadable Firecrawl response ({}): {}", status, e))
        })?;

        into_result(url, status, body)
    }
}

fn into_result(url: &str, status: reqwest::StatusCode, body: ScrapeResponse) -> Result<ScrapeResult> {
    if !status.is_success() || !body.success {
        return Err(BlogcastError::Scrape(format!(
            "Firecrawl returned {}: {}",
            status,
            body.error.unwrap_or_else(|| "unknown error".to_string())
        )));
    }

    let data = body
        .data
        .ok_or_else(|| BlogcastError::Scrape("No data returned from Firecrawl".to_string()))?;

    let markdown = data
        .markdown
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| BlogcastError::Scrape("No markdown content returned from Firecrawl".to_string()))?;

    debug!("Scraped {} characters from {}", markdown.len(), url);

    Ok(ScrapeResult {
        url: url.to_string(),
        markdown,
        title: data.metadata.and_then(|m| m.title),
    })
}
