//! Web scraping for blog and article sources.

mod firecrawl;

pub use firecrawl::FirecrawlScraper;

use crate::error::Result;
use async_trait::async_trait;

/// Scraped page content.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub url: String,
    pub markdown: String,
    pub title: Option<String>,
}

/// Trait for scraping providers.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scrape a page and return its main content as markdown.
    async fn scrape(&self, url: &str) -> Result<ScrapeResult>;
}
