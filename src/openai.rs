//! HTTP and OpenAI client construction with sensible defaults.

use crate::error::{BlogcastError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for outbound API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Build a reqwest client with the given timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("blogcast/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(BlogcastError::Http)
}

/// Create an OpenAI client for an explicit API key.
///
/// The key is passed in rather than read from `OPENAI_API_KEY` so the web
/// form can supply per-request credentials.
pub fn create_client(api_key: &str, timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let config = OpenAIConfig::new().with_api_key(api_key);
    Ok(Client::with_config(config).with_http_client(http_client(timeout)?))
}
