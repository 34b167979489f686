//! Pre-flight checks before a podcast run.
//!
//! Validates that credentials and the URL are present before starting a
//! run that would otherwise fail midway.

use crate::config::Credentials;
use crate::error::{BlogcastError, Result};

/// Run pre-flight checks for a generation request.
pub fn check(credentials: &Credentials, url: &str) -> Result<()> {
    check_credentials(credentials)?;
    if url.trim().is_empty() {
        return Err(BlogcastError::InvalidInput("Please enter a URL first.".to_string()));
    }
    Ok(())
}

/// Check that all three API keys are configured.
pub fn check_credentials(credentials: &Credentials) -> Result<()> {
    let missing = credentials.missing();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BlogcastError::Config(format!(
            "Please enter all required API keys to enable podcast generation (missing: {}). \
             Set OPENAI_API_KEY, ELEVEN_LABS_API_KEY and FIRECRAWL_API_KEY or pass the --*-api-key flags.",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fail() {
        let err = check(&Credentials::new("sk", "", "fc"), "https://a.b").unwrap_err();
        assert!(err.to_string().contains("ElevenLabs API Key"));
    }

    #[test]
    fn test_empty_url_fails() {
        let err = check(&Credentials::new("a", "b", "c"), "   ").unwrap_err();
        assert!(matches!(err, BlogcastError::InvalidInput(_)));
    }

    #[test]
    fn test_complete_request_passes() {
        assert!(check(&Credentials::new("a", "b", "c"), "https://youtu.be/x").is_ok());
    }
}
