//! API credentials for the external services.

use serde::Deserialize;

/// The three keys a run needs. Never written to the config file.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub elevenlabs_api_key: String,
    #[serde(default)]
    pub firecrawl_api_key: String,
}

impl Credentials {
    pub fn new(openai: &str, elevenlabs: &str, firecrawl: &str) -> Self {
        Self {
            openai_api_key: openai.trim().to_string(),
            elevenlabs_api_key: elevenlabs.trim().to_string(),
            firecrawl_api_key: firecrawl.trim().to_string(),
        }
    }

    /// Names of the keys that are empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai_api_key.trim().is_empty() {
            missing.push("OpenAI API Key");
        }
        if self.elevenlabs_api_key.trim().is_empty() {
            missing.push("ElevenLabs API Key");
        }
        if self.firecrawl_api_key.trim().is_empty() {
            missing.push("Firecrawl API Key");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &mask(&self.openai_api_key))
            .field("elevenlabs_api_key", &mask(&self.elevenlabs_api_key))
            .field("firecrawl_api_key", &mask(&self.firecrawl_api_key))
            .finish()
    }
}

/// Mask a secret for display, keeping at most the last four characters.
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        "<unset>".to_string()
    } else if chars.len() <= 8 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys() {
        let creds = Credentials::new("sk-abc", "", "  ");
        assert_eq!(creds.missing(), vec!["ElevenLabs API Key", "Firecrawl API Key"]);
        assert!(!creds.is_complete());

        let creds = Credentials::new("a", "b", "c");
        assert!(creds.is_complete());
    }

    #[test]
    fn test_debug_masks_secrets() {
        let creds = Credentials::new("sk-1234567890abcdef", "", "short");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("1234567890"));
        assert!(debug.contains("****cdef"));
        assert!(debug.contains("<unset>"));
    }
}
