//! Configuration settings for Blogcast.

use crate::error::{BlogcastError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub tts: TtsSettings,
    pub scraper: ScraperSettings,
    pub youtube: YoutubeSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where generated podcasts are written.
    pub output_dir: String,
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error).
    pub log_level: String,
    /// Timeout applied to every outbound HTTP request.
    pub request_timeout_seconds: u64,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: "audio_generations".to_string(),
            log_level: "warn".to_string(),
            request_timeout_seconds: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Language model settings for the podcast agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat completion model driving the agent.
    pub model: String,
    /// Maximum LLM round trips per run.
    pub max_iterations: usize,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_iterations: 10,
        }
    }
}

/// ElevenLabs text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsSettings {
    pub base_url: String,
    pub voice_id: String,
    pub model_id: String,
    /// ElevenLabs output format, e.g. `pcm_44100` or `mp3_44100_128`.
    pub output_format: String,
    /// Longest text accepted for a single synthesis call.
    pub max_chars: usize,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            voice_id: "JBFqnCBsd6RMkjVDRZzb".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            output_format: "pcm_44100".to_string(),
            max_chars: 2000,
        }
    }
}

/// Firecrawl scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    pub base_url: String,
    /// Scraped markdown handed to the model is cut at this many characters.
    pub max_content_chars: usize,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.firecrawl.dev".to_string(),
            max_content_chars: 20_000,
        }
    }
}

/// YouTube transcript settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// When false, YouTube URLs fail with a transcript-unavailable error.
    pub transcripts_enabled: bool,
    /// Caption languages in order of preference.
    pub languages: Vec<String>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            transcripts_enabled: true,
            languages: vec!["en".to_string()],
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for a custom `agent.toml` (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BlogcastError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("blogcast")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.general.request_timeout_seconds)
    }

    /// Tracing filter directive for the crate. `-v` flags override the configured level.
    pub fn log_directive(&self, verbose: u8) -> String {
        let level = match verbose {
            0 => self.general.log_level.trim(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let level = if level.is_empty() { "warn" } else { level };
        format!("blogcast={}", level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.output_dir, "audio_generations");
        assert_eq!(settings.llm.model, "gpt-3.5-turbo");
        assert_eq!(settings.tts.voice_id, "JBFqnCBsd6RMkjVDRZzb");
        assert_eq!(settings.tts.model_id, "eleven_multilingual_v2");
        assert_eq!(settings.tts.max_chars, 2000);
        assert!(settings.youtube.transcripts_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            model = "gpt-4o-mini"

            [youtube]
            transcripts_enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.llm.max_iterations, 10);
        assert!(!settings.youtube.transcripts_enabled);
        assert_eq!(settings.youtube.languages, vec!["en".to_string()]);
        assert_eq!(settings.tts.output_format, "pcm_44100");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.general.output_dir = "/tmp/podcasts".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.output_dir, "/tmp/podcasts");
    }

    #[test]
    fn test_log_directive() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_directive(0), "blogcast=warn");

        settings.general.log_level = "debug".to_string();
        assert_eq!(settings.log_directive(0), "blogcast=debug");
        assert_eq!(settings.log_directive(1), "blogcast=info");
        assert_eq!(settings.log_directive(5), "blogcast=trace");

        settings.general.log_level = " ".to_string();
        assert_eq!(settings.log_directive(0), "blogcast=warn");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.request_timeout_seconds, 300);
    }
}
