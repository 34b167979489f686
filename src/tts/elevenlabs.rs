//! ElevenLabs text-to-speech client.

use super::{AudioFormat, SpeechSynthesizer};
use crate::config::TtsSettings;
use crate::error::{BlogcastError, Result};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument};

/// Synthesizer backed by the ElevenLabs `text-to-speech` endpoint.
pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    voice_id: String,
    model_id: String,
    output_format: String,
}

impl ElevenLabsSynthesizer {
    pub fn new(client: reqwest::Client, api_key: &str, settings: &TtsSettings) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            voice_id: settings.voice_id.clone(),
            model_id: settings.model_id.clone(),
            output_format: settings.output_format.clone(),
        }
    }

    fn endpoint(&self) -> Result<url::Url> {
        url::Url::parse_with_params(
            &format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id),
            &[("output_format", self.output_format.as_str())],
        )
        .map_err(|e| BlogcastError::Config(format!("Invalid ElevenLabs URL: {}", e)))
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(self.endpoint()?)
            .header("xi-api-key", &self.api_key)
            .json(&json!({ "text": text, "model_id": self.model_id }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BlogcastError::Speech(format!("ElevenLabs returned {}: {}", status, body)));
        }

        let bytes = response.bytes().await?;
        debug!("Received {} bytes of audio", bytes.len());

        if bytes.is_empty() {
            return Err(BlogcastError::Speech("ElevenLabs returned no audio".to_string()));
        }

        Ok(bytes.to_vec())
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::from_output_format(&self.output_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let synth = ElevenLabsSynthesizer::new(reqwest::Client::new(), "key", &TtsSettings::default());
        assert_eq!(
            synth.endpoint().unwrap().as_str(),
            "https://api.elevenlabs.io/v1/text-to-speech/JBFqnCBsd6RMkjVDRZzb?output_format=pcm_44100"
        );
        assert_eq!(synth.format(), AudioFormat::Pcm { sample_rate: 44100 });
    }
}
