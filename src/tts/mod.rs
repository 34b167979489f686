//! Text-to-speech synthesis.

mod elevenlabs;

pub use elevenlabs::ElevenLabsSynthesizer;

use crate::error::Result;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Trait for TTS providers.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize text and return the raw audio bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    /// Format of the bytes returned by `synthesize`.
    fn format(&self) -> AudioFormat;
}

/// Encoding of synthesized audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AudioFormat {
    /// Headerless signed 16-bit little-endian mono PCM.
    Pcm { sample_rate: u32 },
    /// A self-describing container such as MP3.
    Encoded { codec: String },
}

impl AudioFormat {
    /// Parse an ElevenLabs `output_format` string (`pcm_44100`, `mp3_44100_128`, ...).
    pub fn from_output_format(output_format: &str) -> Self {
        let mut parts = output_format.split('_');
        let codec = parts.next().unwrap_or_default().to_lowercase();

        if codec == "pcm" {
            if let Some(rate) = parts.next().and_then(|r| r.parse().ok()) {
                return AudioFormat::Pcm { sample_rate: rate };
            }
        }

        AudioFormat::Encoded { codec }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Pcm { .. } => "audio/wav",
            AudioFormat::Encoded { codec } => match codec.as_str() {
                "mp3" => "audio/mpeg",
                "ulaw" => "audio/basic",
                "opus" => "audio/ogg",
                _ => "application/octet-stream",
            },
        }
    }
}

/// A synthesized audio payload, base64 encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioArtifact {
    pub id: String,
    pub base64_audio: String,
    pub format: AudioFormat,
    /// Number of characters that were spoken.
    pub text_chars: usize,
}

impl AudioArtifact {
    pub fn from_bytes(bytes: &[u8], format: AudioFormat, text_chars: usize) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            base64_audio: base64::engine::general_purpose::STANDARD.encode(bytes),
            format,
            text_chars,
        }
    }

    /// Decode the payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(base64::engine::general_purpose::STANDARD.decode(&self.base64_audio)?)
    }
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
///
/// Returns the text unchanged when it already fits.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
