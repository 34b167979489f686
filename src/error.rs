//! Error types for Blogcast.

use thiserror::Error;

/// Library-level error type for Blogcast operations.
#[derive(Error, Debug)]
pub enum BlogcastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcript support is not available. Enable it with youtube.transcripts_enabled = true")]
    TranscriptUnavailable,

    #[error("Transcript fetch failed: {0}")]
    Transcript(String),

    #[error("No transcript found for this YouTube video.")]
    EmptyTranscript,

    #[error("Scraping failed: {0}")]
    Scrape(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("No audio was generated. Please try again.")]
    NoAudio,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Audio decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

/// Result type alias for Blogcast operations.
pub type Result<T> = std::result::Result<T, BlogcastError>;
