//! Pipeline orchestrator for Blogcast.
//!
//! Runs one podcast generation: classify the URL, fetch a transcript for
//! videos, hand the content to the agent, and write the resulting audio.

use crate::agent::{Agent, TaskAgent, ToolContext};
use crate::audio::save_first_audio;
use crate::config::{Credentials, Prompts, Settings};
use crate::error::{BlogcastError, Result};
use crate::openai::{create_client, http_client};
use crate::scraper::FirecrawlScraper;
use crate::source::{classify, ContentSource};
use crate::transcript::{fetch_transcript, TranscriptFetcher, YoutubeTranscriptFetcher};
use crate::tts::ElevenLabsSynthesizer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the Blogcast pipeline.
pub struct Orchestrator {
    prompts: Prompts,
    agent: Arc<dyn TaskAgent>,
    transcripts: Option<Arc<dyn TranscriptFetcher>>,
    output_dir: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator wired to the real external services.
    pub fn new(settings: &Settings, credentials: &Credentials) -> Result<Self> {
        let missing = credentials.missing();
        if !missing.is_empty() {
            return Err(BlogcastError::Config(format!(
                "Missing API keys: {}",
                missing.join(", ")
            )));
        }

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let http = http_client(settings.request_timeout())?;

        let scraper = Arc::new(FirecrawlScraper::new(
            http.clone(),
            &settings.scraper.base_url,
            &credentials.firecrawl_api_key,
        ));
        let synthesizer = Arc::new(ElevenLabsSynthesizer::new(
            http.clone(),
            &credentials.elevenlabs_api_key,
            &settings.tts,
        ));
        let tools = ToolContext::new(
            scraper,
            synthesizer,
            settings.tts.max_chars,
            settings.scraper.max_content_chars,
        );

        let agent = Agent::new(
            create_client(&credentials.openai_api_key, settings.request_timeout())?,
            tools,
            &settings.llm.model,
            &prompts.agent_system_prompt(settings.tts.max_chars),
        )
        .with_max_iterations(settings.llm.max_iterations);

        let transcripts: Option<Arc<dyn TranscriptFetcher>> = if settings.youtube.transcripts_enabled {
            Some(Arc::new(YoutubeTranscriptFetcher::new(
                http,
                settings.youtube.languages.clone(),
            )))
        } else {
            None
        };

        Ok(Self::with_components(
            settings,
            prompts,
            Arc::new(agent),
            transcripts,
        ))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        agent: Arc<dyn TaskAgent>,
        transcripts: Option<Arc<dyn TranscriptFetcher>>,
    ) -> Self {
        Self {
            prompts,
            agent,
            transcripts,
            output_dir: settings.output_dir(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build the agent input for a URL, fetching the transcript for videos.
    #[instrument(skip(self))]
    pub async fn prepare_input(&self, url: &str) -> Result<(ContentSource, String)> {
        let source = classify(url);

        let input = match source {
            ContentSource::Video { .. } => {
                info!("Detected YouTube URL. Extracting transcript...");
                let transcript = fetch_transcript(self.transcripts.as_deref(), url).await?;
                if transcript.trim().is_empty() {
                    return Err(BlogcastError::EmptyTranscript);
                }
                self.prompts.transcript_input(url, &transcript)
            }
            ContentSource::Article => {
                info!("Detected blog/article URL. Scraping content...");
                self.prompts.article_input(url)
            }
        };

        Ok((source, input))
    }

    /// Generate a podcast from a blog or YouTube URL.
    #[instrument(skip(self))]
    pub async fn generate(&self, url: &str) -> Result<PodcastResult> {
        let url = url.trim();
        if url.is_empty() {
            return Err(BlogcastError::InvalidInput("Please enter a URL first.".to_string()));
        }

        let (source, input) = self.prepare_input(url).await?;

        info!("Summarizing and generating audio...");
        let response = self.agent.run(&input).await?;
        info!(
            "Agent finished in {} iteration(s) with {} tool call(s)",
            response.iterations,
            response.tool_calls.len()
        );

        let saved = save_first_audio(&response.audio, &self.output_dir)?;

        Ok(PodcastResult {
            url: url.to_string(),
            source,
            summary: response.summary,
            agent_message: response.content,
            file_name: saved.file_name(),
            audio_path: saved.path,
            bytes_written: saved.bytes_written,
            mime_type: saved.mime_type,
            generated_at: Utc::now(),
        })
    }
}

/// Result of generating a podcast.
#[derive(Debug, Clone, Serialize)]
pub struct PodcastResult {
    pub url: String,
    pub source: ContentSource,
    /// Text that was spoken.
    pub summary: Option<String>,
    /// Final message from the agent.
    pub agent_message: String,
    pub file_name: String,
    pub audio_path: PathBuf,
    pub bytes_written: u64,
    pub mime_type: &'static str,
    pub generated_at: DateTime<Utc>,
}
