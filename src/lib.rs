//! Blogcast - Blog/YouTube to Podcast
//!
//! Turns a blog post or a YouTube video into a short spoken podcast.
//!
//! # Overview
//!
//! Given a URL, Blogcast:
//! - decides whether it is a YouTube video or an article
//! - fetches the video transcript, or lets the agent scrape the article
//! - has an LLM agent write a summary of at most 2000 characters
//! - converts the summary to speech and saves it as `podcast_<uuid>.wav`
//!
//! # Architecture
//!
//! - `config` - Settings, prompt templates and API credentials
//! - `source` - URL classification and YouTube video IDs
//! - `transcript` - Caption fetching for YouTube videos
//! - `scraper` - Article scraping (Firecrawl)
//! - `tts` - Text-to-speech (ElevenLabs)
//! - `agent` - Tool-calling LLM agent
//! - `audio` - Writing and playing generated audio
//! - `orchestrator` - One end-to-end run
//!
//! # Example
//!
//! ```rust,no_run
//! use blogcast::config::{Credentials, Settings};
//! use blogcast::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::new("sk-...", "el-...", "fc-...");
//!     let orchestrator = Orchestrator::new(&settings, &credentials)?;
//!
//!     let podcast = orchestrator.generate("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("Saved {}", podcast.audio_path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod scraper;
pub mod source;
pub mod transcript;
pub mod tts;

pub use error::{BlogcastError, Result};
