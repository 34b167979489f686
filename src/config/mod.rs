//! Configuration module for Blogcast.
//!
//! Handles loading application settings, prompt templates and API credentials.

mod credentials;
mod prompts;
mod settings;

pub use credentials::{mask, Credentials};
pub use prompts::{AgentPrompts, Prompts};
pub use settings::{
    GeneralSettings, LlmSettings, PromptSettings, ScraperSettings, Settings, TtsSettings,
    YoutubeSettings,
};
