//! CLI module for Blogcast.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{format_size, Output};

use crate::config::Credentials;
use clap::{Args, Parser, Subcommand};

/// Blogcast - Blog/YouTube to Podcast
///
/// Summarizes a blog post or YouTube video and reads the summary aloud.
#[derive(Parser, Debug)]
#[command(name = "blogcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(flatten)]
    pub keys: KeyArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// API keys, taken from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true, default_value = "")]
    pub openai_api_key: String,

    /// ElevenLabs API key
    #[arg(long, env = "ELEVEN_LABS_API_KEY", hide_env_values = true, global = true, default_value = "")]
    pub elevenlabs_api_key: String,

    /// Firecrawl API key
    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true, global = true, default_value = "")]
    pub firecrawl_api_key: String,
}

impl KeyArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            &self.openai_api_key,
            &self.elevenlabs_api_key,
            &self.firecrawl_api_key,
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a podcast from a blog or YouTube URL
    Generate {
        /// Blog/article URL or YouTube video URL
        url: String,

        /// Play the podcast once it is generated
        #[arg(short, long)]
        play: bool,

        /// Also copy the podcast to this path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start the web form for generating podcasts in a browser
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8501")]
        port: u16,
    },

    /// Check API keys, tools and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
