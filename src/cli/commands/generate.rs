//! Generate command implementation.

use crate::audio::play;
use crate::cli::preflight;
use crate::cli::{format_size, Output};
use crate::config::{Credentials, Settings};
use crate::orchestrator::Orchestrator;
use crate::source::classify;
use anyhow::Result;
use std::path::Path;
use tracing::error;

/// Run the generate command.
pub async fn run_generate(
    url: &str,
    play_audio: bool,
    output: Option<String>,
    credentials: &Credentials,
    settings: &Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(credentials, url) {
        Output::error(&e.to_string());
        Output::info("Run 'blogcast doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings, credentials)?;

    let source = classify(url.trim());
    if source.is_video() {
        Output::info("Detected YouTube URL. Extracting transcript...");
    } else {
        Output::info("Detected blog/article URL. Scraping content...");
    }

    let spinner =
        Output::spinner("Processing... Scraping content, summarizing and generating podcast");

    let result = match orchestrator.generate(url).await {
        Ok(result) => {
            spinner.finish_and_clear();
            result
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Podcast generation failed: {}", e);
            Output::error(&format!("An error occurred: {}", e));
            return Err(e.into());
        }
    };

    Output::success("Podcast generated successfully!");
    Output::kv("File", &result.audio_path.display().to_string());
    Output::kv("Size", &format_size(result.bytes_written));
    Output::kv("Source", &result.source.to_string());

    if let Some(summary) = &result.summary {
        Output::header("Summary");
        Output::quote(summary);
        println!();
    }

    if let Some(dest) = output {
        let dest = Settings::expand_path(&dest);
        let dest = if dest.is_dir() {
            dest.join(crate::audio::DOWNLOAD_NAME)
        } else {
            dest
        };
        copy_to(&result.audio_path, &dest)?;
        Output::success(&format!("Saved a copy to {}", dest.display()));
    }

    if play_audio {
        Output::info("Playing podcast...");
        if let Err(e) = play(&result.audio_path).await {
            Output::warning(&format!("Playback failed: {}", e));
        }
    }

    Ok(())
}

fn copy_to(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::copy(source, dest)?;
    Ok(())
}
