//! Doctor command - verify credentials, tools and configuration.

use crate::cli::{format_size, Output};
use crate::config::{mask, Credentials, Settings};
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(credentials: &Credentials, settings: &Settings) -> anyhow::Result<()> {
    Output::header("Blogcast Doctor");
    println!();
    println!("Checking credentials, tools and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    let key_checks = check_api_keys(credentials);
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    println!("{}", style("Playback").bold());
    let player_check = check_players();
    player_check.print();
    checks.push(player_check);

    println!();

    println!("{}", style("Output").bold());
    let dir_check = check_output_dir(&settings.output_dir());
    dir_check.print();
    checks.push(dir_check);

    let transcript_check = if settings.youtube.transcripts_enabled {
        CheckResult::ok(
            "YouTube transcripts",
            &format!("enabled ({})", settings.youtube.languages.join(", ")),
        )
    } else {
        CheckResult::warning(
            "YouTube transcripts",
            "disabled",
            "YouTube URLs will fail. Set youtube.transcripts_enabled = true",
        )
    };
    transcript_check.print();
    checks.push(transcript_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Blogcast.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Blogcast is ready to use.");
    }

    Ok(())
}

fn check_api_keys(credentials: &Credentials) -> Vec<CheckResult> {
    [
        ("OPENAI_API_KEY", credentials.openai_api_key.as_str()),
        ("ELEVEN_LABS_API_KEY", credentials.elevenlabs_api_key.as_str()),
        ("FIRECRAWL_API_KEY", credentials.firecrawl_api_key.as_str()),
    ]
    .into_iter()
    .map(|(name, key)| check_key(name, key))
    .collect()
}

fn check_key(name: &str, key: &str) -> CheckResult {
    if key.trim().is_empty() {
        CheckResult::error(
            name,
            "not set",
            &format!("Set with: export {}='...' (or enter it in the web form)", name),
        )
    } else if name == "OPENAI_API_KEY" && !key.starts_with("sk-") {
        CheckResult::warning(
            name,
            &format!("set but format looks unusual ({})", mask(key)),
            "Expected format: sk-... (OpenAI API key)",
        )
    } else {
        CheckResult::ok(name, &format!("configured ({})", mask(key)))
    }
}

fn check_players() -> CheckResult {
    let found = ["afplay", "aplay", "ffplay"]
        .into_iter()
        .find(|player| which(player));

    match found {
        Some(player) => CheckResult::ok("Audio player", player),
        None => CheckResult::warning(
            "Audio player",
            "none found",
            "--play needs afplay, aplay or ffplay. Generated files are still saved.",
        ),
    }
}

/// Whether an executable is on PATH.
fn which(name: &str) -> bool {
    let probe = if cfg!(windows) { "where" } else { "which" };
    Command::new(probe)
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn check_output_dir(dir: &Path) -> CheckResult {
    if !dir.exists() {
        return CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", dir.display()),
            "Directory will be created on first podcast",
        );
    }

    let entries: Vec<_> = std::fs::read_dir(dir)
        .map(|rd| rd.filter_map(|e| e.ok()).collect())
        .unwrap_or_default();
    let podcasts: Vec<_> = entries
        .iter()
        .filter(|e| e.file_name().to_string_lossy().starts_with("podcast_"))
        .collect();
    let total: u64 = podcasts
        .iter()
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum();

    CheckResult::ok(
        "Output directory",
        &format!(
            "{} ({} podcast(s), {})",
            dir.display(),
            podcasts.len(),
            format_size(total)
        ),
    )
}

fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: blogcast config edit",
        )
    }
}
