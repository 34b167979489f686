//! Local playback through whichever system audio player is installed.

use crate::error::{BlogcastError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Players tried in order, with the arguments placed before the file path.
const PLAYERS: &[(&str, &[&str])] = &[
    ("afplay", &[]),
    ("aplay", &["-q"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
];

/// Play an audio file and wait for playback to finish.
#[instrument]
pub async fn play(path: &Path) -> Result<()> {
    for (player, args) in PLAYERS {
        let result = Command::new(player)
            .args(*args)
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => return Ok(()),
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(BlogcastError::Io(std::io::Error::other(format!(
                    "{} failed: {}",
                    player, stderr
                ))));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} not installed", player);
                continue;
            }
            Err(e) => return Err(BlogcastError::Io(e)),
        }
    }

    Err(BlogcastError::ToolNotFound(
        "an audio player (afplay, aplay or ffplay)".to_string(),
    ))
}
