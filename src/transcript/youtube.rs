//! YouTube caption fetching over the innertube player API.

use super::{TranscriptFetcher, TranscriptSegment};
use crate::error::{BlogcastError, Result};
use crate::source::watch_url;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

/// A caption track advertised by the player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `Some("asr")` for auto-generated captions.
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Transcript fetcher backed by public YouTube endpoints.
pub struct YoutubeTranscriptFetcher {
    client: reqwest::Client,
    languages: Vec<String>,
    api_key_regex: Regex,
}

impl YoutubeTranscriptFetcher {
    pub fn new(client: reqwest::Client, languages: Vec<String>) -> Self {
        Self {
            client,
            languages,
            api_key_regex: Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
                .expect("Invalid regex"),
        }
    }

    /// Scrape the innertube API key from the watch page.
    async fn fetch_api_key(&self, video_id: &str) -> Result<String> {
        let html = self
            .client
            .get(watch_url(video_id))
            .header("Accept-Language", "en-US")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_api_key(&self.api_key_regex, &html).ok_or_else(|| {
            if html.contains("class=\"g-recaptcha\"") {
                BlogcastError::Transcript(
                    "YouTube is blocking requests from this IP (captcha required)".to_string(),
                )
            } else {
                BlogcastError::Transcript(format!("Could not read player data for video {}", video_id))
            }
        })
    }

    /// Ask the player API for the list of caption tracks.
    async fn fetch_caption_tracks(&self, video_id: &str, api_key: &str) -> Result<Vec<CaptionTrack>> {
        let endpoint = url::Url::parse_with_params(PLAYER_ENDPOINT, &[("key", api_key)])
            .map_err(|e| BlogcastError::Transcript(format!("Invalid player URL: {}", e)))?;

        let body = json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let player: serde_json::Value = self
            .client
            .post(endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        caption_tracks_from_player(&player, video_id)
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let api_key = self.fetch_api_key(video_id).await?;
        let tracks = self.fetch_caption_tracks(video_id, &api_key).await?;

        let track = select_track(&tracks, &self.languages).ok_or_else(|| {
            BlogcastError::Transcript(format!("No transcripts are available for video {}", video_id))
        })?;
        debug!(
            "Using {} caption track ({})",
            track.language_code,
            if track.is_generated() { "generated" } else { "manual" }
        );

        let xml = self
            .client
            .get(track.base_url.replace("&fmt=srv3", ""))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_timedtext(&xml)
    }
}

fn extract_api_key(regex: &Regex, html: &str) -> Option<String> {
    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn caption_tracks_from_player(player: &serde_json::Value, video_id: &str) -> Result<Vec<CaptionTrack>> {
    let status = player["playabilityStatus"]["status"].as_str().unwrap_or("OK");
    if status != "OK" {
        let reason = player["playabilityStatus"]["reason"]
            .as_str()
            .unwrap_or("video is unplayable");
        return Err(BlogcastError::Transcript(format!(
            "Video {} is unavailable: {}",
            video_id, reason
        )));
    }

    let tracks = &player["captions"]["playerCaptionsTracklistRenderer"]["captionTracks"];
    if tracks.is_null() {
        return Err(BlogcastError::Transcript(format!(
            "Subtitles are disabled for video {}",
            video_id
        )));
    }

    Ok(serde_json::from_value(tracks.clone())?)
}

/// Pick a caption track: the first preferred language wins, manual tracks
/// before auto-generated ones. Falls back to the first track.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> Option<&'a CaptionTrack> {
    for language in languages {
        let matching = tracks.iter().filter(|t| &t.language_code == language);
        let mut generated = None;
        for track in matching {
            if !track.is_generated() {
                return Some(track);
            }
            generated.get_or_insert(track);
        }
        if generated.is_some() {
            return generated;
        }
    }
    tracks.first()
}

/// Parse timedtext XML into segments. Empty lines are dropped.
fn parse_timedtext(xml: &str) -> Result<Vec<TranscriptSegment>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| BlogcastError::Transcript(format!("Malformed caption XML: {}", e)))?;

    let segments = doc
        .descendants()
        .filter(|node| node.has_tag_name("text"))
        .filter_map(|node| {
            let text = caption_text(&node_text(node));
            if text.is_empty() {
                return None;
            }

            Some(TranscriptSegment {
                text,
                start_seconds: seconds_attr(node, "start"),
                duration_seconds: seconds_attr(node, "dur"),
            })
        })
        .collect();

    Ok(segments)
}

fn node_text(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn seconds_attr(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.0)
}

/// Caption text is itself escaped markup once the XML layer is decoded.
/// Parse it as a fragment to resolve entities and drop formatting tags.
fn caption_text(raw: &str) -> String {
    let wrapped = format!("<t>{}</t>", raw);
    let text = match roxmltree::Document::parse(&wrapped) {
        Ok(fragment) => node_text(fragment.root_element()),
        Err(_) => raw.to_string(),
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
