//! Transcript retrieval for video sources.

mod youtube;

pub use youtube::{select_track, CaptionTrack, YoutubeTranscriptFetcher};

use crate::error::{BlogcastError, Result};
use crate::source::video_id;
use async_trait::async_trait;
use tracing::{info, instrument};

/// A single caption line.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch caption segments for a video ID.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}

/// Fetch the transcript for a video URL as one space-joined string.
///
/// `fetcher` is `None` when transcript support is switched off; that is
/// reported as an error so the caller can surface it.
#[instrument(skip(fetcher))]
pub async fn fetch_transcript(fetcher: Option<&dyn TranscriptFetcher>, url: &str) -> Result<String> {
    let fetcher = fetcher.ok_or(BlogcastError::TranscriptUnavailable)?;

    let id = video_id(url)
        .ok_or_else(|| BlogcastError::InvalidInput("Invalid YouTube URL.".to_string()))?;

    let segments = fetcher.fetch(&id).await?;
    info!("Fetched {} transcript segments for {}", segments.len(), id);

    Ok(join_segments(&segments))
}

/// Join segment texts with single spaces.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedFetcher {
        segments: Vec<TranscriptSegment>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TranscriptFetcher for FixedFetcher {
        async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
            self.requested.lock().unwrap().push(video_id.to_string());
            Ok(self.segments.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl TranscriptFetcher for FailingFetcher {
        async fn fetch(&self, _video_id: &str) -> Result<Vec<TranscriptSegment>> {
            Err(BlogcastError::Transcript("Subtitles are disabled for this video".to_string()))
        }
    }

    fn segment(text: &str, start: f64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            start_seconds: start,
            duration_seconds: 1.0,
        }
    }

    #[tokio::test]
    async fn test_unavailable_capability_is_an_error() {
        let err = fetch_transcript(None, "https://youtu.be/abc").await.unwrap_err();
        assert!(matches!(err, BlogcastError::TranscriptUnavailable));
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let fetcher = FixedFetcher {
            segments: vec![],
            requested: Mutex::new(vec![]),
        };
        let err = fetch_transcript(Some(&fetcher), "https://www.youtube.com/watch")
            .await
            .unwrap_err();
        assert!(matches!(err, BlogcastError::InvalidInput(_)));
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_segments_are_joined() {
        let fetcher = FixedFetcher {
            segments: vec![segment("hello", 0.0), segment("there", 1.0), segment("world", 2.0)],
            requested: Mutex::new(vec![]),
        };
        let text = fetch_transcript(Some(&fetcher), "https://www.youtube.com/watch?v=ABC123&t=5")
            .await
            .unwrap();
        assert_eq!(text, "hello there world");
        assert_eq!(*fetcher.requested.lock().unwrap(), vec!["ABC123".to_string()]);
    }

    #[tokio::test]
    async fn test_remote_failure_is_surfaced() {
        let err = fetch_transcript(Some(&FailingFetcher), "https://youtu.be/XYZ")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Subtitles are disabled"));
    }
}
