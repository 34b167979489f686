//! Content source classification.
//!
//! Decides whether a URL points at a YouTube video (content comes from its
//! transcript) or at a generic article (content is scraped by the agent).

mod youtube;

pub use youtube::{is_video_url, video_id, watch_url};

use serde::{Deserialize, Serialize};

/// Where the content for a podcast comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentSource {
    /// A YouTube video. `video_id` is absent when the URL matched the
    /// domain pattern but carried no parsable id.
    Video { video_id: Option<String> },
    /// A blog post or article.
    Article,
}

impl ContentSource {
    pub fn is_video(&self) -> bool {
        matches!(self, ContentSource::Video { .. })
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Video { .. } => write!(f, "YouTube video"),
            ContentSource::Article => write!(f, "blog/article"),
        }
    }
}

/// Classify a URL.
pub fn classify(url: &str) -> ContentSource {
    if is_video_url(url) {
        ContentSource::Video {
            video_id: video_id(url),
        }
    } else {
        ContentSource::Article
    }
}
