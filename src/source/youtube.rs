//! YouTube URL parsing.

const WATCH_PATTERN: &str = "youtube.com/watch";
const SHORT_PATTERN: &str = "youtu.be/";
const WATCH_QUERY: &str = "watch?v=";

/// Check if the provided URL is a YouTube video link.
pub fn is_video_url(url: &str) -> bool {
    url.contains(WATCH_PATTERN) || url.contains(SHORT_PATTERN)
}

/// Extract the video ID from a YouTube URL.
///
/// `watch?v=` links take everything after the last `watch?v=` up to the
/// first `&`; short links take everything after the last `youtu.be/` up to
/// the first `?`.
pub fn video_id(url: &str) -> Option<String> {
    let id = if let Some((_, rest)) = url.rsplit_once(WATCH_QUERY) {
        rest.split('&').next()
    } else if let Some((_, rest)) = url.rsplit_once(SHORT_PATTERN) {
        rest.split('?').next()
    } else {
        None
    }?;

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_url() {
        assert!(is_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_url("youtube.com/watch"));
        assert!(is_video_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_video_url("see youtu.be/x in text"));

        assert!(!is_video_url("https://example.com/blog/post"));
        assert!(!is_video_url("https://youtube.com/playlist?list=PL123"));
        assert!(!is_video_url("https://youtu.be"));
        assert!(!is_video_url(""));
    }

    #[test]
    fn test_video_id_from_watch_url() {
        assert_eq!(video_id("watch?v=ABC123&t=5"), Some("ABC123".to_string()));
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_video_id_from_short_url() {
        assert_eq!(video_id("youtu.be/XYZ?foo=bar"), Some("XYZ".to_string()));
        assert_eq!(
            video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_pattern_takes_precedence() {
        assert_eq!(
            video_id("https://youtu.be/redirect?to=watch?v=INNER&x=1"),
            Some("INNER".to_string())
        );
    }

    #[test]
    fn test_video_id_absent() {
        assert_eq!(video_id("https://example.com/article"), None);
        assert_eq!(video_id("https://www.youtube.com/watch"), None);
        assert_eq!(video_id("https://www.youtube.com/watch?v="), None);
        assert_eq!(video_id("https://youtu.be/?si=abc"), None);
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("abc"), "https://www.youtube.com/watch?v=abc");
    }
}
