use async_trait::async_trait;
use blogcast::agent::{AgentResponse, TaskAgent};
use blogcast::config::{Prompts, Settings};
use blogcast::orchestrator::Orchestrator;
use blogcast::source::ContentSource;
use blogcast::transcript::{TranscriptFetcher, TranscriptSegment};
use blogcast::tts::{AudioArtifact, AudioFormat};
use blogcast::{BlogcastError, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct MockAgent {
    audio: Vec<AudioArtifact>,
    calls: Arc<Mutex<Vec<String>>>,
    fail_with: Option<String>,
}

impl MockAgent {
    fn speaking() -> Self {
        let pcm: Vec<u8> = [0i16, 500, -500, 0]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        Self {
            audio: vec![AudioArtifact::from_bytes(&pcm, AudioFormat::Pcm { sample_rate: 16000 }, 12)],
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    fn silent() -> Self {
        Self {
            audio: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::silent()
        }
    }
}

#[async_trait]
impl TaskAgent for MockAgent {
    async fn run(&self, task: &str) -> Result<AgentResponse> {
        self.calls.lock().unwrap().push(task.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(BlogcastError::OpenAI(msg.clone()));
        }
        Ok(AgentResponse {
            content: "Here is your podcast.".to_string(),
            summary: Some("A short summary.".to_string()),
            audio: self.audio.clone(),
            tool_calls: Vec::new(),
            iterations: 2,
        })
    }
}

struct MockTranscripts {
    text: String,
}

#[async_trait]
impl TranscriptFetcher for MockTranscripts {
    async fn fetch(&self, _video_id: &str) -> Result<Vec<TranscriptSegment>> {
        Ok(self
            .text
            .split('|')
            .enumerate()
            .map(|(i, t)| TranscriptSegment {
                text: t.to_string(),
                start_seconds: i as f64,
                duration_seconds: 1.0,
            })
            .collect())
    }
}

fn build(
    out: &Path,
    agent: MockAgent,
    transcripts: Option<Arc<dyn TranscriptFetcher>>,
) -> Orchestrator {
    let mut settings = Settings::default();
    settings.general.output_dir = out.to_string_lossy().into_owned();
    Orchestrator::with_components(&settings, Prompts::default(), Arc::new(agent), transcripts)
}

fn transcripts(text: &str) -> Option<Arc<dyn TranscriptFetcher>> {
    Some(Arc::new(MockTranscripts {
        text: text.to_string(),
    }))
}

fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
}

// ─── Happy paths ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_article_url_is_passed_to_agent() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("audio_generations");
    let agent = MockAgent::speaking();
    let calls = agent.calls.clone();

    let result = build(&out, agent, transcripts("unused"))
        .generate("https://blog.example.com/post")
        .await
        .unwrap();

    assert_eq!(result.source, ContentSource::Article);
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["Convert the blog content to a podcast: https://blog.example.com/post".to_string()]
    );
    assert!(result.file_name.starts_with("podcast_"));
    assert!(result.file_name.ends_with(".wav"));
    assert!(result.audio_path.starts_with(&out));
    assert_eq!(result.summary.as_deref(), Some("A short summary."));
    assert_eq!(files_in(&out), 1);
}

#[tokio::test]
async fn test_video_url_sends_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let agent = MockAgent::speaking();
    let calls = agent.calls.clone();

    let result = build(dir.path(), agent, transcripts("hello|from|youtube"))
        .generate("https://www.youtube.com/watch?v=ABC123&t=5")
        .await
        .unwrap();

    assert_eq!(
        result.source,
        ContentSource::Video {
            video_id: Some("ABC123".to_string())
        }
    );
    assert_eq!(
        calls.lock().unwrap()[0],
        "Convert the following YouTube transcript to a podcast:\n\nhello from youtube"
    );
}

#[tokio::test]
async fn test_each_run_writes_a_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let orchestrator = build(dir.path(), MockAgent::speaking(), None);

    let first = orchestrator.generate("https://a.example.com").await.unwrap();
    let second = orchestrator.generate("https://a.example.com").await.unwrap();

    assert_ne!(first.audio_path, second.audio_path);
    assert_eq!(files_in(dir.path()), 2);
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_no_audio_reports_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("audio_generations");

    let err = build(&out, MockAgent::silent(), None)
        .generate("https://blog.example.com/post")
        .await
        .unwrap_err();

    assert!(matches!(err, BlogcastError::NoAudio));
    assert!(err.to_string().contains("No audio was generated"));
    assert_eq!(files_in(&out), 0);
}

#[tokio::test]
async fn test_video_without_transcript_capability() {
    let dir = tempfile::tempdir().unwrap();
    let agent = MockAgent::speaking();
    let calls = agent.calls.clone();

    let err = build(dir.path(), agent, None)
        .generate("https://youtu.be/XYZ?foo=bar")
        .await
        .unwrap_err();

    assert!(matches!(err, BlogcastError::TranscriptUnavailable));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_transcript_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    let err = build(dir.path(), MockAgent::speaking(), transcripts("  "))
        .generate("https://youtu.be/XYZ")
        .await
        .unwrap_err();

    assert!(matches!(err, BlogcastError::EmptyTranscript));
    assert_eq!(err.to_string(), "No transcript found for this YouTube video.");
}

#[tokio::test]
async fn test_agent_failure_is_surfaced_once() {
    let dir = tempfile::tempdir().unwrap();
    let agent = MockAgent::failing("rate limited");
    let calls = agent.calls.clone();

    let err = build(dir.path(), agent, None)
        .generate("https://blog.example.com")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("rate limited"));
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(files_in(dir.path()), 0);
}

#[tokio::test]
async fn test_empty_url_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let agent = MockAgent::speaking();
    let calls = agent.calls.clone();

    let err = build(dir.path(), agent, None).generate("   ").await.unwrap_err();

    assert!(matches!(err, BlogcastError::InvalidInput(_)));
    assert!(calls.lock().unwrap().is_empty());
}
