//! Tool definitions and implementations for the podcast agent.

use crate::error::{BlogcastError, Result};
use crate::scraper::Scraper;
use crate::tts::{truncate_chars, AudioArtifact, SpeechSynthesizer};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Scrape a web page and return its content as markdown.
    ScrapeWebsite { url: String },

    /// Convert text to speech.
    TextToSpeech { prompt: String },
}

/// What the tools produced during a run.
#[derive(Debug, Default)]
pub struct ToolOutputs {
    pub audio: Vec<AudioArtifact>,
    /// The last text sent to speech synthesis.
    pub spoken_text: Option<String>,
}

/// Tool execution context with access to the scraper and synthesizer.
pub struct ToolContext {
    scraper: Arc<dyn Scraper>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    max_speech_chars: usize,
    max_content_chars: usize,
    outputs: Mutex<ToolOutputs>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(
        scraper: Arc<dyn Scraper>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        max_speech_chars: usize,
        max_content_chars: usize,
    ) -> Self {
        Self {
            scraper,
            synthesizer,
            max_speech_chars,
            max_content_chars,
            outputs: Mutex::new(ToolOutputs::default()),
        }
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::ScrapeWebsite { url } => self.execute_scrape(url).await,
            ToolCall::TextToSpeech { prompt } => self.execute_text_to_speech(prompt).await,
        }
    }

    /// Drain everything the tools produced so far.
    pub fn take_outputs(&self) -> ToolOutputs {
        match self.outputs.lock() {
            Ok(mut outputs) => std::mem::take(&mut *outputs),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    async fn execute_scrape(&self, url: &str) -> Result<String> {
        let page = self.scraper.scrape(url).await?;

        let content = truncate_chars(&page.markdown, self.max_content_chars);
        if content.len() < page.markdown.len() {
            info!(
                "Scraped content truncated to {} characters",
                self.max_content_chars
            );
        }

        Ok(match page.title {
            Some(title) => format!("# {}\n\n{}", title, content),
            None => content.to_string(),
        })
    }

    async fn execute_text_to_speech(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(BlogcastError::Speech("Nothing to synthesize".to_string()));
        }

        let text = truncate_chars(prompt, self.max_speech_chars);
        if text.len() < prompt.len() {
            warn!(
                "Summary exceeds {} characters, truncating before synthesis",
                self.max_speech_chars
            );
        }

        let bytes = self.synthesizer.synthesize(text).await?;
        let artifact = AudioArtifact::from_bytes(&bytes, self.synthesizer.format(), text.chars().count());
        let id = artifact.id.clone();

        match self.outputs.lock() {
            Ok(mut outputs) => {
                outputs.audio.push(artifact);
                outputs.spoken_text = Some(text.to_string());
            }
            Err(_) => return Err(BlogcastError::Agent("Tool state lock poisoned".to_string())),
        }

        Ok(format!("Audio generated successfully (id: {})", id))
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "scrape_website".to_string(),
                description: Some(
                    "Scrape a blog post or article and return its main content as markdown. \
                    Use this for any URL that is not a YouTube video."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "The URL to scrape"
                        }
                    },
                    "required": ["url"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "text_to_speech".to_string(),
                description: Some(
                    "Convert text to spoken audio with ElevenLabs. \
                    Call this once with the final podcast summary."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "prompt": {
                            "type": "string",
                            "description": "The text to speak"
                        }
                    },
                    "required": ["prompt"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| BlogcastError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "scrape_website" => {
            let url = args["url"]
                .as_str()
                .ok_or_else(|| BlogcastError::Agent("Missing 'url' argument".to_string()))?
                .to_string();
            Ok(ToolCall::ScrapeWebsite { url })
        }
        "text_to_speech" => {
            let prompt = args["prompt"]
                .as_str()
                .or_else(|| args["text"].as_str())
                .ok_or_else(|| BlogcastError::Agent("Missing 'prompt' argument".to_string()))?
                .to_string();
            Ok(ToolCall::TextToSpeech { prompt })
        }
        _ => Err(BlogcastError::Agent(format!("Unknown tool: {}", name))),
    }
}
