//! Prompt templates for Blogcast.
//!
//! The agent prompt can be customized by placing an `agent.toml` file in the
//! custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the podcast agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub description: String,
    pub instructions: Vec<String>,
    /// User message for YouTube videos. Variables: `{{transcript}}`, `{{url}}`.
    pub transcript_input: String,
    /// User message for blogs and articles. Variables: `{{url}}`.
    pub article_input: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            description: "You are an AI agent that can generate audio using the ElevenLabs API."
                .to_string(),
            instructions: vec![
                "When the user provides a URL:".to_string(),
                "1. If it's a blog/article, use the scrape_website tool to scrape the content.".to_string(),
                "2. If it's a YouTube video, use the provided transcript text as the content.".to_string(),
                "3. Create a concise summary of the content that is NO MORE than {{max_chars}} characters long.".to_string(),
                "4. The summary should capture the main points while being engaging and conversational.".to_string(),
                "5. Use the text_to_speech tool to convert the summary to audio.".to_string(),
                "Ensure the summary is within the {{max_chars}} character limit to avoid ElevenLabs API limits.".to_string(),
            ],
            transcript_input:
                "Convert the following YouTube transcript to a podcast:\n\n{{transcript}}".to_string(),
            article_input: "Convert the blog content to a podcast: {{url}}".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Only placeholders in the template are substituted; values are inserted
    /// verbatim. Unknown placeholders are left as they are.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Build the agent system prompt: description followed by the instruction list.
    pub fn agent_system_prompt(&self, max_chars: usize) -> String {
        let vars = HashMap::from([("max_chars".to_string(), max_chars.to_string())]);

        let instructions = self
            .agent
            .instructions
            .iter()
            .map(|line| format!("- {}", self.render_with_custom(line, &vars)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\n<instructions>\n{}\n</instructions>",
            self.render_with_custom(&self.agent.description, &vars),
            instructions
        )
    }

    /// Build the user message for a YouTube transcript.
    pub fn transcript_input(&self, url: &str, transcript: &str) -> String {
        let vars = HashMap::from([
            ("url".to_string(), url.to_string()),
            ("transcript".to_string(), transcript.to_string()),
        ]);
        self.render_with_custom(&self.agent.transcript_input, &vars)
    }

    /// Build the user message for a blog or article URL.
    pub fn article_input(&self, url: &str) -> String {
        let vars = HashMap::from([("url".to_string(), url.to_string())]);
        self.render_with_custom(&self.agent.article_input, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let vars = HashMap::from([("name".to_string(), "Bob".to_string())]);
        assert_eq!(Prompts::render("{{name}} {{other}}", &vars), "Bob {{other}}");
    }

    #[test]
    fn test_transcript_placeholders_are_not_expanded() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("show".to_string(), "Daily Digest".to_string());

        for _ in 0..20 {
            assert_eq!(
                prompts.transcript_input("https://youtu.be/abc", "visit {{url}} on {{show}} now"),
                "Convert the following YouTube transcript to a podcast:\n\nvisit {{url}} on {{show}} now"
            );
        }
    }

    #[test]
    fn test_system_prompt_includes_limit() {
        let prompts = Prompts::default();
        let system = prompts.agent_system_prompt(2000);
        assert!(system.starts_with("You are an AI agent"));
        assert!(system.contains("NO MORE than 2000 characters"));
        assert!(!system.contains("{{max_chars}}"));
    }

    #[test]
    fn test_inputs() {
        let prompts = Prompts::default();
        assert_eq!(
            prompts.article_input("https://blog.example.com/post"),
            "Convert the blog content to a podcast: https://blog.example.com/post"
        );
        assert_eq!(
            prompts.transcript_input("https://youtu.be/abc", "hello world"),
            "Convert the following YouTube transcript to a podcast:\n\nhello world"
        );
    }

    #[test]
    fn test_custom_variables_are_overridden_by_call_vars() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("url".to_string(), "ignored".to_string());
        prompts.variables.insert("show".to_string(), "Daily Digest".to_string());
        prompts.agent.article_input = "{{show}}: {{url}}".to_string();

        assert_eq!(prompts.article_input("https://a.b"), "Daily Digest: https://a.b");
    }

    #[test]
    fn test_load_custom_agent_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("agent.toml"),
            r#"description = "You are a radio host.""#,
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.agent.description, "You are a radio host.");
        assert!(!prompts.agent.instructions.is_empty());
    }
}
