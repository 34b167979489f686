//! Agent system for turning content into a spoken summary.
//!
//! Provides an LLM agent that can scrape articles and call text-to-speech,
//! following a fixed set of podcast instructions.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext, ToolOutputs};

use crate::error::Result;
use async_trait::async_trait;

/// Anything that can carry out a podcast task and report the audio it made.
#[async_trait]
pub trait TaskAgent: Send + Sync {
    async fn run(&self, task: &str) -> Result<AgentResponse>;
}
