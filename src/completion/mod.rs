//! Completion engine abstraction.
//!
//! The agent talks to a language model only through [`CompletionEngine`]: it
//! sends the conversation so far plus the tool descriptors, and gets back
//! either final text or a list of tool-call requests.

mod openai;
#[cfg(test)]
pub(crate) mod scripted;

pub use openai::OpenAIChatEngine;

use crate::error::Result;
use crate::tools::ToolDescriptor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A request from the model to call one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Engine-assigned call ID, echoed back with the result.
    pub id: String,
    /// Name of the tool to call.
    pub name: String,
    /// Raw JSON arguments as produced by the model.
    pub arguments: String,
}

/// One message of the outgoing context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    System { content: String },
    User { content: String },
    Assistant { content: String },
    /// The model's tool-call turn, replayed so results can reference it.
    ToolCalls { calls: Vec<ToolCallRequest> },
    ToolResult { call_id: String, content: String },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: content.into(),
        }
    }
}

/// Everything the engine needs for one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDescriptor>,
}

/// What the engine decided to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionResponse {
    /// Final answer.
    Text(String),
    /// One or more tools to call before answering.
    ToolCalls(Vec<ToolCallRequest>),
}

/// A pre-authenticated handle to a language model.
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
