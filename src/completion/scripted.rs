//! Scripted completion engine for exercising the agent loop in tests.

use super::{CompletionEngine, CompletionRequest, CompletionResponse, ToolCallRequest};
use crate::error::{Result, TourdeskError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One scripted reply.
pub(crate) enum Step {
    Respond(CompletionResponse),
    /// Sleep before responding, to trip timeouts.
    Delay(Duration, CompletionResponse),
    Fail(String),
}

/// Replays a fixed sequence of responses and records every request.
#[derive(Default)]
pub(crate) struct ScriptedEngine {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedEngine {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub(crate) fn text(content: &str) -> Step {
    Step::Respond(CompletionResponse::Text(content.to_string()))
}

pub(crate) fn call(id: &str, name: &str, arguments: &str) -> ToolCallRequest {
    ToolCallRequest {
        id: id.to_string(),
        name: name.to_string(),
        arguments: arguments.to_string(),
    }
}

pub(crate) fn calls(requests: Vec<ToolCallRequest>) -> Step {
    Step::Respond(CompletionResponse::ToolCalls(requests))
}

#[async_trait]
impl CompletionEngine for ScriptedEngine {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond(response)) => Ok(response),
            Some(Step::Delay(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(Step::Fail(message)) => Err(TourdeskError::Completion(message)),
            None => Err(TourdeskError::Completion("script exhausted".to_string())),
        }
    }
}
