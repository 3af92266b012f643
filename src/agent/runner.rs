//! Agent runner with tool calling loop.

use super::deadline::with_deadline;
use super::session::Session;
use crate::completion::{
    CompletionEngine, CompletionRequest, CompletionResponse, Message, ToolCallRequest,
};
use crate::error::{Result, TourdeskError};
use crate::tools::{ToolDescriptor, ToolRegistry};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default system prompt for the agent.
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant. \
Use the provided tools when they can answer the question more accurately than you can.";

/// Agent that pairs a completion engine with a set of callable tools.
pub struct Agent {
    name: String,
    engine: Arc<dyn CompletionEngine>,
    tools: ToolRegistry,
    instructions: String,
    max_tool_rounds: usize,
    model_timeout: Duration,
    tool_timeout: Duration,
    max_retries: u32,
    history_limit: usize,
}

impl Agent {
    /// Create a new agent over `engine` with the given tools.
    pub fn new(engine: Arc<dyn CompletionEngine>, tools: ToolRegistry) -> Self {
        Self {
            name: "assistant".to_string(),
            engine,
            tools,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            max_tool_rounds: 5,
            model_timeout: Duration::from_secs(60),
            tool_timeout: Duration::from_secs(10),
            max_retries: 1,
            history_limit: 30,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the system instructions.
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = instructions.to_string();
        self
    }

    /// Set maximum tool round-trips per run.
    pub fn with_max_tool_rounds(mut self, max: usize) -> Self {
        self.max_tool_rounds = max;
        self
    }

    /// Set the deadline for each completion call.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// Set the deadline for each tool invocation.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Set how many times a timed-out call is retried.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set how many session turns are replayed as context.
    pub fn with_history_limit(mut self, turns: usize) -> Self {
        self.history_limit = turns;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Start an empty conversation.
    pub fn create_session(&self) -> Session {
        Session::new()
    }

    /// Run the agent on one user input.
    ///
    /// With a session, prior turns are sent as context and the user/agent
    /// exchange is appended once the run completes. A failed run leaves the
    /// session untouched.
    #[instrument(skip(self, session), fields(agent = %self.name))]
    pub async fn run(&self, input: &str, session: Option<&mut Session>) -> Result<AgentResponse> {
        let mut messages = vec![Message::system(self.instructions.clone())];
        if let Some(session) = session.as_deref() {
            messages.extend(session.context_messages(self.history_limit));
        }
        messages.push(Message::user(input));

        let tools = self.tools.descriptors();
        let mut tool_calls_made = Vec::new();
        let mut iterations = 0;
        let mut rounds = 0;

        loop {
            iterations += 1;
            debug!("Agent iteration {}, {} messages", iterations, messages.len());

            let response = self.complete(&messages, &tools).await?;

            let calls = match response {
                CompletionResponse::ToolCalls(calls) if !calls.is_empty() => calls,
                CompletionResponse::ToolCalls(_) => {
                    return Ok(self.finish(input, String::new(), tool_calls_made, iterations, session));
                }
                CompletionResponse::Text(content) => {
                    return Ok(self.finish(input, content, tool_calls_made, iterations, session));
                }
            };

            rounds += 1;
            if rounds > self.max_tool_rounds {
                return Err(TourdeskError::ToolRoundLimit(self.max_tool_rounds));
            }

            messages.push(Message::ToolCalls {
                calls: calls.clone(),
            });

            // Calls run concurrently; results are appended in request order.
            let records = join_all(calls.iter().map(|call| self.execute_tool_call(call))).await;

            for (call, record) in calls.iter().zip(records) {
                let record = record?;
                messages.push(Message::ToolResult {
                    call_id: call.id.clone(),
                    content: record.result.clone(),
                });
                tool_calls_made.push(record);
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDescriptor],
    ) -> Result<CompletionResponse> {
        let secs = self.model_timeout.as_secs();
        with_deadline(
            "Completion call",
            self.model_timeout,
            self.max_retries,
            move || {
                self.engine.complete(CompletionRequest {
                    messages: messages.to_vec(),
                    tools: tools.to_vec(),
                })
            },
            || TourdeskError::ModelTimeout(secs),
        )
        .await
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Only a timeout is an error here; every other failure is reported back
    /// to the model as the tool's result.
    async fn execute_tool_call(&self, call: &ToolCallRequest) -> Result<ToolCallRecord> {
        info!("Agent calling tool: {} with args: {}", call.name, call.arguments);

        let args = if call.arguments.trim().is_empty() {
            Ok(serde_json::json!({}))
        } else {
            serde_json::from_str::<serde_json::Value>(&call.arguments).map_err(|e| {
                TourdeskError::invalid_args(&call.name, format!("malformed JSON: {}", e))
            })
        };

        let outcome = match args {
            Ok(args) => {
                let args = &args;
                let secs = self.tool_timeout.as_secs();
                with_deadline(
                    &format!("Tool '{}'", call.name),
                    self.tool_timeout,
                    self.max_retries,
                    move || self.tools.invoke(&call.name, args),
                    || TourdeskError::ToolTimeout {
                        tool: call.name.clone(),
                        secs,
                    },
                )
                .await
            }
            Err(e) => Err(e),
        };

        let (result, is_error) = match outcome {
            Ok(output) => (output, false),
            Err(e) if e.is_timeout() => return Err(e),
            Err(e) => {
                if e.is_correctable() {
                    warn!("Rejected tool call {}: {}", call.name, e);
                } else {
                    warn!("Tool {} failed: {}", call.name, e);
                }
                (format!("Tool error: {}", e), true)
            }
        };

        Ok(ToolCallRecord {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
            result,
            is_error,
        })
    }

    /// Build the final agent response, recording the exchange if a session
    /// was supplied.
    fn finish(
        &self,
        input: &str,
        content: String,
        tool_calls: Vec<ToolCallRecord>,
        iterations: usize,
        session: Option<&mut Session>,
    ) -> AgentResponse {
        if let Some(session) = session {
            session.record_exchange(input, &content);
        }

        AgentResponse {
            content,
            tool_calls,
            iterations,
        }
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (completion calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool, or the error handed back to the model.
    pub result: String,
    /// Whether `result` is an error report.
    pub is_error: bool,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
