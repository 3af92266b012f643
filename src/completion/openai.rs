//! Chat Completions engine over `async-openai`, for OpenAI or Azure OpenAI.

use super::{CompletionEngine, CompletionRequest, CompletionResponse, Message, ToolCallRequest};
use crate::error::{Result, TourdeskError};
use crate::tools::ToolDescriptor;
use async_openai::config::Config;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall,
    FunctionObject,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::debug;

/// Completion engine backed by the Chat Completions API.
pub struct OpenAIChatEngine<C: Config> {
    client: Client<C>,
    model: String,
}

impl<C: Config> OpenAIChatEngine<C> {
    /// Create an engine for `model` (the deployment name on Azure).
    pub fn new(client: Client<C>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

fn build_err(e: impl std::fmt::Display) -> TourdeskError {
    TourdeskError::Completion(e.to_string())
}

/// Convert our context into API messages.
fn to_api_messages(messages: &[Message]) -> Result<Vec<ChatCompletionRequestMessage>> {
    messages
        .iter()
        .map(|message| {
            let api: ChatCompletionRequestMessage = match message {
                Message::System { content } => ChatCompletionRequestSystemMessageArgs::default()
                    .content(content.clone())
                    .build()
                    .map_err(build_err)?
                    .into(),
                Message::User { content } => ChatCompletionRequestUserMessageArgs::default()
                    .content(content.clone())
                    .build()
                    .map_err(build_err)?
                    .into(),
                Message::Assistant { content } => {
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(content.clone())
                        .build()
                        .map_err(build_err)?
                        .into()
                }
                Message::ToolCalls { calls } => {
                    let tool_calls: Vec<ChatCompletionMessageToolCall> = calls
                        .iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.clone(),
                            },
                        })
                        .collect();
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls)
                        .build()
                        .map_err(build_err)?
                        .into()
                }
                Message::ToolResult { call_id, content } => {
                    ChatCompletionRequestToolMessageArgs::default()
                        .tool_call_id(call_id.clone())
                        .content(content.clone())
                        .build()
                        .map_err(build_err)?
                        .into()
                }
            };
            Ok(api)
        })
        .collect()
}

fn to_api_tools(tools: &[ToolDescriptor]) -> Vec<ChatCompletionTool> {
    tools
        .iter()
        .map(|tool| ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                parameters: Some(tool.parameters.clone()),
                strict: None,
            },
        })
        .collect()
}

#[async_trait]
impl<C> CompletionEngine for OpenAIChatEngine<C>
where
    C: Config + Send + Sync + 'static,
{
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .messages(to_api_messages(&request.messages)?);
        // The API rejects an empty tools array.
        if !request.tools.is_empty() {
            builder.tools(to_api_tools(&request.tools));
        }
        let api_request = builder.build().map_err(build_err)?;

        debug!(
            "Chat completion: {} messages, {} tools",
            request.messages.len(),
            request.tools.len()
        );

        let response = self
            .client
            .chat()
            .create(api_request)
            .await
            .map_err(|e| TourdeskError::OpenAI(format!("Chat API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TourdeskError::Completion("No response from model".to_string()))?;

        match choice.message.tool_calls {
            Some(tool_calls) if !tool_calls.is_empty() => Ok(CompletionResponse::ToolCalls(
                tool_calls
                    .into_iter()
                    .map(|call| ToolCallRequest {
                        id: call.id,
                        name: call.function.name,
                        arguments: call.function.arguments,
                    })
                    .collect(),
            )),
            _ => Ok(CompletionResponse::Text(
                choice.message.content.unwrap_or_default(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_api_messages_covers_every_role() {
        let messages = vec![
            Message::system("Be helpful."),
            Message::user("Seattle weather?"),
            Message::ToolCalls {
                calls: vec![ToolCallRequest {
                    id: "call_1".to_string(),
                    name: "get_weather".to_string(),
                    arguments: r#"{"location":"Seattle"}"#.to_string(),
                }],
            },
            Message::ToolResult {
                call_id: "call_1".to_string(),
                content: "Sunny".to_string(),
            },
            Message::assistant("It is sunny."),
        ];

        let api = to_api_messages(&messages).unwrap();
        assert_eq!(api.len(), 5);
        assert!(matches!(api[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(api[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(api[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(api[3], ChatCompletionRequestMessage::Tool(_)));
        assert!(matches!(api[4], ChatCompletionRequestMessage::Assistant(_)));
    }

    #[test]
    fn test_to_api_tools() {
        let tools = to_api_tools(&[ToolDescriptor {
            name: "get_weather".to_string(),
            description: "Weather".to_string(),
            parameters: json!({"type": "object", "properties": {}, "required": []}),
        }]);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].function.name, "get_weather");
        assert_eq!(tools[0].function.description.as_deref(), Some("Weather"));
    }
}
