//! Error types for Tourdesk.

use thiserror::Error;

/// Library-level error type for Tourdesk operations.
#[derive(Error, Debug)]
pub enum TourdeskError {
    #[error("Tool already registered: {0}")]
    DuplicateToolName(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for tool '{tool}': {message}")]
    ArgumentValidation { tool: String, message: String },

    #[error("Document already exists: {0}")]
    DuplicateDocumentId(String),

    #[error("Completion engine timed out after {0}s")]
    ModelTimeout(u64),

    #[error("Tool '{tool}' timed out after {secs}s")]
    ToolTimeout { tool: String, secs: u64 },

    #[error("Agent exceeded maximum tool rounds ({0})")]
    ToolRoundLimit(usize),

    #[error("Completion engine error: {0}")]
    Completion(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Knowledge store error: {0}")]
    KnowledgeStore(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl TourdeskError {
    /// Shorthand for an argument validation failure on `tool`.
    pub fn invalid_args(tool: &str, message: impl Into<String>) -> Self {
        TourdeskError::ArgumentValidation {
            tool: tool.to_string(),
            message: message.into(),
        }
    }

    /// Whether the agent loop should hand this error back to the model as a
    /// tool result instead of failing the run.
    pub fn is_correctable(&self) -> bool {
        matches!(
            self,
            TourdeskError::UnknownTool(_) | TourdeskError::ArgumentValidation { .. }
        )
    }

    /// Whether the failed call may be retried.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            TourdeskError::ModelTimeout(_) | TourdeskError::ToolTimeout { .. }
        )
    }
}

/// Result type alias for Tourdesk operations.
pub type Result<T> = std::result::Result<T, TourdeskError>;
