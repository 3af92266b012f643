//! Configuration module for Tourdesk.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts};
pub use settings::{
    AgentSettings, EmbeddingProvider, GeneralSettings, KnowledgeSettings, ModelProvider,
    ModelSettings, PromptSettings, Settings, DEPLOYMENT_ENV, ENDPOINT_ENV,
};
