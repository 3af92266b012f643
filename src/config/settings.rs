//! Configuration settings for Tourdesk.

use crate::error::{Result, TourdeskError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the Azure chat deployment.
pub const DEPLOYMENT_ENV: &str = "AZURE_OPENAI_CHAT_DEPLOYMENT";
/// Environment variable naming the Azure endpoint.
pub const ENDPOINT_ENV: &str = "AZURE_AI_PROJECT_ENDPOINT";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub agent: AgentSettings,
    pub knowledge: KnowledgeSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Which API serves chat completions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    OpenAI,
    Azure,
}

impl std::str::FromStr for ModelProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ModelProvider::OpenAI),
            "azure" => Ok(ModelProvider::Azure),
            _ => Err(format!("Unknown model provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelProvider::OpenAI => write!(f, "openai"),
            ModelProvider::Azure => write!(f, "azure"),
        }
    }
}

/// Completion engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub provider: ModelProvider,
    /// Model name (OpenAI).
    pub model: String,
    /// Deployment name (Azure).
    pub deployment: Option<String>,
    /// Resource endpoint (Azure).
    pub endpoint: Option<String>,
    /// API version (Azure).
    pub api_version: String,
    /// Deadline for one completion call.
    pub timeout_secs: u64,
    /// Retries after a timed-out call.
    pub max_retries: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: ModelProvider::OpenAI,
            model: "gpt-4o-mini".to_string(),
            deployment: None,
            endpoint: None,
            api_version: "2024-10-21".to_string(),
            timeout_secs: 60,
            max_retries: 1,
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub name: String,
    /// Replaces the instruction template entirely when set.
    pub instructions: Option<String>,
    pub max_tool_rounds: usize,
    pub tool_timeout_secs: u64,
    /// Session turns replayed as context.
    pub history_limit: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: "MVPTour-Assistant".to_string(),
            instructions: None,
            max_tool_rounds: 5,
            tool_timeout_secs: 10,
            history_limit: 30,
        }
    }
}

/// Embedding backend for the knowledge store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Local feature hashing, no network.
    #[default]
    Hashing,
    OpenAI,
}

/// Knowledge store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeSettings {
    pub embedding_provider: EmbeddingProvider,
    /// Embedding model (openai provider).
    pub embedding_model: String,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// Minimum similarity for the RAG tool to report a match.
    pub relevance_floor: f32,
    /// TOML corpus file; the built-in corpus is used when unset.
    pub corpus_path: Option<String>,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            embedding_provider: EmbeddingProvider::Hashing,
            embedding_model: "text-embedding-3-small".to_string(),
            dimensions: 256,
            relevance_floor: crate::rag::DEFAULT_RELEVANCE_FLOOR,
            corpus_path: None,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Apply the Azure deployment/endpoint variables, if set.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(DEPLOYMENT_ENV).ok(),
            std::env::var(ENDPOINT_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, deployment: Option<String>, endpoint: Option<String>) {
        if let Some(deployment) = deployment.filter(|d| !d.is_empty()) {
            self.model.deployment = Some(deployment);
        }
        if let Some(endpoint) = endpoint.filter(|e| !e.is_empty()) {
            self.model.endpoint = Some(endpoint);
            // An endpoint only makes sense for Azure.
            self.model.provider = ModelProvider::Azure;
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TourdeskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tourdesk")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded corpus path, if configured.
    pub fn corpus_path(&self) -> Option<PathBuf> {
        self.knowledge.corpus_path.as_deref().map(Self::expand_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model.provider, ModelProvider::OpenAI);
        assert_eq!(settings.agent.name, "MVPTour-Assistant");
        assert_eq!(settings.agent.max_tool_rounds, 5);
        assert_eq!(settings.knowledge.embedding_provider, EmbeddingProvider::Hashing);
        assert!(settings.corpus_path().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[model]
provider = "azure"
deployment = "gpt-4o"

[knowledge]
relevance_floor = 0.4
"#,
        )
        .unwrap();

        assert_eq!(settings.model.provider, ModelProvider::Azure);
        assert_eq!(settings.model.deployment.as_deref(), Some("gpt-4o"));
        assert_eq!(settings.model.timeout_secs, 60);
        assert!((settings.knowledge.relevance_floor - 0.4).abs() < f32::EPSILON);
        assert_eq!(settings.knowledge.dimensions, 256);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.agent.history_limit = 4;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.agent.history_limit, 4);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded.model.model, "gpt-4o-mini");
    }

    #[test]
    fn test_overrides_switch_to_azure() {
        let mut settings = Settings::default();
        settings.apply_overrides(
            Some("chat-deploy".to_string()),
            Some("https://example.openai.azure.com".to_string()),
        );
        assert_eq!(settings.model.provider, ModelProvider::Azure);
        assert_eq!(settings.model.deployment.as_deref(), Some("chat-deploy"));

        let mut untouched = Settings::default();
        untouched.apply_overrides(Some(String::new()), None);
        assert!(untouched.model.deployment.is_none());
        assert_eq!(untouched.model.provider, ModelProvider::OpenAI);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("Azure".parse::<ModelProvider>().unwrap(), ModelProvider::Azure);
        assert!("bedrock".parse::<ModelProvider>().is_err());
    }
}
