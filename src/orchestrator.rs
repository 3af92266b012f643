//! Wiring for the travel desk.
//!
//! Builds the knowledge store, tool registry, completion engine and agent from
//! settings. Everything is constructed once at startup.

use crate::agent::Agent;
use crate::completion::{CompletionEngine, OpenAIChatEngine};
use crate::config::{ModelProvider, ModelSettings, Prompts, Settings};
use crate::embedding::create_embedder;
use crate::error::{Result, TourdeskError};
use crate::knowledge::corpus::{default_documents, load_corpus};
use crate::knowledge::KnowledgeStore;
use crate::openai::{create_azure_client, create_client};
use crate::rag::RagLookup;
use crate::tools::travel::{exchange_rate_tool, weather_tool};
use crate::tools::ToolRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Assembled travel desk: the agent plus the store backing its RAG tool.
pub struct Orchestrator {
    settings: Settings,
    knowledge: Arc<KnowledgeStore>,
    agent: Agent,
}

impl Orchestrator {
    /// Build everything from settings, talking to the configured model.
    pub async fn new(settings: Settings) -> Result<Self> {
        let engine = create_engine(&settings.model)?;
        Self::with_engine(settings, engine).await
    }

    /// Build everything from settings around an existing completion engine.
    pub async fn with_engine(settings: Settings, engine: Arc<dyn CompletionEngine>) -> Result<Self> {
        let knowledge = Arc::new(build_knowledge_store(&settings).await?);
        let registry = build_registry(&settings, knowledge.clone())?;

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let instructions = match &settings.agent.instructions {
            Some(custom) => custom.clone(),
            None => prompts.agent_instructions(&settings.agent.name),
        };

        let agent = Agent::new(engine, registry)
            .with_name(&settings.agent.name)
            .with_instructions(&instructions)
            .with_max_tool_rounds(settings.agent.max_tool_rounds)
            .with_model_timeout(Duration::from_secs(settings.model.timeout_secs))
            .with_tool_timeout(Duration::from_secs(settings.agent.tool_timeout_secs))
            .with_max_retries(settings.model.max_retries)
            .with_history_limit(settings.agent.history_limit);

        info!(
            "{} ready with {} tools and {} documents",
            agent.name(),
            agent.tools().len(),
            knowledge.len()?
        );

        Ok(Self {
            settings,
            knowledge,
            agent,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn knowledge(&self) -> Arc<KnowledgeStore> {
        self.knowledge.clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Create the completion engine for the configured provider.
pub fn create_engine(model: &ModelSettings) -> Result<Arc<dyn CompletionEngine>> {
    let engine: Arc<dyn CompletionEngine> = match model.provider {
        ModelProvider::OpenAI => {
            info!("Using OpenAI model {}", model.model);
            let client = create_client()?;
            Arc::new(OpenAIChatEngine::new(client, &model.model))
        }
        ModelProvider::Azure => {
            let deployment = model.deployment.as_deref().ok_or_else(|| {
                TourdeskError::Config("Azure provider requires model.deployment".to_string())
            })?;
            let endpoint = model.endpoint.as_deref().ok_or_else(|| {
                TourdeskError::Config("Azure provider requires model.endpoint".to_string())
            })?;
            info!("Using Azure deployment {} at {}", deployment, endpoint);
            let client = create_azure_client(endpoint, deployment, &model.api_version)?;
            Arc::new(OpenAIChatEngine::new(client, deployment))
        }
    };
    Ok(engine)
}

/// Create the knowledge store and load its corpus.
pub async fn build_knowledge_store(settings: &Settings) -> Result<KnowledgeStore> {
    let embedder = create_embedder(&settings.knowledge)?;
    let store = KnowledgeStore::new(embedder);

    let documents = match settings.corpus_path() {
        Some(path) => {
            info!("Loading corpus from {}", path.display());
            load_corpus(&path)?
        }
        None => default_documents(),
    };
    let count = store.add(documents).await?;
    info!("Knowledge base ready ({} documents)", count);

    Ok(store)
}

/// Register the travel tools and the RAG lookup.
pub fn build_registry(settings: &Settings, knowledge: Arc<KnowledgeStore>) -> Result<ToolRegistry> {
    let rag = RagLookup::new(knowledge).with_relevance_floor(settings.knowledge.relevance_floor);

    let mut registry = ToolRegistry::new();
    registry.register(weather_tool())?;
    registry.register(exchange_rate_tool())?;
    registry.register(rag.into_tool())?;
    Ok(registry)
}
