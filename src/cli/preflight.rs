//! Pre-flight checks before talking to the model.
//!
//! Validates that credentials and endpoints are configured before starting
//! operations that would otherwise fail on the first request.

use crate::config::{EmbeddingProvider, ModelProvider, Settings};
use crate::error::{Result, TourdeskError};
use crate::openai::AZURE_API_KEY_ENV;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Running the agent requires model credentials.
    Agent,
    /// Searching requires embedding credentials only when embeddings are remote.
    Search,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    if settings.knowledge.embedding_provider == EmbeddingProvider::OpenAI {
        check_env("OPENAI_API_KEY")?;
    }

    match operation {
        Operation::Agent => match settings.model.provider {
            ModelProvider::OpenAI => check_env("OPENAI_API_KEY")?,
            ModelProvider::Azure => {
                check_env(AZURE_API_KEY_ENV)?;
                if settings.model.deployment.is_none() {
                    return Err(TourdeskError::Config(
                        "No Azure deployment. Set AZURE_OPENAI_CHAT_DEPLOYMENT or model.deployment"
                            .to_string(),
                    ));
                }
                if settings.model.endpoint.is_none() {
                    return Err(TourdeskError::Config(
                        "No Azure endpoint. Set AZURE_AI_PROJECT_ENDPOINT or model.endpoint"
                            .to_string(),
                    ));
                }
            }
        },
        Operation::Search => {}
    }
    Ok(())
}

fn check_env(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(()),
        Ok(_) => Err(TourdeskError::Config(format!("{} is empty", name))),
        Err(_) => Err(TourdeskError::Config(format!(
            "{} not set. Export it or add it to a .env file",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_with_local_embeddings_has_no_requirements() {
        assert!(check(Operation::Search, &Settings::default()).is_ok());
    }

    #[test]
    fn test_azure_without_deployment_fails() {
        let mut settings = Settings::default();
        settings.model.provider = ModelProvider::Azure;
        // Fails on the key or on the deployment, depending on the environment.
        assert!(check(Operation::Agent, &settings).is_err());
    }
}
