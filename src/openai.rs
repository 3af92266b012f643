//! OpenAI and Azure OpenAI client construction.

use crate::error::{Result, TourdeskError};
use async_openai::config::{AzureConfig, OpenAIConfig};
use async_openai::Client;
use std::time::Duration;

/// Default timeout for the underlying HTTP client (5 minutes).
///
/// Per-call deadlines are enforced by the agent; this only guards against
/// connections that never complete.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable holding the Azure OpenAI key.
pub const AZURE_API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";

fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TourdeskError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Create an OpenAI client with the default timeout.
pub fn create_client() -> Result<Client<OpenAIConfig>> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client<OpenAIConfig>> {
    Ok(Client::with_config(OpenAIConfig::default()).with_http_client(http_client(timeout)?))
}

/// Create an Azure OpenAI client for one chat deployment.
pub fn create_azure_client(
    endpoint: &str,
    deployment: &str,
    api_version: &str,
) -> Result<Client<AzureConfig>> {
    let api_key = std::env::var(AZURE_API_KEY_ENV).unwrap_or_default();
    let config = AzureConfig::new()
        .with_api_base(endpoint.trim_end_matches('/'))
        .with_deployment_id(deployment)
        .with_api_version(api_version)
        .with_api_key(api_key);

    Ok(Client::with_config(config)
        .with_http_client(http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?))
}
