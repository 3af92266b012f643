//! Prompt templates for Tourdesk.
//!
//! The agent instructions can be customized by placing an `agent.toml` file in
//! the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the travel desk agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub instructions: String,
    /// Closing line appended to every answer.
    pub sign_off: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            instructions: r#"You are {{agent_name}}, a customer service agent for the travel agency MVPTour.
Greet customers politely and let them know you are ready to help plan their trip.

- For weather questions, use 'get_weather'.
- For currency exchange rates, use 'get_exchange_rate'.
- For MVPTour products, services and policies (tour packages, exchange services,
  cancellation rules), use 'search_travel_docs' and answer from what it returns.

Never invent prices, rates or policies; rely on the tools.
Always end your answer with: "{{sign_off}}""#
                .to_string(),
            sign_off: "The start of a great trip, MVPTour!".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Final agent instructions for `agent_name`.
    pub fn agent_instructions(&self, agent_name: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("agent_name".to_string(), agent_name.to_string());
        vars.insert("sign_off".to_string(), self.agent.sign_off.clone());
        self.render_with_custom(&self.agent.instructions, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_instructions_render() {
        let prompts = Prompts::default();
        let text = prompts.agent_instructions("MVPTour-Assistant");
        assert!(text.starts_with("You are MVPTour-Assistant,"));
        assert!(text.contains("search_travel_docs"));
        assert!(text.ends_with("\"The start of a great trip, MVPTour!\""));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_custom_variables_yield_to_provided() {
        let mut custom = HashMap::new();
        custom.insert("agent_name".to_string(), "Ignored".to_string());
        custom.insert("city".to_string(), "Seattle".to_string());
        let mut prompts = Prompts::default();
        prompts.variables = custom;
        prompts.agent.instructions = "{{agent_name}} in {{city}}".to_string();

        assert_eq!(prompts.agent_instructions("Desk"), "Desk in Seattle");
    }

    #[test]
    fn test_load_custom_agent_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("agent.toml"),
            "instructions = \"Be brief, {{agent_name}}.\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.agent_instructions("Desk"), "Be brief, Desk.");
        // Unset fields fall back to defaults.
        assert_eq!(prompts.agent.sign_off, AgentPrompts::default().sign_off);
    }
}
