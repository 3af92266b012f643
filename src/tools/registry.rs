//! Registry of tools available to one agent.

use super::function::{ToolArguments, ToolDescriptor, ToolFunction};
use super::validation::validate_arguments;
use crate::error::{Result, TourdeskError};
use std::collections::HashMap;
use tracing::debug;

/// Set of uniquely named tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolFunction>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Fails without modifying the registry if the name is taken.
    pub fn register(&mut self, tool: ToolFunction) -> Result<()> {
        if self.tools.contains_key(tool.name()) {
            return Err(TourdeskError::DuplicateToolName(tool.name().to_string()));
        }
        debug!("Registered tool: {}", tool.name());
        self.tools.insert(tool.name().to_string(), tool);
        Ok(())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, tool: ToolFunction) -> Result<Self> {
        self.register(tool)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ToolFunction> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tools sorted by name.
    pub fn tools(&self) -> Vec<&ToolFunction> {
        let mut tools: Vec<&ToolFunction> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Descriptors for the completion engine, sorted by name.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools().into_iter().map(|t| t.descriptor()).collect()
    }

    /// Validate `args` against the named tool's schema and run it.
    pub async fn invoke(&self, name: &str, args: &serde_json::Value) -> Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| TourdeskError::UnknownTool(name.to_string()))?;

        validate_arguments(args, tool.parameters())
            .map_err(|message| TourdeskError::invalid_args(name, message))?;

        let values = args.as_object().cloned().unwrap_or_default();
        tool.call(ToolArguments::new(name, values)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ParamType;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn echo_tool(name: &str) -> ToolFunction {
        ToolFunction::new(name, "Echo the text back", |args: ToolArguments| {
            let out = args.str("text").map(|t| format!("echo: {}", t));
            async move { out }
        })
        .param("text", ParamType::String, "Text to echo", true)
    }

    #[test]
    fn test_duplicate_registration_leaves_registry_unchanged() {
        let mut registry = ToolRegistry::new();
        assert_ok!(registry.register(echo_tool("echo")));

        let replacement = ToolFunction::new("echo", "Different body", |_| async {
            Ok("replaced".to_string())
        });
        let err = assert_err!(registry.register(replacement));
        assert!(matches!(err, TourdeskError::DuplicateToolName(ref n) if n == "echo"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("echo").map(|t| t.description()), Some("Echo the text back"));
    }

    #[tokio::test]
    async fn test_invoke_valid_arguments() {
        let registry = ToolRegistry::new().with(echo_tool("echo")).unwrap();
        let out = registry.invoke("echo", &json!({"text": "hi"})).await.unwrap();
        assert_eq!(out, "echo: hi");
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("nope", &json!({})).await.unwrap_err();
        assert!(matches!(err, TourdeskError::UnknownTool(ref n) if n == "nope"));
    }

    #[tokio::test]
    async fn test_invoke_rejects_bad_arguments() {
        let registry = ToolRegistry::new().with(echo_tool("echo")).unwrap();

        let missing = registry.invoke("echo", &json!({})).await.unwrap_err();
        assert!(matches!(missing, TourdeskError::ArgumentValidation { .. }));

        let wrong_type = registry.invoke("echo", &json!({"text": 5})).await.unwrap_err();
        assert!(wrong_type.to_string().contains("expected type 'string'"));
    }

    #[test]
    fn test_descriptors_sorted_by_name() {
        let registry = ToolRegistry::new()
            .with(echo_tool("zeta"))
            .and_then(|r| r.with(echo_tool("alpha")))
            .unwrap();
        let names: Vec<String> = registry.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
