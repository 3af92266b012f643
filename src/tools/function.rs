//! Tool descriptors and the closure-backed tool body.

use crate::error::{Result, TourdeskError};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Semantic type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamType {
    /// JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }

    /// Check whether a JSON value has this type.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a tool's parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParamType,
    pub description: String,
    pub required: bool,
}

/// What the completion engine sees of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON Schema object for the arguments.
    pub parameters: serde_json::Value,
}

/// Validated arguments handed to a tool body.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    tool: String,
    values: serde_json::Map<String, serde_json::Value>,
}

impl ToolArguments {
    pub(crate) fn new(tool: &str, values: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            tool: tool.to_string(),
            values,
        }
    }

    /// Raw value of an argument, if present and not null.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// Required string argument.
    pub fn str(&self, name: &str) -> Result<&str> {
        self.opt_str(name)
            .ok_or_else(|| self.missing(name, ParamType::String))
    }

    /// Optional string argument.
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    /// Required numeric argument.
    pub fn f64(&self, name: &str) -> Result<f64> {
        self.get(name)
            .and_then(|v| v.as_f64())
            .ok_or_else(|| self.missing(name, ParamType::Number))
    }

    /// Required integer argument.
    pub fn i64(&self, name: &str) -> Result<i64> {
        self.get(name)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| self.missing(name, ParamType::Integer))
    }

    /// Required boolean argument.
    pub fn bool(&self, name: &str) -> Result<bool> {
        self.get(name)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| self.missing(name, ParamType::Boolean))
    }

    fn missing(&self, name: &str, kind: ParamType) -> TourdeskError {
        TourdeskError::invalid_args(&self.tool, format!("expected {} argument '{}'", kind, name))
    }
}

type ToolHandler = dyn Fn(ToolArguments) -> BoxFuture<'static, Result<String>> + Send + Sync;

/// A named, schema-described callable the agent may invoke.
///
/// Immutable once built; cloning shares the body.
#[derive(Clone)]
pub struct ToolFunction {
    name: String,
    description: String,
    parameters: Vec<ParameterSpec>,
    handler: Arc<ToolHandler>,
}

impl ToolFunction {
    /// Create a tool from an async closure.
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }

    /// Declare a parameter. Order of calls is the schema order.
    pub fn param(
        mut self,
        name: impl Into<String>,
        kind: ParamType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.parameters.push(ParameterSpec {
            name: name.into(),
            kind,
            description: description.into(),
            required,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// JSON Schema for the parameter list.
    pub fn json_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.kind.as_str(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(param.name.clone());
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Descriptor sent to the completion engine.
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.json_schema(),
        }
    }

    /// Run the body. Arguments must already be validated.
    pub(crate) async fn call(&self, args: ToolArguments) -> Result<String> {
        (self.handler)(args).await
    }
}

impl std::fmt::Debug for ToolFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolFunction")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish()
    }
}
