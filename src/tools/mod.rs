//! Callable tools exposed to the agent.
//!
//! A [`ToolFunction`] is a declarative descriptor (name, description,
//! parameter schema) paired with an async body. Tools are collected in a
//! [`ToolRegistry`], which validates arguments before dispatch.

mod function;
mod registry;
pub mod travel;
mod validation;

pub use function::{ParamType, ParameterSpec, ToolArguments, ToolDescriptor, ToolFunction};
pub use registry::ToolRegistry;
pub use validation::validate_arguments;
