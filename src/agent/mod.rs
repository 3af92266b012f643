//! Agent system for answering with tool calling.
//!
//! An [`Agent`] forwards the conversation and its tool descriptors to a
//! completion engine, executes whatever tools the model asks for, feeds the
//! results back, and returns the model's final answer. A [`Session`] carries
//! the transcript across runs.

mod deadline;
mod runner;
mod session;

pub use runner::{Agent, AgentResponse, ToolCallRecord, DEFAULT_INSTRUCTIONS};
pub use session::{Role, Session, Turn};
