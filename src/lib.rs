//! Tourdesk - an agent-with-tools travel desk
//!
//! A language-model agent that answers travel questions for the MVPTour
//! travel company, calling tools while it reasons.
//!
//! # Overview
//!
//! Tourdesk allows you to:
//! - Describe async functions as tools with typed, validated parameters
//! - Keep a small in-memory knowledge base searchable by similarity
//! - Expose that knowledge base to the agent as a retrieval tool
//! - Run a bounded tool-calling loop with timeouts and retries
//! - Thread multi-turn conversations through a caller-owned session
//!
//! # Architecture
//!
//! - `tools` - Tool definitions, registry and the travel tools
//! - `knowledge` - Document store with similarity search
//! - `embedding` - Embedding generation (local hashing or OpenAI)
//! - `rag` - The knowledge base as a tool
//! - `completion` - Chat completion abstraction
//! - `agent` - Orchestration loop and sessions
//! - `orchestrator` - Wiring from configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use tourdesk::config::Settings;
//! use tourdesk::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let desk = Orchestrator::new(Settings::load()?).await?;
//!     let agent = desk.agent();
//!     let mut session = agent.create_session();
//!
//!     let reply = agent.run("What's the weather in Seattle?", Some(&mut session)).await?;
//!     println!("{}", reply.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod completion;
pub mod config;
pub mod embedding;
pub mod error;
pub mod knowledge;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod tools;

pub use error::{Result, TourdeskError};
