//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod demo;
mod search;
mod tools;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use demo::{run_demo, DEMO_QUESTIONS};
pub use search::run_search;
pub use tools::run_tools;
