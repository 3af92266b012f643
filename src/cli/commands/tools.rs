//! Tools command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{build_knowledge_store, build_registry};
use anyhow::Result;
use std::sync::Arc;

/// List the registered tools with their parameter schemas.
pub async fn run_tools(settings: Settings) -> Result<()> {
    let store = Arc::new(build_knowledge_store(&settings).await?);
    let registry = build_registry(&settings, store)?;

    Output::header(&format!("Tools ({})", registry.len()));
    for tool in registry.tools() {
        println!("\n  {}", console::style(tool.name()).bold());
        println!("  {}", tool.description());
        for param in tool.parameters() {
            let required = if param.required { "required" } else { "optional" };
            Output::kv(
                &param.name,
                &format!("{} ({}) {}", param.kind, required, param.description),
            );
        }
    }
    println!();

    Ok(())
}
