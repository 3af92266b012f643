//! Search command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::build_knowledge_store;
use anyhow::Result;

/// Run the search command against the knowledge base, without the agent.
pub async fn run_search(query: &str, limit: usize, settings: Settings) -> Result<()> {
    preflight::check(Operation::Search, &settings)?;

    let store = build_knowledge_store(&settings).await?;

    let spinner = Output::spinner("Searching...");
    let results = store.query(query, limit).await;
    spinner.finish_and_clear();

    let results = results?;
    if results.is_empty() {
        Output::warning("No results found matching your query.");
        return Ok(());
    }

    Output::success(&format!("Found {} results", results.len()));
    for (i, hit) in results.iter().enumerate() {
        Output::search_result(i + 1, &hit.document.id, hit.score, &hit.document.text);
    }
    if results[0].score < settings.knowledge.relevance_floor {
        println!();
        Output::warning(&format!(
            "Best score is below the relevance floor ({:.2}); the agent would report no relevant information.",
            settings.knowledge.relevance_floor
        ));
    }

    Ok(())
}
