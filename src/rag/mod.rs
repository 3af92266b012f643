//! RAG (Retrieval-Augmented Generation) lookup exposed as an agent tool.
//!
//! The agent calls `search_travel_docs` with a free-text query; the single best
//! match from the knowledge store is returned as text for the model to ground
//! its answer on.

use crate::error::Result;
use crate::knowledge::KnowledgeStore;
use crate::tools::{ParamType, ToolArguments, ToolFunction};
use std::sync::Arc;
use tracing::{debug, info};

pub const SEARCH_DOCS_TOOL: &str = "search_travel_docs";

/// Returned when nothing in the store is relevant enough.
pub const NO_RELEVANT_INFO: &str = "No relevant information found.";

/// Default minimum cosine similarity for a match to count.
pub const DEFAULT_RELEVANCE_FLOOR: f32 = 0.2;

/// Single-best-match lookup over a knowledge store.
#[derive(Clone)]
pub struct RagLookup {
    store: Arc<KnowledgeStore>,
    relevance_floor: f32,
}

impl RagLookup {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self {
            store,
            relevance_floor: DEFAULT_RELEVANCE_FLOOR,
        }
    }

    /// Set the minimum similarity score threshold.
    pub fn with_relevance_floor(mut self, floor: f32) -> Self {
        self.relevance_floor = floor;
        self
    }

    /// Answer `query` with the top document, or [`NO_RELEVANT_INFO`].
    pub async fn lookup(&self, query: &str) -> Result<String> {
        info!("Knowledge base search: '{}'", query);

        let results = self.store.query(query, 1).await?;
        match results.into_iter().next() {
            Some(hit) if hit.score >= self.relevance_floor => {
                debug!("Matched {} (score {:.3})", hit.document.id, hit.score);
                Ok(format!("Relevant information: {}", hit.document.text))
            }
            Some(hit) => {
                debug!(
                    "Best match {} below floor ({:.3} < {:.3})",
                    hit.document.id, hit.score, self.relevance_floor
                );
                Ok(NO_RELEVANT_INFO.to_string())
            }
            None => Ok(NO_RELEVANT_INFO.to_string()),
        }
    }

    /// Wrap this lookup as the `search_travel_docs(query)` tool.
    pub fn into_tool(self) -> ToolFunction {
        ToolFunction::new(
            SEARCH_DOCS_TOOL,
            "Search the company knowledge base for travel products and policies \
             (tour packages, exchange services, cancellation rules).",
            move |args: ToolArguments| {
                let lookup = self.clone();
                let query = args.str("query").map(str::to_string);
                async move {
                    match query {
                        Ok(query) => lookup.lookup(&query).await,
                        Err(e) => Err(e),
                    }
                }
            },
        )
        .param(
            "query",
            ParamType::String,
            "Keywords about a travel product or company policy",
            true,
        )
    }
}
