//! Embedding-backed in-memory document collection.

use super::{cosine_similarity, KnowledgeDocument, ScoredDocument};
use crate::embedding::Embedder;
use crate::error::{Result, TourdeskError};
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, instrument};

struct Entry {
    document: KnowledgeDocument,
    embedding: Vec<f32>,
}

#[derive(Default)]
struct Index {
    // Insertion order doubles as the tie-breaker for equal scores.
    entries: Vec<Entry>,
    ids: HashSet<String>,
}

/// In-memory similarity-searchable document collection.
///
/// Queries share a read lock; `add` holds the write lock while inserting.
/// Embeddings are computed before any lock is taken.
pub struct KnowledgeStore {
    embedder: Arc<dyn Embedder>,
    index: RwLock<Index>,
}

impl KnowledgeStore {
    /// Create an empty store using `embedder` for documents and queries.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            index: RwLock::new(Index::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Index>> {
        self.index
            .read()
            .map_err(|_| TourdeskError::KnowledgeStore("index lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Index>> {
        self.index
            .write()
            .map_err(|_| TourdeskError::KnowledgeStore("index lock poisoned".to_string()))
    }

    /// Bulk-load documents.
    ///
    /// All-or-nothing: fails with `DuplicateDocumentId` if any id is already
    /// stored or repeated within `documents`, leaving the store unchanged.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn add(&self, documents: Vec<KnowledgeDocument>) -> Result<usize> {
        let mut batch_ids = HashSet::new();
        for doc in &documents {
            if !batch_ids.insert(doc.id.as_str()) {
                return Err(TourdeskError::DuplicateDocumentId(doc.id.clone()));
            }
        }
        if let Some(doc) = {
            let index = self.read()?;
            documents.iter().find(|d| index.ids.contains(&d.id)).cloned()
        } {
            return Err(TourdeskError::DuplicateDocumentId(doc.id));
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != documents.len() {
            return Err(TourdeskError::Embedding(format!(
                "expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let mut index = self.write()?;
        // Re-check under the write lock; another add may have landed meanwhile.
        if let Some(doc) = documents.iter().find(|d| index.ids.contains(&d.id)) {
            return Err(TourdeskError::DuplicateDocumentId(doc.id.clone()));
        }

        let count = documents.len();
        for (document, embedding) in documents.into_iter().zip(embeddings) {
            index.ids.insert(document.id.clone());
            index.entries.push(Entry { document, embedding });
        }

        debug!("Added {} documents ({} total)", count, index.entries.len());
        Ok(count)
    }

    /// Top `k` documents by descending similarity to `text`.
    ///
    /// Ties keep insertion order. An empty store yields an empty result.
    #[instrument(skip(self))]
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredDocument>> {
        if k == 0 || self.is_empty()? {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(text).await?;
        let index = self.read()?;

        let mut results: Vec<ScoredDocument> = index
            .entries
            .iter()
            .map(|entry| ScoredDocument {
                document: entry.document.clone(),
                score: cosine_similarity(&query_embedding, &entry.embedding),
            })
            .collect();

        // Stable sort, so equal scores stay in insertion order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(k);

        Ok(results)
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Result<Option<KnowledgeDocument>> {
        let index = self.read()?;
        Ok(index
            .entries
            .iter()
            .find(|e| e.document.id == id)
            .map(|e| e.document.clone()))
    }

    /// All documents in insertion order.
    pub fn documents(&self) -> Result<Vec<KnowledgeDocument>> {
        let index = self.read()?;
        Ok(index.entries.iter().map(|e| e.document.clone()).collect())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.entries.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use crate::knowledge::corpus::default_documents;
    use async_trait::async_trait;

    fn store() -> KnowledgeStore {
        KnowledgeStore::new(Arc::new(HashingEmbedder::default()))
    }

    /// Embeds every text to the same vector, so all scores tie.
    struct ConstantEmbedder;

    #[async_trait]
    impl Embedder for ConstantEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 1.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 1.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    #[tokio::test]
    async fn test_empty_store_query_returns_empty() {
        let store = store();
        assert!(store.query("", 3).await.unwrap().is_empty());
        assert!(store.query("anything", 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exact_text_is_top_result() {
        let store = store();
        let docs = default_documents();
        store.add(docs.clone()).await.unwrap();

        for doc in &docs {
            let results = store.query(&doc.text, 3).await.unwrap();
            assert_eq!(results[0].document.id, doc.id);
            assert!(results.iter().all(|r| results[0].score >= r.score));
        }
    }

    #[tokio::test]
    async fn test_result_count_bounded() {
        let store = store();
        store.add(default_documents()).await.unwrap();

        assert_eq!(store.query("refund", 2).await.unwrap().len(), 2);
        assert_eq!(store.query("refund", 10).await.unwrap().len(), 3);
        assert!(store.query("refund", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected_atomically() {
        let store = store();
        store
            .add(vec![KnowledgeDocument::new("doc1", "first")])
            .await
            .unwrap();

        let err = store
            .add(vec![
                KnowledgeDocument::new("doc2", "second"),
                KnowledgeDocument::new("doc1", "again"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, TourdeskError::DuplicateDocumentId(ref id) if id == "doc1"));
        assert_eq!(store.len().unwrap(), 1);
        assert!(store.get("doc2").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_within_batch() {
        let store = store();
        let err = store
            .add(vec![
                KnowledgeDocument::new("a", "one"),
                KnowledgeDocument::new("a", "two"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, TourdeskError::DuplicateDocumentId(_)));
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let store = KnowledgeStore::new(Arc::new(ConstantEmbedder));
        store
            .add(vec![
                KnowledgeDocument::new("c", "third letter"),
                KnowledgeDocument::new("a", "first letter"),
                KnowledgeDocument::new("b", "second letter"),
            ])
            .await
            .unwrap();

        let ids: Vec<String> = store
            .query("letter", 3)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.document.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_concurrent_queries() {
        let store = Arc::new(store());
        store.add(default_documents()).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.query("cancellation refund", 1).await })
            })
            .collect();

        for handle in handles {
            let results = handle.await.unwrap().unwrap();
            assert_eq!(results[0].document.id, "doc3");
        }
    }
}
