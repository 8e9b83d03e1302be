//! Question-time retrieval.
//!
//! Embeds a question with the same model that embedded the corpus and
//! returns the most similar segments.

use crate::embeddings::EmbeddingProvider;
use crate::store::CorpusStore;
use crate::types::ScoredSegment;
use pdfchat_core::{AppError, AppResult};
use std::sync::Arc;

/// Retrieves the segments most relevant to a question.
pub struct Retriever {
    store: Arc<CorpusStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    /// Create a retriever over the given store and embedder.
    pub fn new(store: Arc<CorpusStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder }
    }

    /// Return the top-k segments for a question, most similar first.
    ///
    /// # Errors
    /// * `NotIngested` - no populated corpus to search
    /// * `InvalidRequest` - the corpus was embedded with a different model
    ///   than the one configured now
    /// * `EmbeddingUnavailable` - the embedding backend failed
    pub async fn retrieve(&self, question: &str, top_k: usize) -> AppResult<Vec<ScoredSegment>> {
        // Check the corpus before touching any backend
        let snapshot = self.store.snapshot()?;

        if snapshot.embedding_model() != self.embedder.model_name() {
            return Err(AppError::InvalidRequest(format!(
                "Corpus was embedded with model '{}' but the configured embedding model is '{}'. Re-ingest the document.",
                snapshot.embedding_model(),
                self.embedder.model_name()
            )));
        }

        let query_vector = self.embedder.embed(question).await?;
        let results = snapshot.search(&query_vector, top_k);

        tracing::info!(
            retrieved = results.len(),
            top_k,
            document = %snapshot.document_name(),
            "Retrieved segments"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::mock::MockEmbedder;
    use crate::index::CorpusIndex;
    use crate::types::Segment;

    fn store_with(model: &str, texts: &[&str]) -> Arc<CorpusStore> {
        let store = Arc::new(CorpusStore::new());
        let segments: Vec<Segment> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Segment {
                position: i as u32,
                text: text.to_string(),
            })
            .collect();
        let vectors = vec![vec![1.0, 0.0]; texts.len()];
        store.replace(CorpusIndex::build("doc.pdf", model, segments, vectors).unwrap());
        store
    }

    #[tokio::test]
    async fn test_retrieve_before_ingestion_fails() {
        let store = Arc::new(CorpusStore::new());
        let retriever = Retriever::new(store, Arc::new(MockEmbedder::new("trigram-v1")));

        let result = retriever.retrieve("anything", 3).await;
        assert!(matches!(result, Err(AppError::NotIngested)));
    }

    #[tokio::test]
    async fn test_retrieve_rejects_model_mismatch() {
        let store = store_with("other-model", &["some text"]);
        let retriever = Retriever::new(store, Arc::new(MockEmbedder::new("trigram-v1")));

        let result = retriever.retrieve("anything", 3).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_retrieve_returns_at_most_k() {
        let store = store_with("trigram-v1", &["one", "two", "three", "four"]);
        let retriever = Retriever::new(store, Arc::new(MockEmbedder::new("trigram-v1")));

        let results = retriever.retrieve("question", 3).await.unwrap();
        assert_eq!(results.len(), 3);

        let results = retriever.retrieve("question", 10).await.unwrap();
        assert_eq!(results.len(), 4);
    }
}
