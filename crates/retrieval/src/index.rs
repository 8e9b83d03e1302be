//! In-memory vector index over one document's segments.
//!
//! A `CorpusIndex` is built whole and never mutated afterwards; replacing
//! the corpus means building a new index and swapping it into the store.

use crate::types::{ScoredSegment, Segment};
use chrono::{DateTime, Utc};
use pdfchat_core::{AppError, AppResult};

/// One indexed segment with its embedding vector.
#[derive(Debug, Clone)]
struct IndexEntry {
    position: u32,
    text: String,
    vector: Vec<f32>,
}

/// Immutable similarity-searchable index of one ingested document.
#[derive(Debug)]
pub struct CorpusIndex {
    document_id: String,
    document_name: String,
    embedding_model: String,
    built_at: DateTime<Utc>,
    entries: Vec<IndexEntry>,
}

impl CorpusIndex {
    /// Build an index from segments zipped with their embedding vectors.
    ///
    /// Fails when the two sequences disagree in length, which would mean
    /// the embedder dropped or duplicated an item.
    pub fn build(
        document_name: impl Into<String>,
        embedding_model: impl Into<String>,
        segments: Vec<Segment>,
        vectors: Vec<Vec<f32>>,
    ) -> AppResult<Self> {
        if segments.len() != vectors.len() {
            return Err(AppError::EmbeddingUnavailable(format!(
                "Embedding count mismatch: {} segments, {} vectors",
                segments.len(),
                vectors.len()
            )));
        }

        let entries = segments
            .into_iter()
            .zip(vectors)
            .map(|(segment, vector)| IndexEntry {
                position: segment.position,
                text: segment.text,
                vector,
            })
            .collect();

        Ok(Self {
            document_id: uuid::Uuid::new_v4().to_string(),
            document_name: document_name.into(),
            embedding_model: embedding_model.into(),
            built_at: Utc::now(),
            entries,
        })
    }

    /// Number of indexed segments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the index holds no segments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generated id of this ingestion.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Source document name.
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Embedding model that produced every vector in this index.
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// When the index was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Return the top-k most similar segments, most similar first.
    ///
    /// Returns fewer than k results when the index holds fewer segments.
    /// Ties keep insertion order (the sort is stable).
    pub fn search(&self, query_vector: &[f32], top_k: usize) -> Vec<ScoredSegment> {
        let mut results: Vec<ScoredSegment> = self
            .entries
            .iter()
            .map(|entry| ScoredSegment {
                position: entry.position,
                text: entry.text.clone(),
                score: cosine_similarity(query_vector, &entry.vector),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);

        tracing::debug!(
            returned = results.len(),
            requested = top_k,
            "Similarity search"
        );

        results
    }
}

/// Calculate cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(position: u32, text: &str) -> Segment {
        Segment {
            position,
            text: text.to_string(),
        }
    }

    fn index_of(vectors: Vec<Vec<f32>>) -> CorpusIndex {
        let segments = (0..vectors.len())
            .map(|i| segment(i as u32, &format!("segment {}", i)))
            .collect();
        CorpusIndex::build("doc.pdf", "test-model", segments, vectors).unwrap()
    }

    #[test]
    fn test_build_rejects_length_mismatch() {
        let result = CorpusIndex::build(
            "doc.pdf",
            "test-model",
            vec![segment(0, "a"), segment(1, "b")],
            vec![vec![1.0]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let index = index_of(vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.7, 0.7, 0.0],
        ]);

        let results = index.search(&[1.0, 0.0, 0.0], 3);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].position, 1); // exact match first
        assert_eq!(results[1].position, 2);
        assert_eq!(results[2].position, 0);
        assert!(results[0].score > results[1].score);
        assert!(results[1].score > results[2].score);
    }

    #[test]
    fn test_search_returns_exactly_k() {
        let index = index_of(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.5, 0.5],
            vec![0.9, 0.1],
        ]);

        assert_eq!(index.search(&[1.0, 0.0], 2).len(), 2);
        assert_eq!(index.search(&[1.0, 0.0], 4).len(), 4);
    }

    #[test]
    fn test_search_k_larger_than_index_returns_all() {
        let index = index_of(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let results = index.search(&[1.0, 0.0], 10);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        // Identical vectors score identically; insertion order must win
        let index = index_of(vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
        ]);

        let results = index.search(&[1.0, 0.0], 3);
        let positions: Vec<u32> = results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_index_searches_empty() {
        let index = index_of(vec![]);
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0], 3).is_empty());
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![1.0, 0.0, 0.0];
        let d = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&c, &d) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
