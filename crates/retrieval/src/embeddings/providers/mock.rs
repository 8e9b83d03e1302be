//! Deterministic content-derived embeddings.
//!
//! Maps word and character-trigram hashes onto a fixed-size vector, then
//! normalizes to unit length. Deterministic for a given input, so
//! re-ingesting the same document always rebuilds an identical index.
//! Used by tests and offline runs; similarity quality is crude but
//! content-aware enough to rank related texts above unrelated ones.

use crate::embeddings::provider::EmbeddingProvider;
use pdfchat_core::AppResult;

/// Embedding dimension for the mock provider.
const DIMENSIONS: usize = 384;

/// Content-hash embedding provider.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    model: String,
}

impl MockEmbedder {
    /// Create a mock embedder reporting the given model name.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; DIMENSIONS];

        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split_whitespace()
            .filter(|w| w.len() > 2)
            .collect();

        for word in &words {
            // Character trigrams spread each word over several dimensions
            let chars: Vec<char> = word.chars().collect();
            for i in 0..chars.len().saturating_sub(2) {
                let trigram = format!("{}{}{}", chars[i], chars[i + 1], chars[i + 2]);
                let hash = trigram
                    .bytes()
                    .fold(0u64, |acc, b| acc.wrapping_mul(37).wrapping_add(b as u64));
                embedding[(hash as usize) % DIMENSIONS] += 1.0;
            }

            // Whole-word dimension
            let hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            embedding[(hash as usize) % DIMENSIONS] += 1.0;
        }

        // Normalize to unit vector
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbedder {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deterministic() {
        let embedder = MockEmbedder::new("trigram-v1");
        let a = embedder.embed("the quick brown fox").await.unwrap();
        let b = embedder.embed("the quick brown fox").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_dimensions_and_normalization() {
        let embedder = MockEmbedder::new("trigram-v1");
        let embedding = embedder.embed("hello world").await.unwrap();

        assert_eq!(embedding.len(), DIMENSIONS);

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let embedder = MockEmbedder::new("trigram-v1");
        let a = embedder.embed("submarine navigation systems").await.unwrap();
        let b = embedder.embed("chocolate cake recipes").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let embedder = MockEmbedder::new("trigram-v1");
        let texts = vec![
            "first text here".to_string(),
            "second text here".to_string(),
        ];
        let batch = embedder.embed_batch(&texts).await.unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed("first text here").await.unwrap());
        assert_eq!(batch[1], embedder.embed("second text here").await.unwrap());
    }

    #[tokio::test]
    async fn test_related_text_scores_higher() {
        let embedder = MockEmbedder::new("trigram-v1");
        let doc = embedder.embed("the capital of france is paris").await.unwrap();
        let related = embedder.embed("what is the capital of france").await.unwrap();
        let unrelated = embedder.embed("banana smoothie ingredients").await.unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
        assert!(dot(&doc, &related) > dot(&doc, &unrelated));
    }
}
