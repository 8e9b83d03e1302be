//! Document ingestion pipeline.
//!
//! Orchestrates load → chunk → embed → index-replace for one document.
//! Nothing is committed until every step has succeeded; a failure at any
//! point leaves the prior corpus untouched.

use crate::chunker;
use crate::embeddings::EmbeddingProvider;
use crate::index::CorpusIndex;
use crate::loader;
use crate::store::CorpusStore;
use crate::types::IngestReport;
use pdfchat_core::AppResult;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Ingests one document at a time into the corpus store.
pub struct IngestionPipeline {
    store: Arc<CorpusStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    chunk_size: usize,
    chunk_overlap: usize,
    // Serializes corpus rebuilds; readers keep the previous snapshot
    rebuild_lock: tokio::sync::Mutex<()>,
}

impl IngestionPipeline {
    /// Create an ingestion pipeline writing into the given store.
    pub fn new(
        store: Arc<CorpusStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            store,
            embedder,
            chunk_size,
            chunk_overlap,
            rebuild_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Ingest a PDF document, replacing any prior corpus on success.
    pub async fn ingest(&self, path: &Path) -> AppResult<IngestReport> {
        let document_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(document = %document_name, "Starting ingestion");

        let pages = loader::load_pdf(path)?;
        self.ingest_pages(&document_name, &pages).await
    }

    /// Ingest pre-extracted page text blocks under the given document name.
    ///
    /// This is the path `ingest` takes after PDF extraction; callers with
    /// text from another source can use it directly.
    pub async fn ingest_pages(
        &self,
        document_name: &str,
        pages: &[String],
    ) -> AppResult<IngestReport> {
        let _guard = self.rebuild_lock.lock().await;
        let start = Instant::now();

        // Page blocks are traversed in document order
        let text = pages.join("\n");
        let bytes = text.len() as u64;

        let segments = chunker::split_text(&text, self.chunk_size, self.chunk_overlap);

        let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;

        // Everything succeeded; only now may the prior corpus be discarded
        let index = CorpusIndex::build(
            document_name,
            self.embedder.model_name(),
            segments,
            vectors,
        )?;
        let segment_count = index.len();
        self.store.replace(index);

        let duration_secs = start.elapsed().as_secs_f64();

        tracing::info!(
            document = %document_name,
            segments = segment_count,
            bytes,
            "Ingestion completed in {:.2}s",
            duration_secs
        );

        Ok(IngestReport {
            document: document_name.to_string(),
            pages: pages.len(),
            segments: segment_count,
            bytes,
            duration_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::mock::MockEmbedder;
    use pdfchat_core::AppError;

    fn pipeline() -> (Arc<CorpusStore>, IngestionPipeline) {
        let store = Arc::new(CorpusStore::new());
        let embedder = Arc::new(MockEmbedder::new("trigram-v1"));
        let pipeline = IngestionPipeline::new(Arc::clone(&store), embedder, 1000, 200);
        (store, pipeline)
    }

    #[tokio::test]
    async fn test_short_document_is_one_segment() {
        let (store, pipeline) = pipeline();

        let report = pipeline
            .ingest_pages("tiny.pdf", &["A. B. C.".to_string()])
            .await
            .unwrap();

        assert_eq!(report.segments, 1);
        assert_eq!(report.pages, 1);
        assert!(store.is_populated());

        let snapshot = store.snapshot().unwrap();
        let results = snapshot.search(&[0.0; 384], 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "A. B. C.");
    }

    #[tokio::test]
    async fn test_empty_document_leaves_store_unpopulated() {
        let (store, pipeline) = pipeline();

        let report = pipeline.ingest_pages("empty.pdf", &[]).await.unwrap();

        assert_eq!(report.segments, 0);
        assert!(!store.is_populated());
    }

    #[tokio::test]
    async fn test_reingest_is_idempotent() {
        let (store, pipeline) = pipeline();
        let pages: Vec<String> = vec!["word ".repeat(500); 3];

        pipeline.ingest_pages("doc.pdf", &pages).await.unwrap();
        let first = store.snapshot().unwrap();

        pipeline.ingest_pages("doc.pdf", &pages).await.unwrap();
        let second = store.snapshot().unwrap();

        assert_eq!(first.len(), second.len());
        let a = first.search(&[0.0; 384], first.len());
        let b = second.search(&[0.0; 384], second.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.text, y.text);
            assert_eq!(x.position, y.position);
        }
    }

    #[tokio::test]
    async fn test_new_ingestion_replaces_corpus() {
        let (store, pipeline) = pipeline();

        pipeline
            .ingest_pages("first.pdf", &["first document text".to_string()])
            .await
            .unwrap();
        pipeline
            .ingest_pages("second.pdf", &["second document text".to_string()])
            .await
            .unwrap();

        let info = store.info().unwrap();
        assert_eq!(info.document, "second.pdf");
        assert_eq!(info.segments, 1);
    }

    #[tokio::test]
    async fn test_missing_file_leaves_prior_corpus() {
        let (store, pipeline) = pipeline();

        pipeline
            .ingest_pages("good.pdf", &["good text".to_string()])
            .await
            .unwrap();

        let result = pipeline.ingest(Path::new("/nonexistent/bad.pdf")).await;
        assert!(matches!(result, Err(AppError::DocumentNotFound(_))));

        // The failed ingestion must not have touched the corpus
        let info = store.info().unwrap();
        assert_eq!(info.document, "good.pdf");
        assert!(store.is_populated());
    }

    #[tokio::test]
    async fn test_long_document_produces_overlapping_segments() {
        let (store, pipeline) = pipeline();
        let page = "lorem ipsum dolor sit amet ".repeat(100); // ~2700 bytes

        let report = pipeline
            .ingest_pages("long.pdf", &[page])
            .await
            .unwrap();

        assert!(report.segments >= 3);
        assert_eq!(store.snapshot().unwrap().len(), report.segments);
    }
}
