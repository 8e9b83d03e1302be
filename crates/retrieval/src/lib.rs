//! Document retrieval and grounded answering.
//!
//! Turns one PDF at a time into an in-memory similarity-searchable corpus
//! and answers questions strictly from that corpus. The index lives only
//! for the process lifetime; each ingestion rebuilds it from scratch.

pub mod answer;
pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod ingest;
pub mod loader;
pub mod retriever;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use answer::{AnswerPipeline, EMPTY_RESPONSE_PLACEHOLDER};
pub use ingest::IngestionPipeline;
pub use retriever::Retriever;
pub use store::CorpusStore;
pub use types::{AnswerRequest, CorpusInfo, IngestReport, ScoredSegment, Segment};

use embeddings::EmbeddingProvider;
use pdfchat_core::{AppConfig, AppResult};
use pdfchat_llm::{GenerationClient, OllamaClient};
use std::path::Path;
use std::sync::Arc;

/// The retrieval service: one corpus, one ingestion pipeline, one answer
/// pipeline, sharing a single embedding model.
///
/// Owns the corpus store; everything else borrows it through `Arc`s. One
/// engine per process is the expected shape, injected into whatever
/// transport fronts it.
pub struct RagEngine {
    store: Arc<CorpusStore>,
    ingestion: IngestionPipeline,
    answering: AnswerPipeline,
}

impl RagEngine {
    /// Assemble an engine from explicit collaborators.
    pub fn new(
        config: &AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationClient>,
    ) -> Self {
        let store = Arc::new(CorpusStore::new());

        let ingestion = IngestionPipeline::new(
            Arc::clone(&store),
            Arc::clone(&embedder),
            config.chunk_size,
            config.chunk_overlap,
        );

        let retriever = Retriever::new(Arc::clone(&store), embedder);
        let answering = AnswerPipeline::new(retriever, generator, config.temperature, config.top_k);

        Self {
            store,
            ingestion,
            answering,
        }
    }

    /// Assemble an engine with the configured Ollama backends.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let embedder = embeddings::create_provider(
            &config.embedding_provider,
            &config.embedding_model,
            &config.ollama_url,
        )?;
        let generator: Arc<dyn GenerationClient> =
            Arc::new(OllamaClient::with_base_url(&config.ollama_url));

        Ok(Self::new(config, embedder, generator))
    }

    /// Ingest a PDF, replacing any prior corpus on success.
    pub async fn ingest(&self, path: &Path) -> AppResult<IngestReport> {
        self.ingestion.ingest(path).await
    }

    /// Ingest pre-extracted page text blocks.
    pub async fn ingest_pages(
        &self,
        document_name: &str,
        pages: &[String],
    ) -> AppResult<IngestReport> {
        self.ingestion.ingest_pages(document_name, pages).await
    }

    /// Answer one question from the ingested document.
    pub async fn answer(&self, request: &AnswerRequest) -> AppResult<String> {
        self.answering.answer(request).await
    }

    /// True iff a document with at least one segment is loaded.
    pub fn is_populated(&self) -> bool {
        self.store.is_populated()
    }

    /// Summary of the current corpus, if any.
    pub fn corpus_info(&self) -> Option<CorpusInfo> {
        self.store.info()
    }
}
