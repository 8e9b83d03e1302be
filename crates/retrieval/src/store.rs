//! Shared ownership of the current corpus index.
//!
//! The store holds at most one fully built `CorpusIndex` behind an
//! atomically swapped `Arc`. Readers take a snapshot and keep using it
//! even while a new ingestion builds its replacement; the swap happens
//! only after the replacement is complete, so no partial state is ever
//! observable.

use crate::index::CorpusIndex;
use crate::types::CorpusInfo;
use pdfchat_core::{AppError, AppResult};
use std::sync::{Arc, RwLock};

/// Process-wide corpus state.
#[derive(Debug, Default)]
pub struct CorpusStore {
    current: RwLock<Option<Arc<CorpusIndex>>>,
}

impl CorpusStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the current index with a fully built one.
    ///
    /// The previous index stays alive for readers that already hold a
    /// snapshot and is dropped when the last of them finishes.
    pub fn replace(&self, index: CorpusIndex) {
        let segments = index.len();
        let document = index.document_name().to_string();

        let mut current = self.current.write().unwrap();
        *current = Some(Arc::new(index));

        tracing::info!(segments, document = %document, "Corpus replaced");
    }

    /// Take a snapshot of the current index.
    ///
    /// # Errors
    /// `NotIngested` when nothing was ingested yet, or the last ingested
    /// document produced no segments.
    pub fn snapshot(&self) -> AppResult<Arc<CorpusIndex>> {
        let current = self.current.read().unwrap();
        match current.as_ref() {
            Some(index) if !index.is_empty() => Ok(Arc::clone(index)),
            _ => Err(AppError::NotIngested),
        }
    }

    /// True iff the store holds an index with at least one segment.
    pub fn is_populated(&self) -> bool {
        let current = self.current.read().unwrap();
        current.as_ref().map(|index| !index.is_empty()).unwrap_or(false)
    }

    /// Summary of the current corpus, if any.
    pub fn info(&self) -> Option<CorpusInfo> {
        let current = self.current.read().unwrap();
        current.as_ref().map(|index| CorpusInfo {
            document: index.document_name().to_string(),
            document_id: index.document_id().to_string(),
            segments: index.len(),
            embedding_model: index.embedding_model().to_string(),
            built_at: index.built_at(),
        })
    }
}
