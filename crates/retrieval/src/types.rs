//! Retrieval system type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ordered piece of document text produced by the chunker.
///
/// Segments carry a fixed target length and a fixed overlap with their
/// neighbors; the final segment of a document may be shorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Zero-based position within the document
    pub position: u32,

    /// Text content
    pub text: String,
}

/// A segment returned from similarity search, most similar first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSegment {
    /// Zero-based position within the source document
    pub position: u32,

    /// Text content
    pub text: String,

    /// Cosine similarity against the query vector
    pub score: f32,
}

/// Statistics from one ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Source document name (file name)
    pub document: String,

    /// Number of page text blocks extracted
    pub pages: usize,

    /// Number of segments indexed
    pub segments: usize,

    /// Total extracted text size in bytes
    pub bytes: u64,

    /// Duration in seconds
    pub duration_secs: f64,
}

/// A question for the answer pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// The user's question
    pub question: String,

    /// Generation model name
    pub model: String,

    /// Sampling temperature; clamped into [0.0, 1.0], defaulted when absent
    pub temperature: Option<f32>,

    /// Number of segments to ground the answer on; defaulted when absent
    pub top_k: Option<usize>,
}

impl AnswerRequest {
    /// Create a request with pipeline defaults for temperature and top-k.
    pub fn new(question: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            model: model.into(),
            temperature: None,
            top_k: None,
        }
    }
}

/// Summary of the currently loaded corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusInfo {
    /// Source document name
    pub document: String,

    /// Generated id of this ingestion
    pub document_id: String,

    /// Number of indexed segments
    pub segments: usize,

    /// Embedding model that produced the index
    pub embedding_model: String,

    /// When the index was built
    pub built_at: DateTime<Utc>,
}
