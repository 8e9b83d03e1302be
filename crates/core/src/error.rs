//! Error types for pdfchat.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: document loading, embedding, retrieval, generation,
//! configuration, and I/O.

use thiserror::Error;

/// Unified error type for pdfchat.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document path does not resolve to a file
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The document exists but could not be parsed
    #[error("Failed to load document: {0}")]
    DocumentLoad(String),

    /// The embedding backend could not be reached or returned garbage
    #[error("Embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// A query arrived before any document was ingested
    #[error("No document ingested yet. Load a PDF first.")]
    NotIngested,

    /// The caller supplied an invalid question, model, or parameter
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The generation backend could not be reached
    #[error("Generation backend unavailable: {0}")]
    GenerationUnavailable(String),

    /// The generation backend answered with a non-success status
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
