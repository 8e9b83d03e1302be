//! Embedding generation for segments and questions.
//!
//! One embedding model serves both sides of retrieval: the same provider
//! that embedded the ingested segments must embed incoming questions, or
//! similarity scores are meaningless. The corpus index is tagged with the
//! model name so that mismatch is rejected instead of silently tolerated.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
