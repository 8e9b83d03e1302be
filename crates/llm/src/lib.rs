//! LLM integration for pdfchat.
//!
//! Defines the generation client abstraction and the Ollama provider
//! used for grounded answer generation and model listing.

pub mod client;
pub mod providers;

pub use client::{GenerationClient, GenerationRequest, GenerationResponse};
pub use providers::OllamaClient;
