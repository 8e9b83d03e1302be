//! Grounded answer pipeline.
//!
//! Retrieves relevant segments, assembles the grounding prompt, and asks
//! the generation backend for an answer constrained to that context.

use crate::retriever::Retriever;
use crate::types::{AnswerRequest, ScoredSegment};
use pdfchat_core::{AppError, AppResult};
use pdfchat_llm::{GenerationClient, GenerationRequest};
use std::sync::Arc;

/// Label prefixed to the concatenated segment texts.
const CONTEXT_LABEL: &str = "Context from document:";

/// Returned when the backend produces nothing but whitespace.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "(empty response)";

/// Answers questions from the currently ingested document.
pub struct AnswerPipeline {
    retriever: Retriever,
    generator: Arc<dyn GenerationClient>,
    default_temperature: f32,
    default_top_k: usize,
}

impl AnswerPipeline {
    /// Create an answer pipeline over the given retriever and backend.
    pub fn new(
        retriever: Retriever,
        generator: Arc<dyn GenerationClient>,
        default_temperature: f32,
        default_top_k: usize,
    ) -> Self {
        Self {
            retriever,
            generator,
            default_temperature,
            default_top_k,
        }
    }

    /// Answer one question from the ingested document.
    ///
    /// Validation and the corpus check run before any backend is
    /// contacted; an invalid request never costs a network call.
    pub async fn answer(&self, request: &AnswerRequest) -> AppResult<String> {
        if request.question.trim().is_empty() {
            return Err(AppError::InvalidRequest("Question is required.".to_string()));
        }
        if request.model.trim().is_empty() {
            return Err(AppError::InvalidRequest("Model is required.".to_string()));
        }

        let temperature =
            clamp_temperature(request.temperature.unwrap_or(self.default_temperature));
        let top_k = request.top_k.unwrap_or(self.default_top_k);

        let retrieved = self.retriever.retrieve(&request.question, top_k).await?;

        let context = build_context(&retrieved);
        let prompt = pdfchat_prompt::build_grounding_prompt(&context, &request.question)?;

        tracing::info!(
            model = %request.model,
            temperature,
            segments = retrieved.len(),
            "Generating grounded answer"
        );

        let generation_request =
            GenerationRequest::new(prompt, &request.model).with_temperature(temperature);
        let response = self.generator.complete(&generation_request).await?;

        let answer = response.content.trim();
        if answer.is_empty() {
            Ok(EMPTY_RESPONSE_PLACEHOLDER.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// Clamp a sampling temperature into [0.0, 1.0].
fn clamp_temperature(temperature: f32) -> f32 {
    if temperature.is_nan() {
        return 0.0;
    }
    temperature.clamp(0.0, 1.0)
}

/// Concatenate retrieved segment texts, in similarity order, under the
/// fixed context label.
fn build_context(segments: &[ScoredSegment]) -> String {
    let joined = segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n{}", CONTEXT_LABEL, joined)
}
