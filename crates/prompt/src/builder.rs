//! Prompt builder for rendering the grounding template.

use handlebars::Handlebars;
use pdfchat_core::{AppError, AppResult};
use serde_json::json;

/// The grounding prompt template.
///
/// The context block arrives pre-labelled from the answer pipeline; the
/// template pins the model to that context and nothing else.
pub const GROUNDING_TEMPLATE: &str = "You are an expert assistant. Use ONLY the provided context to answer the user's question. \
If the answer is not contained in the context, say you cannot find it in the document.\n\n\
{{context}}\n\n\
Question: {{question}}\n\
Answer clearly, concisely, and completely:";

/// Build the grounding prompt for one question.
///
/// # Arguments
/// * `context` - Labelled concatenation of the retrieved segment texts
/// * `question` - The user's question, already validated as non-empty
pub fn build_grounding_prompt(context: &str, question: &str) -> AppResult<String> {
    tracing::debug!(
        context_len = context.len(),
        question_len = question.len(),
        "Building grounding prompt"
    );

    render_template(
        GROUNDING_TEMPLATE,
        &json!({
            "context": context,
            "question": question,
        }),
    )
}

/// Render a Handlebars template with the given data.
fn render_template(template: &str, data: &serde_json::Value) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, no HTML escaping
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::InvalidRequest(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", data)
        .map_err(|e| AppError::InvalidRequest(format!("Failed to render template: {}", e)))
}
