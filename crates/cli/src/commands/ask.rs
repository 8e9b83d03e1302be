//! Ask command handler: one-shot ingest and answer.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppResult};
use pdfchat_retrieval::{AnswerRequest, RagEngine};
use std::path::PathBuf;

/// Load a PDF and answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// PDF document to load
    pub file: PathBuf,

    /// The question to answer
    pub question: String,

    /// Sampling temperature, clamped into [0.0, 1.0]
    #[arg(short = 't', long)]
    pub temperature: Option<f32>,

    /// Number of segments to ground the answer on
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command for {}", self.file.display());

        super::ensure_pdf(&self.file)?;

        let engine = RagEngine::from_config(config)?;
        let report = engine.ingest(&self.file).await?;

        tracing::debug!(
            "Ingested {} segments from {} pages",
            report.segments,
            report.pages
        );

        let request = AnswerRequest {
            question: self.question.clone(),
            model: config.generation_model.clone(),
            temperature: self.temperature,
            top_k: self.top_k,
        };

        let answer = engine.answer(&request).await?;

        if self.json {
            let output = serde_json::json!({
                "document": report.document,
                "model": request.model,
                "question": request.question,
                "answer": answer,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
