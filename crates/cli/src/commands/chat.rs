//! Chat command handler: interactive question loop over one document.
//!
//! The process keeps the corpus in memory for its whole lifetime; loading
//! another document replaces it.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppResult};
use pdfchat_retrieval::{AnswerRequest, IngestReport, RagEngine};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Load a PDF and answer questions interactively
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// PDF document to load
    pub file: PathBuf,

    /// Sampling temperature, clamped into [0.0, 1.0]
    #[arg(short = 't', long)]
    pub temperature: Option<f32>,

    /// Number of segments to ground each answer on
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command for {}", self.file.display());

        super::ensure_pdf(&self.file)?;

        let engine = RagEngine::from_config(config)?;
        let report = engine.ingest(&self.file).await?;
        print_ingest_report(&report);

        println!(
            "Ask a question ({}), :load <path> to switch documents, :quit to exit.",
            config.generation_model
        );

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break, // EOF
            };
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if line == ":quit" || line == ":q" {
                break;
            }

            if let Some(raw_path) = line.strip_prefix(":load ") {
                self.load_document(&engine, Path::new(raw_path.trim())).await;
                continue;
            }

            let request = AnswerRequest {
                question: line.to_string(),
                model: config.generation_model.clone(),
                temperature: self.temperature,
                top_k: self.top_k,
            };

            match engine.answer(&request).await {
                Ok(answer) => println!("{}\n", answer),
                Err(e) => eprintln!("Error: {}\n", e),
            }
        }

        Ok(())
    }

    /// Replace the corpus with another document; failures leave the
    /// current corpus usable.
    async fn load_document(&self, engine: &RagEngine, path: &Path) {
        let result = super::ensure_pdf(path);
        let result = match result {
            Ok(()) => engine.ingest(path).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => print_ingest_report(&report),
            Err(e) => eprintln!("Error: {}\n", e),
        }
    }
}

fn print_ingest_report(report: &IngestReport) {
    println!(
        "Ingested {} ({} pages, {} segments, {} bytes) in {:.2}s",
        report.document, report.pages, report.segments, report.bytes, report.duration_secs
    );

    if report.segments == 0 {
        println!("Warning: no text extracted; questions will find nothing to answer from.");
    }
}
