//! Models command handler: generation model chooser listing.

use clap::Args;
use pdfchat_core::{config::AppConfig, AppResult};
use pdfchat_llm::{GenerationClient, OllamaClient};

/// List available generation models
#[derive(Args, Debug)]
pub struct ModelsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ModelsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing models command");

        let client = OllamaClient::with_base_url(&config.ollama_url);

        // The chooser must always render; any backend failure degrades to
        // an empty listing instead of an error
        let models = match client.list_models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!("Model listing unavailable: {}", e);
                Vec::new()
            }
        };

        // Embedding-only models are useless as a generation choice
        let models: Vec<String> = models
            .into_iter()
            .filter(|name| !name.starts_with(&config.embedding_filter_prefix))
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&models)?);
        } else if models.is_empty() {
            println!("(no models available)");
        } else {
            for name in &models {
                println!("{}", name);
            }
        }

        Ok(())
    }
}
