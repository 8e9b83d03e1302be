//! pdfchat CLI
//!
//! Ask questions about a PDF document, answered strictly from its content
//! by a locally hosted Ollama backend.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, ModelsCommand};
use pdfchat_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// pdfchat - question answering over a single PDF, grounded and local
#[derive(Parser, Debug)]
#[command(name = "pdfchat")]
#[command(about = "Ask questions about a PDF using a local Ollama backend", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "PDFCHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Ollama base URL
    #[arg(long, global = true, env = "PDFCHAT_OLLAMA_URL")]
    ollama_url: Option<String>,

    /// Generation model identifier
    #[arg(short, long, global = true, env = "PDFCHAT_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a PDF and answer questions interactively
    Chat(ChatCommand),

    /// Load a PDF and answer a single question
    Ask(AskCommand),

    /// List available generation models
    Models(ModelsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.ollama_url,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    )?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("pdfchat starting");
    tracing::debug!("Ollama URL: {}", config.ollama_url);
    tracing::debug!("Generation model: {}", config.generation_model);
    tracing::debug!("Embedding model: {}", config.embedding_model);

    let command_name = match &cli.command {
        Commands::Chat(_) => "chat",
        Commands::Ask(_) => "ask",
        Commands::Models(_) => "models",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Models(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
