//! Configuration management for pdfchat.
//!
//! Configuration is merged from three layers, lowest precedence first:
//! - Built-in defaults
//! - An optional YAML config file
//! - `PDFCHAT_*` environment variables and command-line flags

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// Holds the Ollama endpoint, model selection, and the retrieval
/// parameters shared by the ingestion and answer pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Base URL of the Ollama API
    pub ollama_url: String,

    /// Default text-generation model
    pub generation_model: String,

    /// Embedding provider ("ollama" or "mock")
    pub embedding_provider: String,

    /// Embedding model used for segments and questions alike
    pub embedding_model: String,

    /// Model-name prefix excluded from the generation model chooser
    pub embedding_filter_prefix: String,

    /// Target segment length in characters
    pub chunk_size: usize,

    /// Overlap between consecutive segments in characters
    pub chunk_overlap: usize,

    /// Number of segments retrieved per question
    pub top_k: usize,

    /// Default sampling temperature, clamped into [0.0, 1.0] at use
    pub temperature: f32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    ollama: Option<OllamaSection>,
    retrieval: Option<RetrievalSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OllamaSection {
    url: Option<String>,
    generation_model: Option<String>,
    embedding_provider: Option<String>,
    embedding_model: Option<String>,
    embedding_filter_prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalSection {
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    top_k: Option<usize>,
    temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            ollama_url: "http://127.0.0.1:11434".to_string(),
            generation_model: "llama3.2".to_string(),
            embedding_provider: "ollama".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            embedding_filter_prefix: "nomic-embed".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 3,
            temperature: 0.2,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and an optional file.
    ///
    /// Environment variables:
    /// - `PDFCHAT_CONFIG`: Path to config file
    /// - `PDFCHAT_OLLAMA_URL` (or `OLLAMA_URL`): Ollama base URL
    /// - `PDFCHAT_MODEL`: Default generation model
    /// - `PDFCHAT_EMBEDDING_MODEL`: Embedding model
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("PDFCHAT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // File layer sits under the env layer
        if let Some(path) = config.config_file.clone() {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            config.apply_file(&path)?;
        }

        if let Ok(url) = std::env::var("PDFCHAT_OLLAMA_URL").or_else(|_| std::env::var("OLLAMA_URL"))
        {
            config.ollama_url = url;
        }

        if let Ok(model) = std::env::var("PDFCHAT_MODEL") {
            config.generation_model = model;
        }

        if let Ok(model) = std::env::var("PDFCHAT_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        config.validate()?;

        Ok(config)
    }

    /// Merge a YAML config file into this configuration.
    fn apply_file(&mut self, path: &std::path::Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let file: ConfigFile = serde_yaml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        if let Some(ollama) = file.ollama {
            if let Some(url) = ollama.url {
                self.ollama_url = url;
            }
            if let Some(model) = ollama.generation_model {
                self.generation_model = model;
            }
            if let Some(provider) = ollama.embedding_provider {
                self.embedding_provider = provider;
            }
            if let Some(model) = ollama.embedding_model {
                self.embedding_model = model;
            }
            if let Some(prefix) = ollama.embedding_filter_prefix {
                self.embedding_filter_prefix = prefix;
            }
        }

        if let Some(retrieval) = file.retrieval {
            if let Some(size) = retrieval.chunk_size {
                self.chunk_size = size;
            }
            if let Some(overlap) = retrieval.chunk_overlap {
                self.chunk_overlap = overlap;
            }
            if let Some(top_k) = retrieval.top_k {
                self.top_k = top_k;
            }
            if let Some(temperature) = retrieval.temperature {
                self.temperature = temperature;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        tracing::debug!("Applied config file {}", path.display());
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        ollama_url: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> AppResult<Self> {
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            self.apply_file(&path)?;
            self.config_file = Some(path);
        }

        if let Some(url) = ollama_url {
            self.ollama_url = url;
        }

        if let Some(model) = model {
            self.generation_model = model;
        }

        if let Some(level) = log_level {
            self.log_level = Some(level);
        }

        if verbose {
            self.verbose = true;
            self.log_level = Some("debug".to_string());
        }

        if no_color {
            self.no_color = true;
        }

        self.validate()?;

        Ok(self)
    }

    /// Reject configurations the pipelines cannot work with.
    fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::Config("chunk_size must be greater than zero".to_string()));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Config("top_k must be greater than zero".to_string()));
        }

        if self.embedding_model.trim().is_empty() {
            return Err(AppError::Config("embedding_model must not be empty".to_string()));
        }

        Ok(())
    }
}
