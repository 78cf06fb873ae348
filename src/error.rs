use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported path scheme '{scheme}' in {path}")]
    UnsupportedScheme { scheme: String, path: String },

    #[error("Input not found: {0}")]
    InputNotFound(String),

    #[error("Failed to commit output to {path}: {message}")]
    Commit { path: String, message: String },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failures raised by a sentiment analyzer. These never leave the scorer;
/// they are collapsed to default scores there.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Lexicon unavailable: {0}")]
    Lexicon(String),

    #[error("Analyzer produced a non-finite {field}")]
    NonFinite { field: &'static str },
}
