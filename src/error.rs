use std::io;
use thiserror::Error;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Errors that can occur while assembling portfolio data
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// GitHub API specific errors
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Failures inside a single project's enrichment pipeline
    #[error("Enrichment error: {0}")]
    Enrichment(String),
}

impl PortfolioError {
    /// Creates a new validation error with the specified message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True when the error originated in an upstream provider rather than
    /// in the request itself
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Http(_) | Self::GitHubApi(_))
    }
}
