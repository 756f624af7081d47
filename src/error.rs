use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
   #[error("Git command failed: {0}")]
   GitError(String),

   #[error("API request failed (HTTP {status}): {body}")]
   ApiError { status: u16, body: String },

   #[error("{var} is not set.")]
   MissingCredential { var: &'static str },

   #[error("Failed to load config {path}: {reason}")]
   ConfigError { path: String, reason: String },

   #[error("Failed to render prompt template '{name}': {reason}")]
   TemplateError { name: String, reason: String },

   #[error("IO error: {0}")]
   IoError(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   JsonError(#[from] serde_json::Error),

   #[error("HTTP error: {0}")]
   HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
