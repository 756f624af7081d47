//! Consent-gated commit message suggestions
//!
//! Collects the staged diff, scrubs obvious secrets and comments, shows it to
//! the operator and, only after an explicit "yes", asks a hosted
//! OpenAI-compatible API or a local Ollama server for a commit message.
pub mod api;
pub mod config;
pub mod consent;
pub mod error;
pub mod git;
pub mod pipeline;
pub mod redact;
pub mod style;
pub mod templates;
pub mod tokens;
pub mod types;

// Re-export commonly used types
pub use api::{Backend, MessageGenerator};
pub use config::{BackendKind, ErrorVerbosity, GateConfig};
pub use error::{GateError, Result};
pub use pipeline::{Outcome, Terminal, run};
