use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GateError, Result};

/// `"true"` selects the local backend.
pub const ENV_USE_LOCAL_MODEL: &str = "USE_LOCAL_MODEL";
/// Credential for the hosted backend.
pub const ENV_API_KEY: &str = "OPEN_AI_KEY_FOR_COMMIT";
pub const ENV_HOSTED_MODEL: &str = "OPEN_AI_MODEL";
pub const ENV_LOCAL_MODEL: &str = "LOCAL_MODEL_NAME";
/// `"production"` switches error logging to terse mode.
pub const ENV_DEPLOYMENT: &str = "COMMITGATE_ENV";
pub const ENV_CONFIG_PATH: &str = "COMMITGATE_CONFIG";

/// Which text-generation service receives the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
   /// OpenAI-compatible chat completions endpoint
   #[default]
   Hosted,
   /// Ollama-style chat endpoint on this machine
   Local,
}

/// How much detail backend failures print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorVerbosity {
   /// Underlying error and response body
   #[default]
   Verbose,
   /// Generic one-line notice
   Terse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
   pub backend: BackendKind,

   /// Bearer token for the hosted backend (overridden by
   /// `OPEN_AI_KEY_FOR_COMMIT`)
   pub api_key: Option<String>,

   pub hosted_api_url: String,
   pub hosted_model:   String,
   pub local_api_url:  String,
   pub local_model:    String,

   /// Sampling parameters sent to the local backend only
   pub temperature: f32,
   pub top_p:       f32,

   /// Staged paths containing any of these substrings are skipped
   pub excluded_markers: Vec<String>,

   /// Restrict staged paths to `allowed_extensions`
   pub strict: bool,

   /// Extensions (without dot) accepted in strict mode
   pub allowed_extensions: Vec<String>,

   pub verbosity: ErrorVerbosity,
}

impl Default for GateConfig {
   fn default() -> Self {
      Self {
         backend:            BackendKind::Hosted,
         api_key:            None,
         hosted_api_url:     "https://api.openai.com/v1/chat/completions".to_string(),
         hosted_model:       "gpt-4o-mini".to_string(),
         local_api_url:      "http://localhost:11434/api/chat".to_string(),
         local_model:        "deepseek-r1".to_string(),
         temperature:        0.2,
         top_p:              0.9,
         excluded_markers:   vec![".min.".to_string(), "config".to_string()],
         strict:             false,
         allowed_extensions: vec!["js".to_string(), "ts".to_string()],
         verbosity:          ErrorVerbosity::Verbose,
      }
   }
}

impl GateConfig {
   /// Load config from default location (~/.config/commitgate/config.toml)
   /// Falls back to Default if the file doesn't exist. Environment variables
   /// override file values afterwards.
   pub fn load() -> Result<Self> {
      let config_path = if let Ok(custom_path) = std::env::var(ENV_CONFIG_PATH) {
         PathBuf::from(custom_path)
      } else {
         Self::default_config_path().unwrap_or_default()
      };

      let mut config = if config_path.is_file() {
         Self::parse_file(&config_path)?
      } else {
         Self::default()
      };

      config.apply_env_overrides();
      Ok(config)
   }

   /// Load config from specific file
   pub fn from_file(path: &Path) -> Result<Self> {
      let mut config = Self::parse_file(path)?;
      config.apply_env_overrides();
      Ok(config)
   }

   fn parse_file(path: &Path) -> Result<Self> {
      let contents = std::fs::read_to_string(path).map_err(|e| GateError::ConfigError {
         path:   path.display().to_string(),
         reason: e.to_string(),
      })?;
      toml::from_str(&contents).map_err(|e| GateError::ConfigError {
         path:   path.display().to_string(),
         reason: e.to_string(),
      })
   }

   /// Apply environment variable overrides to config
   fn apply_env_overrides(&mut self) {
      if let Ok(flag) = std::env::var(ENV_USE_LOCAL_MODEL) {
         self.backend = if flag == "true" {
            BackendKind::Local
         } else {
            BackendKind::Hosted
         };
      }

      if let Ok(api_key) = std::env::var(ENV_API_KEY) {
         self.api_key = Some(api_key);
      }

      // Empty model overrides behave like unset ones
      if let Some(model) = non_empty_var(ENV_HOSTED_MODEL) {
         self.hosted_model = model;
      }
      if let Some(model) = non_empty_var(ENV_LOCAL_MODEL) {
         self.local_model = model;
      }

      if let Ok(mode) = std::env::var(ENV_DEPLOYMENT) {
         self.verbosity = if mode == "production" {
            ErrorVerbosity::Terse
         } else {
            ErrorVerbosity::Verbose
         };
      }
   }

   /// Model name for the configured backend
   pub fn active_model(&self) -> &str {
      match self.backend {
         BackendKind::Hosted => &self.hosted_model,
         BackendKind::Local => &self.local_model,
      }
   }

   /// Get default config path (platform-safe)
   /// Tries HOME (Unix/Linux/macOS) then USERPROFILE (Windows)
   pub fn default_config_path() -> Result<PathBuf> {
      let home = std::env::var("HOME")
         .or_else(|_| std::env::var("USERPROFILE"))
         .map_err(|_| GateError::ConfigError {
            path:   "~/.config/commitgate/config.toml".to_string(),
            reason: "no home directory found (tried HOME and USERPROFILE)".to_string(),
         })?;
      Ok(PathBuf::from(home).join(".config/commitgate/config.toml"))
   }
}

fn non_empty_var(name: &str) -> Option<String> {
   std::env::var(name).ok().filter(|v| !v.is_empty())
}
