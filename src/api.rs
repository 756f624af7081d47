use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::{
   config::{BackendKind, ENV_API_KEY, ErrorVerbosity, GateConfig},
   error::{GateError, Result},
   style, templates,
};

/// Returned when the response lacks the expected reply field.
pub const DEFAULT_MESSAGE: &str = "Default commit message.";
/// Returned when the hosted backend cannot be reached or rejects the request.
pub const HOSTED_FALLBACK: &str = "Refactor code.";
/// Returned when the local backend cannot be reached or rejects the request.
pub const LOCAL_FALLBACK: &str = "Error summarizing with local model.";

const SYSTEM_PROMPT: &str = "You are an excellent developer and code reviewer responsible for \
                             writing concise and descriptive Git commit messages.";
const LOCAL_SYSTEM_SUFFIX: &str =
   "please generate a commit message without explanations or additional context.";

/// JSON pointer to the reply in an OpenAI chat completion.
pub const HOSTED_REPLY_POINTER: &str = "/choices/0/message/content";
/// JSON pointer to the reply in an Ollama chat response.
pub const LOCAL_REPLY_POINTER: &str = "/message/content";

/// Turns a redacted diff into a commit message.
pub trait MessageGenerator {
   /// Human-readable backend name for progress output.
   fn describe(&self) -> String;

   /// Only a missing precondition (credential) is an error; backend failures
   /// come back as the backend's fallback message.
   fn generate(&self, diff: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct Message {
   role:    &'static str,
   content: String,
}

#[derive(Debug, Serialize)]
struct HostedRequest<'a> {
   model:    &'a str,
   messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct LocalRequest<'a> {
   model:       &'a str,
   messages:    Vec<Message>,
   temperature: f32,
   top_p:       f32,
   stream:      bool,
}

fn chat_messages(system: String, diff: &str) -> Result<Vec<Message>> {
   Ok(vec![
      Message { role: "system", content: system },
      Message { role: "user", content: templates::render_commit_prompt(diff)? },
   ])
}

/// OpenAI-compatible chat completions endpoint with bearer auth.
#[derive(Debug, Clone)]
pub struct HostedApi {
   pub url:       String,
   pub model:     String,
   pub api_key:   Option<String>,
   pub verbosity: ErrorVerbosity,
}

/// Ollama-style chat endpoint, unauthenticated.
#[derive(Debug, Clone)]
pub struct LocalModel {
   pub url:         String,
   pub model:       String,
   pub temperature: f32,
   pub top_p:       f32,
   pub verbosity:   ErrorVerbosity,
}

/// The configured backend, fixed for the lifetime of a run.
#[derive(Debug, Clone)]
pub enum Backend {
   Hosted(HostedApi),
   Local(LocalModel),
}

impl Backend {
   pub fn from_config(config: &GateConfig) -> Self {
      match config.backend {
         BackendKind::Hosted => Self::Hosted(HostedApi {
            url:       config.hosted_api_url.clone(),
            model:     config.hosted_model.clone(),
            api_key:   config.api_key.clone(),
            verbosity: config.verbosity,
         }),
         BackendKind::Local => Self::Local(LocalModel {
            url:         config.local_api_url.clone(),
            model:       config.local_model.clone(),
            temperature: config.temperature,
            top_p:       config.top_p,
            verbosity:   config.verbosity,
         }),
      }
   }
}

impl MessageGenerator for Backend {
   fn describe(&self) -> String {
      match self {
         Self::Hosted(api) => api.describe(),
         Self::Local(local) => local.describe(),
      }
   }

   fn generate(&self, diff: &str) -> Result<String> {
      match self {
         Self::Hosted(api) => api.generate(diff),
         Self::Local(local) => local.generate(diff),
      }
   }
}

impl MessageGenerator for HostedApi {
   fn describe(&self) -> String {
      format!("OpenAI API {}", style::model(&self.model))
   }

   fn generate(&self, diff: &str) -> Result<String> {
      let Some(api_key) = self.api_key.as_deref().filter(|k| !k.is_empty()) else {
         return Err(GateError::MissingCredential { var: ENV_API_KEY });
      };

      match self.request(diff, api_key) {
         Ok(message) => Ok(message),
         Err(e) => {
            report_failure(
               self.verbosity,
               "Error generating commit message",
               "An error occurred while generating the commit message.",
               &e,
            );
            Ok(HOSTED_FALLBACK.to_string())
         },
      }
   }
}

impl HostedApi {
   fn request(&self, diff: &str, api_key: &str) -> Result<String> {
      let payload =
         HostedRequest { model: &self.model, messages: chat_messages(SYSTEM_PROMPT.to_string(), diff)? };

      let response = build_client()?
         .post(&self.url)
         .header(AUTHORIZATION, format!("Bearer {api_key}"))
         .header(CONTENT_TYPE, "application/json")
         .json(&payload)
         .send()?;

      read_reply(response, HOSTED_REPLY_POINTER)
   }
}

impl MessageGenerator for LocalModel {
   fn describe(&self) -> String {
      format!("local model {}", style::model(&self.model))
   }

   fn generate(&self, diff: &str) -> Result<String> {
      match self.request(diff) {
         Ok(message) => Ok(message),
         Err(e) => {
            report_failure(
               self.verbosity,
               "Local model error",
               "An error occurred while querying the local model.",
               &e,
            );
            Ok(LOCAL_FALLBACK.to_string())
         },
      }
   }
}

impl LocalModel {
   fn request(&self, diff: &str) -> Result<String> {
      let payload = LocalRequest {
         model:       &self.model,
         messages:    chat_messages(format!("{SYSTEM_PROMPT}{LOCAL_SYSTEM_SUFFIX}"), diff)?,
         temperature: self.temperature,
         top_p:       self.top_p,
         stream:      false,
      };

      let response = build_client()?
         .post(&self.url)
         .header(CONTENT_TYPE, "application/json")
         .json(&payload)
         .send()?;

      read_reply(response, LOCAL_REPLY_POINTER)
   }
}

/// Build a blocking client with reqwest's default timeouts.
fn build_client() -> Result<reqwest::blocking::Client> {
   Ok(reqwest::blocking::Client::builder().build()?)
}

fn read_reply(response: reqwest::blocking::Response, pointer: &str) -> Result<String> {
   let status = response.status();
   let text = response.text()?;

   if !status.is_success() {
      return Err(GateError::ApiError { status: status.as_u16(), body: text });
   }

   // A body that isn't JSON is treated like one missing the field
   let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
   Ok(extract_reply(&body, pointer))
}

/// Null-safe lookup of the reply text, trimmed. Any missing level (or a
/// non-string leaf) yields [`DEFAULT_MESSAGE`].
pub fn extract_reply(body: &Value, pointer: &str) -> String {
   body
      .pointer(pointer)
      .and_then(Value::as_str)
      .unwrap_or(DEFAULT_MESSAGE)
      .trim()
      .to_string()
}

fn report_failure(verbosity: ErrorVerbosity, context: &str, terse: &str, err: &GateError) {
   match verbosity {
      ErrorVerbosity::Verbose => {
         eprintln!("{} {context}: {err}", style::error(style::icons::ERROR));
      },
      ErrorVerbosity::Terse => {
         eprintln!("{} {terse}", style::error(style::icons::ERROR));
      },
   }
}
