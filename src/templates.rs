use std::sync::LazyLock;

use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::error::{GateError, Result};

/// Embedded prompts folder (compiled into binary)
#[derive(RustEmbed)]
#[folder = "prompts/"]
struct Prompts;

/// Prompt asking for an atomicity verdict plus a commit message.
pub const COMMIT_PROMPT: &str = "commit/default.md";

static TERA: LazyLock<Tera> = LazyLock::new(|| {
   let mut tera = Tera::default();

   for file in Prompts::iter() {
      let Some(embedded_file) = Prompts::get(file.as_ref()) else {
         continue;
      };
      match std::str::from_utf8(embedded_file.data.as_ref()) {
         Ok(content) => {
            if let Err(e) = tera.add_raw_template(file.as_ref(), content) {
               eprintln!("Warning: Failed to register embedded template {}: {}", file.as_ref(), e);
            }
         },
         Err(e) => {
            eprintln!("Warning: Embedded template {} is not valid UTF-8: {}", file.as_ref(), e);
         },
      }
   }

   // Diffs are inserted verbatim
   tera.autoescape_on(vec![]);
   tera
});

/// Render the commit prompt with the (already redacted) diff.
pub fn render_commit_prompt(diff: &str) -> Result<String> {
   let mut context = Context::new();
   context.insert("diff", diff);

   TERA
      .render(COMMIT_PROMPT, &context)
      .map_err(|e| GateError::TemplateError { name: COMMIT_PROMPT.to_string(), reason: e.to_string() })
}
