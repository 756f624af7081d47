//! Staged files → redacted diff → consent → backend → message.

use std::{
   fmt,
   io::{BufRead, Write},
};

use crate::{
   api::MessageGenerator,
   config::GateConfig,
   consent::confirm_send,
   error::{GateError, Result},
   git::{Vcs, collect_diff, list_staged_files},
   style,
   tokens::create_token_counter,
};

pub const NO_CHANGES: &str = "No staged changes to commit.";
pub const CANCELED: &str = "Operation canceled.";
const GENERATING: &str = "Generating commit message...";

/// How a run ended. Every variant is a normal termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
   NoChanges,
   Canceled,
   /// The hosted backend has no credential; nothing was sent.
   MissingCredential(String),
   /// Generated text or the backend's fallback message.
   Message(String),
}

impl Outcome {
   pub fn status(&self) -> &str {
      match self {
         Self::NoChanges => NO_CHANGES,
         Self::Canceled => CANCELED,
         Self::MissingCredential(msg) | Self::Message(msg) => msg.as_str(),
      }
   }
}

impl fmt::Display for Outcome {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.status())
   }
}

/// Operator terminal: where the diff is shown and the answer is read.
pub struct Terminal<'a, R, W> {
   pub input:  &'a mut R,
   pub output: &'a mut W,
   pub color:  bool,
}

pub fn run<R: BufRead, W: Write>(
   vcs: &impl Vcs,
   generator: &impl MessageGenerator,
   term: Terminal<'_, R, W>,
   config: &GateConfig,
) -> Result<Outcome> {
   let Terminal { input, output, color } = term;

   let files = list_staged_files(vcs, config);
   if files.is_empty() {
      writeln!(output, "{NO_CHANGES}")?;
      return Ok(Outcome::NoChanges);
   }

   let diff = collect_diff(vcs, &files);
   let tokens = create_token_counter(config).count(&diff);

   let confirmed = confirm_send(&diff, Some(tokens), input, output, color).unwrap_or_else(|e| {
      style::warn(&format!("Could not read answer: {e}"));
      false
   });
   if !confirmed {
      writeln!(output, "{CANCELED}")?;
      return Ok(Outcome::Canceled);
   }

   writeln!(output, "Using {}...", generator.describe())?;
   let generated = if color {
      style::with_spinner(GENERATING, || generator.generate(&diff))
   } else {
      writeln!(output, "{GENERATING}")?;
      generator.generate(&diff)
   };
   match generated {
      Ok(message) => {
         if color {
            writeln!(output, "\n{}", style::success(&message))?;
         } else {
            writeln!(output, "\n{message}")?;
         }
         Ok(Outcome::Message(message))
      },
      Err(e @ GateError::MissingCredential { .. }) => {
         let msg = e.to_string();
         eprintln!("{} {msg}", style::error(style::icons::ERROR));
         Ok(Outcome::MissingCredential(msg))
      },
      Err(e) => Err(e),
   }
}
