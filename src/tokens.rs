//! Local token estimate for the diff shown at the consent gate.
//!
//! Uses the tiktoken encoder for the configured model when one is known and
//! falls back to 4 chars ≈ 1 token. Never touches the network.

use std::fmt;

use tiktoken_rs::{CoreBPE, get_bpe_from_model};

use crate::config::GateConfig;

/// Create a `TokenCounter` for the active backend's model.
pub fn create_token_counter(config: &GateConfig) -> TokenCounter {
   TokenCounter::new(config.active_model())
}

pub struct TokenCounter {
   model:    String,
   tiktoken: Option<CoreBPE>,
}

impl fmt::Debug for TokenCounter {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("TokenCounter")
         .field("model", &self.model)
         .field("has_tiktoken", &self.tiktoken.is_some())
         .finish()
   }
}

impl TokenCounter {
   pub fn new(model: &str) -> Self {
      Self { model: model.to_string(), tiktoken: get_bpe_from_model(model).ok() }
   }

   /// Whether counts come from a real tokenizer rather than the estimate.
   pub const fn is_exact(&self) -> bool {
      self.tiktoken.is_some()
   }

   pub fn count(&self, text: &str) -> usize {
      if let Some(ref encoder) = self.tiktoken {
         encoder.encode_with_special_tokens(text).len()
      } else {
         text.len() / 4
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_unknown_model_uses_char_estimate() {
      let counter = TokenCounter::new("deepseek-r1");
      assert!(!counter.is_exact());
      assert_eq!(counter.count("abcdefgh"), 2);
      assert_eq!(counter.count(""), 0);
   }
}
