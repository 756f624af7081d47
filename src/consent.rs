use std::io::{BufRead, Write};

use crate::{error::Result, style};

pub const PROMPT: &str = "Do you want to send this diff to AI? (yes/no): ";

/// `true` only for "yes", ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
   answer.trim().to_lowercase() == "yes"
}

/// Show the diff and ask whether it may leave the machine.
///
/// Reads exactly one line from `input`. End of input counts as a decline.
pub fn confirm_send(
   diff: &str,
   token_estimate: Option<usize>,
   input: &mut impl BufRead,
   output: &mut impl Write,
   color: bool,
) -> Result<bool> {
   let width = style::term_width();
   let paint = |s: &str, styled: fn(&str) -> String| if color { styled(s) } else { s.to_string() };

   writeln!(output, "{}", style::section_header("Staged diff", width, color))?;
   writeln!(output, "{}\n", style::colorize_diff(diff, color))?;
   writeln!(output, "{}", style::section_header("End of diff", width, color))?;
   if let Some(tokens) = token_estimate {
      writeln!(output, "{}", paint(&format!("~{tokens} tokens of diff"), style::dim))?;
   }
   write!(output, "{}", paint(PROMPT, style::warning))?;
   output.flush()?;

   let mut answer = String::new();
   input.read_line(&mut answer)?;
   Ok(is_affirmative(&answer))
}

#[cfg(test)]
mod tests {
   use std::io::Cursor;

   use super::*;

   fn ask(answer: &str) -> (bool, String) {
      let mut input = Cursor::new(answer.as_bytes().to_vec());
      let mut output = Vec::new();
      let accepted = confirm_send("+added\n-removed", Some(3), &mut input, &mut output, false).unwrap();
      (accepted, String::from_utf8(output).unwrap())
   }

   #[test]
   fn test_accepts_yes_in_any_case() {
      for answer in ["yes\n", "Yes\n", " YES \n", "yes"] {
         assert!(ask(answer).0, "{answer:?} should be accepted");
      }
   }

   #[test]
   fn test_rejects_everything_else() {
      for answer in ["no\n", "\n", "", "y\n", "yes please\n", "yess\n"] {
         assert!(!ask(answer).0, "{answer:?} should be declined");
      }
   }

   #[test]
   fn test_only_first_line_is_read() {
      assert!(!ask("no\nyes\n").0);
   }

   #[test]
   fn test_shows_diff_before_prompt() {
      let (_, shown) = ask("no\n");
      let diff_at = shown.find("+added\n-removed").unwrap();
      let prompt_at = shown.find(PROMPT).unwrap();
      assert!(diff_at < prompt_at);
      assert!(shown.contains("~3 tokens of diff"));
   }

   #[test]
   fn test_color_off_writes_no_escape_codes() {
      let (_, shown) = ask("no\n");
      assert!(!shown.contains("\x1b["), "{shown:?}");
   }
}
