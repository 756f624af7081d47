//! Heuristic scrubbing of staged diffs before they are displayed or sent.
//!
//! This is best effort only. It catches `NAME=value` assignments for a short
//! list of secret-looking names and strips single-line comments. Secrets in
//! other shapes (JSON fields, YAML keys, PEM blocks) and block comments that
//! span several lines pass through untouched. Secrets are masked before
//! comments are removed, so `TOKEN/* x */=abc` comes out as `TOKEN=abc`.

use std::sync::LazyLock;

use regex::Regex;

/// Names whose `NAME=value` assignments get their value replaced.
pub const SECRET_NAMES: &[&str] = &["API_KEY", "SECRET", "PASSWORD", "TOKEN", "PRIVATE_KEY"];

pub const REDACTED: &str = "REDACTED";

static SECRET_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
   Regex::new(&format!("({})=.+", SECRET_NAMES.join("|"))).expect("secret pattern is valid")
});

// `.` never matches a newline, so both alternatives stay on one line.
static COMMENT: LazyLock<Regex> =
   LazyLock::new(|| Regex::new(r"(?m)/\*.*?\*/|//.*?$").expect("comment pattern is valid"));

/// Replace secret assignments, then remove comments.
pub fn redact(text: &str) -> String {
   let masked = SECRET_ASSIGNMENT.replace_all(text, format!("${{1}}={REDACTED}"));
   COMMENT.replace_all(&masked, "").into_owned()
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_masks_each_secret_name() {
      for name in SECRET_NAMES {
         let input = format!("+{name}=hunter2 and more\n context");
         assert_eq!(redact(&input), format!("+{name}=REDACTED\n context"));
      }
   }

   #[test]
   fn test_masks_suffix_of_longer_names() {
      assert_eq!(redact("+STRIPE_API_KEY=sk_live_123"), "+STRIPE_API_KEY=REDACTED");
   }

   #[test]
   fn test_leaves_unrelated_assignments() {
      let input = "+PORT=8080\n+API_KEY=\n";
      assert_eq!(redact(input), input);
   }

   #[test]
   fn test_strips_line_comments() {
      assert_eq!(redact("+let x = 1; // set x\n+let y = 2;"), "+let x = 1; \n+let y = 2;");
   }

   #[test]
   fn test_strips_inline_block_comments() {
      assert_eq!(redact("+call(/* retries */ 3);"), "+call( 3);");
      assert_eq!(redact("+/* a */ x /* b */"), "+ x ");
   }

   #[test]
   fn test_multiline_block_comment_is_kept() {
      let input = "+/* start\n+ end */";
      assert_eq!(redact(input), input);
   }

   #[test]
   fn test_url_schemes_are_stripped_like_comments() {
      // Known false positive of the line-comment heuristic.
      assert_eq!(redact("+url = \"https://example.com\""), "+url = \"https:");
   }

   #[test]
   fn test_comment_inside_assignment_hides_secret() {
      // Masking runs before comment removal, so only a second pass catches it.
      let once = redact("+TOKEN/* x */=abc");
      assert_eq!(once, "+TOKEN=abc");
      assert_eq!(redact(&once), "+TOKEN=REDACTED");
   }

   #[test]
   fn test_secret_then_comment_order() {
      assert_eq!(redact("+TOKEN=abc // rotate me"), "+TOKEN=REDACTED");
   }

   #[test]
   fn test_empty_and_non_ascii_input() {
      assert_eq!(redact(""), "");
      assert_eq!(redact("+naïve ünïcödé ✓"), "+naïve ünïcödé ✓");
   }

   #[test]
   fn test_idempotent_on_realistic_diff() {
      let diff = "diff --git a/app.js b/app.js\n\
                  --- a/app.js\n\
                  +++ b/app.js\n\
                  @@ -1,3 +1,4 @@\n\
                  +const PASSWORD=letmein;\n\
                  +// TODO remove\n\
                  +run(/* fast */ true);\n\
                  -SECRET=old\n";
      let once = redact(diff);
      assert_eq!(redact(&once), once);
      assert!(!once.contains("letmein"));
      assert!(once.contains("-SECRET=REDACTED\n"));
      assert!(once.contains("+run( true);"));
   }
}
