use std::path::PathBuf;

use clap::Parser;

// CLI Args
#[derive(Parser, Debug, Default)]
#[command(
   author,
   version,
   about = "Suggest a commit message for staged changes, after you approve sending the diff",
   long_about = None
)]
pub struct Args {
   /// Directory to run git commands in
   #[arg(long, default_value = ".")]
   pub dir: String,

   /// Use the local model server (same as USE_LOCAL_MODEL=true)
   #[arg(long, conflicts_with = "hosted")]
   pub local: bool,

   /// Use the hosted API even if USE_LOCAL_MODEL=true
   #[arg(long)]
   pub hosted: bool,

   /// Model name for the selected backend
   #[arg(long, short = 'm')]
   pub model: Option<String>,

   /// Only consider staged files whose extension is in `allowed_extensions`
   #[arg(long)]
   pub strict: bool,

   /// Print backend errors without details (same as COMMITGATE_ENV=production)
   #[arg(long)]
   pub quiet_errors: bool,

   /// Disable colored diff output
   #[arg(long)]
   pub no_color: bool,

   /// Path to config file (default: ~/.config/commitgate/config.toml)
   #[arg(long)]
   pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_defaults() {
      let args = Args::parse_from(["commitgate"]);
      assert_eq!(args.dir, ".");
      assert!(!args.local && !args.hosted && !args.strict);
      assert!(args.model.is_none());
   }

   #[test]
   fn test_local_conflicts_with_hosted() {
      assert!(Args::try_parse_from(["commitgate", "--local", "--hosted"]).is_err());
   }

   #[test]
   fn test_model_short_flag() {
      let args = Args::parse_from(["commitgate", "-m", "llama3", "--local"]);
      assert_eq!(args.model.as_deref(), Some("llama3"));
      assert!(args.local);
   }
}
