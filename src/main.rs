use std::io;

use clap::Parser;
use commitgate::{
   Backend, BackendKind, ErrorVerbosity, GateConfig, Result, Terminal, git::GitCli, run, style,
   types::Args,
};

/// Apply CLI overrides to config
fn apply_cli_overrides(config: &mut GateConfig, args: &Args) {
   if args.local {
      config.backend = BackendKind::Local;
   } else if args.hosted {
      config.backend = BackendKind::Hosted;
   }
   // Applies to whichever backend is active after the flags above
   if let Some(ref model) = args.model {
      match config.backend {
         BackendKind::Hosted => config.hosted_model.clone_from(model),
         BackendKind::Local => config.local_model.clone_from(model),
      }
   }
   if args.strict {
      config.strict = true;
   }
   if args.quiet_errors {
      config.verbosity = ErrorVerbosity::Terse;
   }
}

/// Load config from args or default
fn load_config_from_args(args: &Args) -> Result<GateConfig> {
   if let Some(ref config_path) = args.config {
      GateConfig::from_file(config_path)
   } else {
      GateConfig::load()
   }
}

fn main() -> Result<()> {
   // A missing .env is fine
   dotenvy::dotenv().ok();

   let args = Args::parse();
   if args.no_color {
      style::disable_colors();
   }

   let mut config = load_config_from_args(&args)?;
   apply_cli_overrides(&mut config, &args);

   let vcs = GitCli::new(&args.dir);
   let backend = Backend::from_config(&config);

   // stdout stays unlocked so the spinner thread can write to it
   let mut input = io::stdin().lock();
   let mut output = io::stdout();
   let term = Terminal {
      input:  &mut input,
      output: &mut output,
      color:  style::colors_enabled(),
   };

   run(&vcs, &backend, term, &config)?;
   Ok(())
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_no_flags_keep_config() {
      let mut config = GateConfig { backend: BackendKind::Local, ..Default::default() };
      apply_cli_overrides(&mut config, &Args::default());
      assert_eq!(config.backend, BackendKind::Local);
      assert_eq!(config.verbosity, ErrorVerbosity::Verbose);
      assert!(!config.strict);
   }

   #[test]
   fn test_hosted_flag_overrides_env_choice() {
      let mut config = GateConfig { backend: BackendKind::Local, ..Default::default() };
      apply_cli_overrides(&mut config, &Args { hosted: true, ..Default::default() });
      assert_eq!(config.backend, BackendKind::Hosted);
   }

   #[test]
   fn test_model_applies_to_selected_backend() {
      let mut config = GateConfig::default();
      let args = Args { local: true, model: Some("llama3".to_string()), ..Default::default() };
      apply_cli_overrides(&mut config, &args);
      assert_eq!(config.local_model, "llama3");
      assert_eq!(config.hosted_model, "gpt-4o-mini");
   }

   #[test]
   fn test_strict_and_quiet_flags() {
      let mut config = GateConfig::default();
      let args = Args { strict: true, quiet_errors: true, ..Default::default() };
      apply_cli_overrides(&mut config, &args);
      assert!(config.strict);
      assert_eq!(config.verbosity, ErrorVerbosity::Terse);
   }
}
